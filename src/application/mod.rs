//! Application layer containing the checkout orchestration logic.
//!
//! This module defines the `CoordinationModel`, the single source of truth
//! for the widget's payment-method state, and the `ThreeDSecure` adapter
//! that drives step-up verification against the SDK ports.

pub mod model;
pub mod three_d_secure;
