pub mod payment_method;
pub mod ports;
pub mod verification;
