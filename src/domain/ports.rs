use super::verification::{VerificationRequest, VerificationResult};
use crate::error::Result;
use async_trait::async_trait;

/// Options the adapter passes to the SDK factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkOptions {
    pub client_handle: String,
    pub version: u32,
}

pub type VerificationSdkBox = Box<dyn VerificationSdk>;
pub type VerificationHandleBox = Box<dyn VerificationHandle>;

/// Factory for verification SDK instances.
#[async_trait]
pub trait VerificationSdk: Send + Sync {
    async fn create(&self, options: SdkOptions) -> Result<VerificationHandleBox>;
}

/// A live verification SDK instance, owned by the adapter between
/// `initialize` and `teardown`.
#[async_trait]
pub trait VerificationHandle: Send + Sync + std::fmt::Debug {
    async fn verify_card(&self, request: VerificationRequest) -> Result<VerificationResult>;
    async fn cancel_verify_card(&self) -> Result<()>;
    async fn teardown(&self) -> Result<()>;
}
