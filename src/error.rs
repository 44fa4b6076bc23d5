use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Failure reported by the verification SDK, passed through unchanged.
    #[error("{message}")]
    Verification { message: String },
    #[error("verification SDK has not been initialized")]
    NotInitialized,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("session error: {0}")]
    SessionError(#[from] serde_json::Error),
}
