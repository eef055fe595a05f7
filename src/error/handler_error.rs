use thiserror::Error;

/// Failures raised by external activity handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("invalid activity params: {0}")]
    InvalidParams(String),
    #[error("activity failed: {0}")]
    Failed(String),
    #[error("activity timed out after {0}s")]
    Timeout(u64),
}
