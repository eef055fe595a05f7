use crate::binding::BindingMode;
use thiserror::Error;

/// Lifecycle binding failures.
///
/// `NotReady` is the contract for any call made before the engine slot is
/// resolved: callers get a typed error, never a nil dereference and never an
/// indefinite block.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("workflow engine is not ready (binding not resolved yet)")]
    NotReady,
    #[error("workflow engine is already bound")]
    AlreadyBound,
    #[error("no pending construction request recorded for this slot")]
    NothingPending,
    #[error("operation requires {expected} binding mode, manager runs in {actual}")]
    ModeMismatch {
        expected: BindingMode,
        actual: BindingMode,
    },
}
