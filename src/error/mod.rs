//! Error types, one family per subsystem.

mod binding_error;
mod conversion_error;
mod engine_error;
mod eval_error;
mod handler_error;

pub use binding_error::BindingError;
pub use conversion_error::ConversionError;
pub use engine_error::{EngineError, NodePath};
pub use eval_error::EvalError;
pub use handler_error::HandlerError;
