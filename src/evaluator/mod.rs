//! Boolean condition evaluation against the three-namespace context.

pub mod condition;
pub mod value;

pub use condition::ConditionEvaluator;
