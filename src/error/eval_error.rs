use thiserror::Error;

/// Condition expression failures.
///
/// Compilation and evaluation are distinct phases: a `Compile` error means the
/// expression text never produced an AST, an `Eval` error means execution
/// against the context failed. A successful evaluation that yields anything
/// other than a boolean is reported as `NotBoolean`, never coerced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("expression failed to compile: {0}")]
    Compile(String),
    #[error("expression evaluation failed: {0}")]
    Eval(String),
    #[error("expression result is not boolean (got {found})")]
    NotBoolean { found: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_display() {
        assert_eq!(
            EvalError::Compile("unexpected token".into()).to_string(),
            "expression failed to compile: unexpected token"
        );
        assert_eq!(
            EvalError::Eval("property not found".into()).to_string(),
            "expression evaluation failed: property not found"
        );
        assert_eq!(
            EvalError::NotBoolean { found: "i64".into() }.to_string(),
            "expression result is not boolean (got i64)"
        );
    }
}
