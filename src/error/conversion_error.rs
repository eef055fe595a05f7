use thiserror::Error;

/// Template materialization failures.
///
/// The `path` is the authored location of the offending node, e.g.
/// `order-flow/stage[1]/activity[0]`, so a batch seeding run can report which
/// template broke without aborting the rest.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("{path}: semantic id must not be empty")]
    EmptyId { path: String },
    #[error("{path}: type tag must not be empty")]
    EmptyTypeTag { path: String },
    #[error("{path}: duplicate sibling id '{id}'")]
    DuplicateId { path: String, id: String },
}

impl ConversionError {
    /// The authored path of the node that failed conversion.
    pub fn path(&self) -> &str {
        match self {
            ConversionError::EmptyId { path }
            | ConversionError::EmptyTypeTag { path }
            | ConversionError::DuplicateId { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_display() {
        let err = ConversionError::DuplicateId {
            path: "wf/stage[0]".into(),
            id: "check".into(),
        };
        assert_eq!(err.to_string(), "wf/stage[0]: duplicate sibling id 'check'");
        assert_eq!(err.path(), "wf/stage[0]");
    }
}
