use super::{EvalError, HandlerError};
use thiserror::Error;

/// Position of a stage or activity inside a workflow, used to pin run-level
/// errors to the node that raised them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    pub workflow: String,
    pub stage: usize,
    pub activity: Option<usize>,
}

impl NodePath {
    pub fn stage(workflow: impl Into<String>, stage: usize) -> Self {
        NodePath {
            workflow: workflow.into(),
            stage,
            activity: None,
        }
    }

    pub fn activity(workflow: impl Into<String>, stage: usize, activity: usize) -> Self {
        NodePath {
            workflow: workflow.into(),
            stage,
            activity: Some(activity),
        }
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/stage[{}]", self.workflow, self.stage)?;
        if let Some(activity) = self.activity {
            write!(f, "/activity[{}]", activity)?;
        }
        Ok(())
    }
}

/// Run-level errors raised by the sequencer and engine facade.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("workflow template not found: {0}")]
    TemplateNotFound(String),
    #[error("no handler registered for activity type '{activity_type}' at {path}")]
    HandlerNotFound {
        activity_type: String,
        path: NodePath,
    },
    #[error("condition evaluation failed at {path}: {source}")]
    Gate { path: NodePath, source: EvalError },
    #[error("activity handler failed at {path}: {source}")]
    Handler {
        path: NodePath,
        source: HandlerError,
    },
    #[error("run cancelled at {path}")]
    Cancelled { path: NodePath },
    #[error("run deadline exceeded")]
    DeadlineExceeded,
}
