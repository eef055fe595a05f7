//! The stage/activity sequencer — the per-run execution driver.
//!
//! One run is a single logical thread of control: stage `i+1` is never
//! entered before stage `i` is done, activity `j+1` never before activity
//! `j`. Multiple independent runs may execute concurrently against the same
//! read-only template; each run owns its own context.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::context::ExecutionContext;
use crate::engine::handler::HandlerRegistry;
use crate::error::{EngineError, NodePath};
use crate::evaluator::ConditionEvaluator;
use crate::template::WorkflowTemplate;

/// What to do when a gate expression itself fails to evaluate.
///
/// `FailClosed` aborts the run with the node path; `FailOpen` treats the
/// condition as not met and skips the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    #[default]
    FailClosed,
    FailOpen,
}

/// Configuration for the sequencer/engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub gate_policy: GatePolicy,
    /// Wall-clock limit for one run in seconds; 0 disables the limit.
    #[serde(default = "default_max_execution_time_secs")]
    pub max_execution_time_secs: u64,
}

fn default_max_execution_time_secs() -> u64 {
    600
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            gate_policy: GatePolicy::FailClosed,
            max_execution_time_secs: default_max_execution_time_secs(),
        }
    }
}

/// Result of a completed run: the final context with every slot `Done`
/// (skipped or executed).
#[derive(Debug)]
pub struct RunOutcome {
    pub context: ExecutionContext,
}

pub struct Sequencer {
    evaluator: Arc<ConditionEvaluator>,
    handlers: Arc<HandlerRegistry>,
    gate_policy: GatePolicy,
}

impl Sequencer {
    pub fn new(
        evaluator: Arc<ConditionEvaluator>,
        handlers: Arc<HandlerRegistry>,
        gate_policy: GatePolicy,
    ) -> Self {
        Sequencer {
            evaluator,
            handlers,
            gate_policy,
        }
    }

    /// Run one workflow to completion against a fresh context.
    ///
    /// A handler failure aborts the run with the failing node's path — the
    /// hard-failure outcome is distinct from the soft skip of a false gate.
    pub async fn run(
        &self,
        workflow: &WorkflowTemplate,
        mut context: ExecutionContext,
        cancel: CancellationToken,
    ) -> Result<RunOutcome, EngineError> {
        context.prepare_slots(workflow);

        for stage in &workflow.stages {
            let stage_path = NodePath::stage(workflow.semantic_id.as_str(), stage.order_index);
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled { path: stage_path });
            }

            if !self.gate(&stage.condition, &context, &stage_path)? {
                context.skip_stage(stage.order_index);
                continue;
            }
            context.open_stage(stage.order_index);

            for activity in &stage.activities {
                let path = NodePath::activity(
                    workflow.semantic_id.as_str(),
                    stage.order_index,
                    activity.order_index,
                );
                if cancel.is_cancelled() {
                    return Err(EngineError::Cancelled { path });
                }

                if !self.gate(&activity.condition, &context, &path)? {
                    context.skip_activity(stage.order_index, activity.order_index);
                    continue;
                }

                let handler = self.handlers.get(&activity.activity_type).ok_or_else(|| {
                    EngineError::HandlerNotFound {
                        activity_type: activity.activity_type.clone(),
                        path: path.clone(),
                    }
                })?;

                let output = tokio::select! {
                    _ = cancel.cancelled() => {
                        return Err(EngineError::Cancelled { path });
                    }
                    result = handler.execute(activity, &context) => {
                        result.map_err(|source| {
                            tracing::error!(path = %path, error = %source, "activity handler failed");
                            EngineError::Handler { path: path.clone(), source }
                        })?
                    }
                };

                context.complete_activity(stage.order_index, activity.order_index, output);
            }
        }

        Ok(RunOutcome { context })
    }

    fn gate(
        &self,
        expression: &str,
        context: &ExecutionContext,
        path: &NodePath,
    ) -> Result<bool, EngineError> {
        match self.evaluator.evaluate(expression, context) {
            Ok(proceed) => Ok(proceed),
            Err(source) => match self.gate_policy {
                GatePolicy::FailClosed => Err(EngineError::Gate {
                    path: path.clone(),
                    source,
                }),
                GatePolicy::FailOpen => {
                    tracing::warn!(path = %path, error = %source, "gate evaluation failed; treating condition as not met");
                    Ok(false)
                }
            },
        }
    }
}
