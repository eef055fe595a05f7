//! The orchestration engine: sequencer, handler seam, and the
//! [`WorkflowEngine`] facade that callers reach through the binding
//! manager.

pub mod handler;
pub mod sequencer;

pub use handler::{ActivityHandler, HandlerRegistry};
pub use sequencer::{EngineConfig, GatePolicy, RunOutcome, Sequencer};

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::context::ExecutionContext;
use crate::error::EngineError;
use crate::evaluator::ConditionEvaluator;
use crate::template::TemplateCatalog;

/// The orchestration engine for one business-type scope.
///
/// Holds the read-only template catalog and the handler registry; each call
/// to [`run`](Self::run) builds a fresh context, so independent runs can
/// execute concurrently against the shared catalog.
pub struct WorkflowEngine {
    catalog: Arc<TemplateCatalog>,
    sequencer: Sequencer,
    config: EngineConfig,
}

impl std::fmt::Debug for WorkflowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowEngine")
            .field("business_type", &self.catalog.business_type())
            .field("templates", &self.catalog.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WorkflowEngine {
    pub fn new(
        catalog: Arc<TemplateCatalog>,
        handlers: Arc<HandlerRegistry>,
        config: EngineConfig,
    ) -> Self {
        let sequencer = Sequencer::new(
            Arc::new(ConditionEvaluator::new()),
            handlers,
            config.gate_policy,
        );
        WorkflowEngine {
            catalog,
            sequencer,
            config,
        }
    }

    pub fn catalog(&self) -> &Arc<TemplateCatalog> {
        &self.catalog
    }

    /// Run the workflow with the given semantic id to completion.
    pub async fn run(
        &self,
        semantic_id: &str,
        input: Option<Map<String, Value>>,
        cancel: CancellationToken,
    ) -> Result<RunOutcome, EngineError> {
        let template = self
            .catalog
            .get(semantic_id)
            .ok_or_else(|| EngineError::TemplateNotFound(semantic_id.to_string()))?;

        let context = ExecutionContext {
            input,
            ..Default::default()
        };

        let run = self.sequencer.run(&template, context, cancel);
        match self.config.max_execution_time_secs {
            0 => run.await,
            secs => tokio::time::timeout(Duration::from_secs(secs), run)
                .await
                .map_err(|_| EngineError::DeadlineExceeded)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::template::{ActivitySpec, ActivityTemplate, StageSpec, WorkflowSpec};
    use async_trait::async_trait;
    use serde_json::json;

    struct RecordInput;

    #[async_trait]
    impl ActivityHandler for RecordInput {
        async fn execute(
            &self,
            _activity: &ActivityTemplate,
            context: &ExecutionContext,
        ) -> Result<Map<String, Value>, HandlerError> {
            let mut out = Map::new();
            out.insert(
                "seen_amount".into(),
                context.input_value("amount").cloned().unwrap_or(Value::Null),
            );
            Ok(out)
        }
    }

    fn catalog() -> Arc<TemplateCatalog> {
        let spec = WorkflowSpec {
            id: "order-flow".into(),
            name: "Order flow".into(),
            business_type: "order".into(),
            version: 1,
            category: None,
            tags: vec![],
            description: String::new(),
            stages: vec![StageSpec {
                id: "s0".into(),
                name: "s0".into(),
                stage_type: "default".into(),
                condition: String::new(),
                activities: vec![ActivitySpec {
                    id: "a0".into(),
                    name: "a0".into(),
                    activity_type: "record".into(),
                    condition: String::new(),
                    params: Value::Null,
                }],
            }],
        };
        Arc::new(TemplateCatalog::materialize("order", &[spec]).unwrap())
    }

    fn engine() -> WorkflowEngine {
        let mut handlers = HandlerRegistry::new();
        handlers.register("record", Box::new(RecordInput));
        WorkflowEngine::new(catalog(), Arc::new(handlers), EngineConfig::default())
    }

    #[tokio::test]
    async fn test_run_by_semantic_id() {
        let engine = engine();
        let input = json!({"amount": 150}).as_object().cloned();
        let outcome = engine
            .run("order-flow", input, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(
            outcome.context.activity_output(0, 0).unwrap().get("seen_amount"),
            Some(&json!(150))
        );
    }

    #[tokio::test]
    async fn test_unknown_template() {
        let engine = engine();
        let err = engine
            .run("missing", None, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::TemplateNotFound(_)));
    }

    struct StallHandler;

    #[async_trait]
    impl ActivityHandler for StallHandler {
        async fn execute(
            &self,
            _activity: &ActivityTemplate,
            _context: &ExecutionContext,
        ) -> Result<Map<String, Value>, HandlerError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Map::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_deadline_exceeded() {
        let mut handlers = HandlerRegistry::new();
        handlers.register("record", Box::new(StallHandler));
        let config = EngineConfig {
            max_execution_time_secs: 1,
            ..Default::default()
        };
        let engine = WorkflowEngine::new(catalog(), Arc::new(handlers), config);

        let err = engine
            .run("order-flow", None, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_limit_disables_deadline() {
        struct ShortSleep;

        #[async_trait]
        impl ActivityHandler for ShortSleep {
            async fn execute(
                &self,
                _activity: &ActivityTemplate,
                _context: &ExecutionContext,
            ) -> Result<Map<String, Value>, HandlerError> {
                tokio::time::sleep(Duration::from_secs(7200)).await;
                Ok(Map::new())
            }
        }

        let mut handlers = HandlerRegistry::new();
        handlers.register("record", Box::new(ShortSleep));
        let config = EngineConfig {
            max_execution_time_secs: 0,
            ..Default::default()
        };
        let engine = WorkflowEngine::new(catalog(), Arc::new(handlers), config);

        // With the limit disabled the run outlives any would-be default
        // deadline and still completes.
        let outcome = engine
            .run("order-flow", None, CancellationToken::new())
            .await
            .unwrap();
        assert!(outcome.context.stage.iter().all(|s| s.is_done()));
    }

    #[test]
    fn test_engine_debug_is_summary_not_internals() {
        let engine = engine();
        let rendered = format!("{engine:?}");
        assert!(rendered.contains("WorkflowEngine"));
        assert!(rendered.contains("order"));
    }

    #[tokio::test]
    async fn test_concurrent_runs_share_catalog() {
        let engine = Arc::new(engine());
        let mut tasks = Vec::new();
        for i in 0..8 {
            let engine = engine.clone();
            tasks.push(tokio::spawn(async move {
                let input = json!({ "amount": i }).as_object().cloned();
                engine
                    .run("order-flow", input, CancellationToken::new())
                    .await
            }));
        }
        for (i, task) in tasks.into_iter().enumerate() {
            let outcome = task.await.unwrap().unwrap();
            assert_eq!(
                outcome.context.activity_output(0, 0).unwrap().get("seen_amount"),
                Some(&json!(i))
            );
        }
    }
}
