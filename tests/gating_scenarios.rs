//! End-to-end gating scenarios across the evaluator and sequencer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio_util::sync::CancellationToken;

use flowstage::{
    ActivityHandler, ActivitySpec, ActivityTemplate, ConditionEvaluator, EngineConfig,
    EvalError, ExecutionContext, HandlerError, HandlerRegistry, NodeState, StageSpec,
    TemplateCatalog, WorkflowEngine, WorkflowSpec,
};

struct EmitStatus(&'static str);

#[async_trait]
impl ActivityHandler for EmitStatus {
    async fn execute(
        &self,
        _activity: &ActivityTemplate,
        _context: &ExecutionContext,
    ) -> Result<Map<String, Value>, HandlerError> {
        let mut out = Map::new();
        out.insert("status".into(), json!(self.0));
        Ok(out)
    }
}

struct Counting(Arc<AtomicUsize>);

#[async_trait]
impl ActivityHandler for Counting {
    async fn execute(
        &self,
        _activity: &ActivityTemplate,
        _context: &ExecutionContext,
    ) -> Result<Map<String, Value>, HandlerError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(Map::new())
    }
}

fn approval_workflow() -> WorkflowSpec {
    WorkflowSpec {
        id: "approval".into(),
        name: "Approval".into(),
        business_type: "review".into(),
        version: 1,
        category: None,
        tags: vec![],
        description: String::new(),
        stages: vec![
            StageSpec {
                id: "decide".into(),
                name: "Decide".into(),
                stage_type: "auto".into(),
                condition: String::new(),
                activities: vec![ActivitySpec {
                    id: "decision".into(),
                    name: "Decision".into(),
                    activity_type: "decide".into(),
                    condition: String::new(),
                    params: Value::Null,
                }],
            },
            StageSpec {
                id: "fulfil".into(),
                name: "Fulfil".into(),
                stage_type: "auto".into(),
                condition: r#"stage[0].activity[0].output.status == "approved""#.into(),
                activities: vec![ActivitySpec {
                    id: "ship".into(),
                    name: "Ship".into(),
                    activity_type: "ship".into(),
                    condition: String::new(),
                    params: Value::Null,
                }],
            },
        ],
    }
}

fn engine_with(decision: &'static str, counter: Arc<AtomicUsize>) -> WorkflowEngine {
    let catalog =
        Arc::new(TemplateCatalog::materialize("review", &[approval_workflow()]).unwrap());
    let mut handlers = HandlerRegistry::new();
    handlers.register("decide", Box::new(EmitStatus(decision)));
    handlers.register("ship", Box::new(Counting(counter)));
    WorkflowEngine::new(catalog, Arc::new(handlers), EngineConfig::default())
}

// Scenario A: input.amount > 100 against three inputs.
#[test]
fn scenario_a_amount_threshold() {
    let evaluator = ConditionEvaluator::new();
    let expr = "input.amount > 100";

    let ctx = |v: Value| ExecutionContext::with_input(v.as_object().cloned().unwrap());
    assert!(evaluator.evaluate(expr, &ctx(json!({"amount": 150}))).unwrap());
    assert!(!evaluator.evaluate(expr, &ctx(json!({"amount": 50}))).unwrap());

    let err = evaluator.evaluate(expr, &ctx(json!({}))).unwrap_err();
    assert!(matches!(err, EvalError::Eval(_)));
}

// Scenario B: a 2-stage workflow where stage 1 is gated on stage 0's output.
#[tokio::test]
async fn scenario_b_approved_executes_stage_one() {
    let shipped = Arc::new(AtomicUsize::new(0));
    let engine = engine_with("approved", shipped.clone());

    let outcome = engine
        .run("approval", None, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(shipped.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.context.stage_state(1), Some(NodeState::Executed));
    assert_eq!(outcome.context.activity_state(1, 0), Some(NodeState::Executed));
}

#[tokio::test]
async fn scenario_b_rejected_skips_stage_one_and_completes() {
    let shipped = Arc::new(AtomicUsize::new(0));
    let engine = engine_with("rejected", shipped.clone());

    let outcome = engine
        .run("approval", None, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(shipped.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.context.stage_state(1), Some(NodeState::Skipped));
    assert_eq!(outcome.context.activity_state(1, 0), Some(NodeState::Skipped));
    // The run still completed: every slot is done.
    assert!(outcome.context.stage.iter().all(|s| s.is_done()));
}

#[test]
fn empty_expression_always_true_for_any_context() {
    let evaluator = ConditionEvaluator::new();

    let contexts = [
        ExecutionContext::new(),
        ExecutionContext::with_input(Map::new()),
        ExecutionContext::with_input(json!({"a": 1}).as_object().cloned().unwrap()),
    ];
    for ctx in &contexts {
        assert!(evaluator.evaluate("", ctx).unwrap());
    }
}

#[test]
fn repeated_evaluation_is_deterministic() {
    let evaluator = ConditionEvaluator::new();
    let ctx = ExecutionContext::with_input(json!({"amount": 150}).as_object().cloned().unwrap());
    let results: Vec<bool> = (0..50)
        .map(|_| evaluator.evaluate("input.amount > 100", &ctx).unwrap())
        .collect();
    assert!(results.iter().all(|&r| r));
}
