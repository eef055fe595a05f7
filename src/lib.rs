//! # Flowstage — Workflow Template Orchestration Core
//!
//! `flowstage` models multi-stage business processes as an immutable,
//! ordered Workflow → Stage → Activity template hierarchy and drives their
//! execution:
//!
//! - **Condition gating**: stages and activities carry boolean expressions
//!   (compiled and evaluated with `rhai`) over a three-namespace context
//!   (`input` / `stage` / `computed`); an empty expression is always true.
//! - **Ordered sequencing**: strict in-order traversal per run; false gates
//!   skip a node while keeping its positional slot addressable downstream.
//! - **Lifecycle binding**: late / eager / lazy strategies govern when the
//!   engine becomes reachable, with exactly-once construction under
//!   concurrent first use.
//! - **Seeding**: batch materialization of authored templates into a store,
//!   with partial-success semantics and per-template error reporting.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use flowstage::{
//!     EngineConfig, HandlerRegistry, TemplateCatalog, WorkflowEngine, WorkflowSpec,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let specs: Vec<WorkflowSpec> =
//!         serde_json::from_str(&std::fs::read_to_string("templates.json").unwrap()).unwrap();
//!     let catalog = Arc::new(TemplateCatalog::materialize("order", &specs).unwrap());
//!     let engine = WorkflowEngine::new(
//!         catalog,
//!         Arc::new(HandlerRegistry::new()),
//!         EngineConfig::default(),
//!     );
//!     let outcome = engine
//!         .run("order-flow", None, CancellationToken::new())
//!         .await
//!         .unwrap();
//!     println!("{:?}", outcome.context.stage);
//! }
//! ```

pub mod binding;
pub mod context;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod seed;
pub mod template;

pub use crate::binding::{BindingManager, BindingMode, EngineDeps, EngineFactory};
pub use crate::context::{ActivityRecord, ExecutionContext, NodeState, StageRecord};
pub use crate::engine::{
    ActivityHandler, EngineConfig, GatePolicy, HandlerRegistry, RunOutcome, Sequencer,
    WorkflowEngine,
};
pub use crate::error::{
    BindingError, ConversionError, EngineError, EvalError, HandlerError, NodePath,
};
pub use crate::evaluator::ConditionEvaluator;
pub use crate::seed::{
    seed, MemoryTemplateStore, SeedOptions, SeedReport, StoreError, TemplateStore,
};
pub use crate::template::{
    ActivitySpec, ActivityTemplate, StageSpec, StageTemplate, TemplateCatalog, WorkflowSpec,
    WorkflowTemplate,
};
