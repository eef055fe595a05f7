//! The binding manager.
//!
//! One mutable piece of shared state exists in the whole core: whether the
//! engine slot has been resolved. A single mutex guards the resolved slot
//! together with the eager-mode pending queue (check-and-set, no scattered
//! nil checks); lazy mode goes through an async once-cell so N concurrent
//! first callers produce exactly one construction.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use super::BindingMode;
use crate::engine::{EngineConfig, HandlerRegistry, WorkflowEngine};
use crate::error::BindingError;
use crate::template::TemplateCatalog;

/// The dependency graph the engine needs for construction. In eager mode it
/// becomes available only after bootstrap has built the rest of the system.
pub struct EngineDeps {
    pub catalog: Arc<TemplateCatalog>,
    pub handlers: Arc<HandlerRegistry>,
    pub config: EngineConfig,
}

impl EngineDeps {
    fn build(&self) -> Arc<WorkflowEngine> {
        Arc::new(WorkflowEngine::new(
            self.catalog.clone(),
            self.handlers.clone(),
            self.config.clone(),
        ))
    }
}

/// Custom constructor for deferred (eager-mode) requests.
pub type EngineFactory = Box<dyn Fn(&EngineDeps) -> Arc<WorkflowEngine> + Send + Sync>;

struct PendingRequest {
    slot: String,
    factory: Option<EngineFactory>,
}

#[derive(Default)]
struct SlotState {
    engine: Option<Arc<WorkflowEngine>>,
    pending: Vec<PendingRequest>,
}

pub struct BindingManager {
    mode: BindingMode,
    slot: Mutex<SlotState>,
    once: OnceCell<Arc<WorkflowEngine>>,
}

impl BindingManager {
    pub fn new(mode: BindingMode) -> Self {
        BindingManager {
            mode,
            slot: Mutex::new(SlotState::default()),
            once: OnceCell::new(),
        }
    }

    pub fn mode(&self) -> BindingMode {
        self.mode
    }

    fn require_mode(&self, expected: BindingMode) -> Result<(), BindingError> {
        if self.mode != expected {
            return Err(BindingError::ModeMismatch {
                expected,
                actual: self.mode,
            });
        }
        Ok(())
    }

    /// Late mode: bind the fully-constructed engine once bootstrap is done.
    pub fn bind(&self, engine: Arc<WorkflowEngine>) -> Result<(), BindingError> {
        self.require_mode(BindingMode::Late)?;
        let mut slot = self.slot.lock();
        if slot.engine.is_some() {
            return Err(BindingError::AlreadyBound);
        }
        slot.engine = Some(engine);
        Ok(())
    }

    /// Eager mode: record a construction request before the dependency graph
    /// exists. Duplicate requests for the same slot key collapse; a request
    /// arriving after resolution is already satisfied.
    pub fn request(
        &self,
        slot_key: &str,
        factory: Option<EngineFactory>,
    ) -> Result<(), BindingError> {
        self.require_mode(BindingMode::Eager)?;
        let mut slot = self.slot.lock();
        if slot.engine.is_some() {
            return Ok(());
        }
        if slot.pending.iter().any(|p| p.slot == slot_key) {
            return Ok(());
        }
        slot.pending.push(PendingRequest {
            slot: slot_key.to_string(),
            factory,
        });
        Ok(())
    }

    /// Eager mode: the dependency graph is now available — drain the pending
    /// queue and construct exactly once. Racing resolvers all observe the
    /// single constructed instance.
    pub fn resolve(&self, deps: &EngineDeps) -> Result<Arc<WorkflowEngine>, BindingError> {
        self.require_mode(BindingMode::Eager)?;
        let mut slot = self.slot.lock();
        if let Some(engine) = &slot.engine {
            return Ok(engine.clone());
        }
        let mut pending = std::mem::take(&mut slot.pending);
        if pending.is_empty() {
            return Err(BindingError::NothingPending);
        }
        let engine = match pending.iter_mut().find_map(|p| p.factory.take()) {
            Some(factory) => factory(deps),
            None => deps.build(),
        };
        slot.engine = Some(engine.clone());
        Ok(engine)
    }

    /// The bound engine, or [`BindingError::NotReady`] if binding has not
    /// happened yet. Never blocks.
    pub fn engine(&self) -> Result<Arc<WorkflowEngine>, BindingError> {
        if self.mode == BindingMode::Lazy {
            return self.once.get().cloned().ok_or(BindingError::NotReady);
        }
        self.slot.lock().engine.clone().ok_or(BindingError::NotReady)
    }

    /// Lazy mode: construct on first use, then reuse. Concurrent first
    /// callers are serialized by the once-cell; exactly one `init` runs.
    pub async fn engine_or_init<F, Fut>(
        &self,
        init: F,
    ) -> Result<Arc<WorkflowEngine>, BindingError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Arc<WorkflowEngine>>,
    {
        self.require_mode(BindingMode::Lazy)?;
        Ok(self.once.get_or_init(init).await.clone())
    }
}
