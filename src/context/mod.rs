//! Per-run execution context.
//!
//! Three independent namespaces flow through condition evaluation and
//! handler invocation: `input` (caller-supplied), `stage` (prior outputs
//! addressed positionally) and `computed` (values derived mid-run). A
//! context is created fresh per run and discarded on completion; it is
//! never persisted.
//!
//! Per-node results are a tri-state stored by position, so downstream
//! lookups never need to distinguish "not yet run" from "intentionally
//! skipped" from "missing key": a skipped slot is present with an empty
//! output map.

use serde_json::{Map, Value};

use crate::template::WorkflowTemplate;

/// State of a stage or activity slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeState {
    #[default]
    Pending,
    Skipped,
    Executed,
}

impl NodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Pending => "pending",
            NodeState::Skipped => "skipped",
            NodeState::Executed => "executed",
        }
    }

    /// A node is done once it has been either skipped or executed.
    pub fn is_done(&self) -> bool {
        !matches!(self, NodeState::Pending)
    }
}

/// Result slot for one activity. `output` stays empty for skipped slots.
#[derive(Debug, Clone, Default)]
pub struct ActivityRecord {
    pub state: NodeState,
    pub output: Map<String, Value>,
}

/// Result slot for one stage, holding its activity slots by position.
#[derive(Debug, Clone, Default)]
pub struct StageRecord {
    pub state: NodeState,
    pub activities: Vec<ActivityRecord>,
}

impl StageRecord {
    pub fn is_done(&self) -> bool {
        self.state.is_done() && self.activities.iter().all(|a| a.state.is_done())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    /// Caller-supplied parameters. `None` reads as an empty mapping.
    pub input: Option<Map<String, Value>>,
    /// Prior stage/activity outputs, addressed by position.
    pub stage: Vec<StageRecord>,
    /// Values derived mid-run by the sequencer or handlers.
    pub computed: Option<Map<String, Value>>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: Map<String, Value>) -> Self {
        ExecutionContext {
            input: Some(input),
            ..Default::default()
        }
    }

    /// Pre-size one slot per stage/activity of the template, all `Pending`.
    pub fn prepare_slots(&mut self, workflow: &WorkflowTemplate) {
        self.stage = workflow
            .stages
            .iter()
            .map(|s| StageRecord {
                state: NodeState::Pending,
                activities: vec![ActivityRecord::default(); s.activities.len()],
            })
            .collect();
    }

    pub fn stage_state(&self, stage: usize) -> Option<NodeState> {
        self.stage.get(stage).map(|s| s.state)
    }

    pub fn activity_state(&self, stage: usize, activity: usize) -> Option<NodeState> {
        self.stage
            .get(stage)
            .and_then(|s| s.activities.get(activity))
            .map(|a| a.state)
    }

    pub fn activity_output(&self, stage: usize, activity: usize) -> Option<&Map<String, Value>> {
        self.stage
            .get(stage)
            .and_then(|s| s.activities.get(activity))
            .map(|a| &a.output)
    }

    /// Mark a stage as entered; its activities become eligible.
    pub fn open_stage(&mut self, stage: usize) {
        if let Some(record) = self.stage.get_mut(stage) {
            record.state = NodeState::Executed;
        }
    }

    /// Skip a stage. The stage and all its activity slots keep their
    /// positions but produce no output.
    pub fn skip_stage(&mut self, stage: usize) {
        if let Some(record) = self.stage.get_mut(stage) {
            record.state = NodeState::Skipped;
            for activity in &mut record.activities {
                activity.state = NodeState::Skipped;
            }
        }
    }

    pub fn skip_activity(&mut self, stage: usize, activity: usize) {
        if let Some(slot) = self
            .stage
            .get_mut(stage)
            .and_then(|s| s.activities.get_mut(activity))
        {
            slot.state = NodeState::Skipped;
        }
    }

    /// Record a handler's output and mark the activity executed.
    pub fn complete_activity(
        &mut self,
        stage: usize,
        activity: usize,
        output: Map<String, Value>,
    ) {
        if let Some(slot) = self
            .stage
            .get_mut(stage)
            .and_then(|s| s.activities.get_mut(activity))
        {
            slot.state = NodeState::Executed;
            slot.output = output;
        }
    }

    pub fn set_computed(&mut self, key: impl Into<String>, value: Value) {
        self.computed
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
    }

    pub fn computed_value(&self, key: &str) -> Option<&Value> {
        self.computed.as_ref().and_then(|m| m.get(key))
    }

    pub fn input_value(&self, key: &str) -> Option<&Value> {
        self.input.as_ref().and_then(|m| m.get(key))
    }
}
