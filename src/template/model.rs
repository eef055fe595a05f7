//! Materialized templates.
//!
//! Conversion from the authored form assigns each stage and activity its
//! zero-based `order_index` from slice position, so the same authored order
//! always yields the same indices and positional condition expressions stay
//! meaningful. Every materialized record carries two identities that must
//! never be conflated: the author's `semantic_id` (stable across versions)
//! and a generated `record_id` (assigned once per materialization).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::schema::{ActivitySpec, StageSpec, WorkflowSpec};
use crate::error::ConversionError;

/// A materialized workflow with its full stage/activity subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub record_id: Uuid,
    pub semantic_id: String,
    pub name: String,
    pub business_type: String,
    pub version: u32,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub stages: Vec<StageTemplate>,
    pub materialized_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTemplate {
    pub record_id: Uuid,
    pub semantic_id: String,
    pub name: String,
    pub stage_type: String,
    /// Zero-based position among sibling stages, derived from authoring order.
    pub order_index: usize,
    pub condition: String,
    pub activities: Vec<ActivityTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub record_id: Uuid,
    pub semantic_id: String,
    pub name: String,
    pub activity_type: String,
    /// Zero-based position among sibling activities.
    pub order_index: usize,
    pub condition: String,
    pub params: Value,
}

impl WorkflowTemplate {
    /// Materialize an authored spec, assigning order indices and storage ids.
    pub fn from_spec(spec: &WorkflowSpec) -> Result<Self, ConversionError> {
        if spec.id.trim().is_empty() {
            return Err(ConversionError::EmptyId {
                path: "workflow".into(),
            });
        }

        let mut stage_ids = HashSet::new();
        let mut stages = Vec::with_capacity(spec.stages.len());
        for (index, stage) in spec.stages.iter().enumerate() {
            if !stage_ids.insert(stage.id.clone()) {
                return Err(ConversionError::DuplicateId {
                    path: format!("{}/stage[{}]", spec.id, index),
                    id: stage.id.clone(),
                });
            }
            stages.push(convert_stage(&spec.id, stage, index)?);
        }

        Ok(WorkflowTemplate {
            record_id: Uuid::new_v4(),
            semantic_id: spec.id.clone(),
            name: spec.name.clone(),
            business_type: spec.business_type.clone(),
            version: spec.version,
            category: spec.category.clone(),
            tags: spec.tags.clone(),
            description: spec.description.clone(),
            stages,
            materialized_at: Utc::now(),
        })
    }
}

fn convert_stage(
    workflow_id: &str,
    spec: &StageSpec,
    order_index: usize,
) -> Result<StageTemplate, ConversionError> {
    let path = format!("{}/stage[{}]", workflow_id, order_index);
    if spec.id.trim().is_empty() {
        return Err(ConversionError::EmptyId { path });
    }
    if spec.stage_type.trim().is_empty() {
        return Err(ConversionError::EmptyTypeTag { path });
    }

    let mut activity_ids = HashSet::new();
    let mut activities = Vec::with_capacity(spec.activities.len());
    for (index, activity) in spec.activities.iter().enumerate() {
        if !activity_ids.insert(activity.id.clone()) {
            return Err(ConversionError::DuplicateId {
                path: format!("{}/activity[{}]", path, index),
                id: activity.id.clone(),
            });
        }
        activities.push(convert_activity(&path, activity, index)?);
    }

    Ok(StageTemplate {
        record_id: Uuid::new_v4(),
        semantic_id: spec.id.clone(),
        name: spec.name.clone(),
        stage_type: spec.stage_type.clone(),
        order_index,
        condition: spec.condition.clone(),
        activities,
    })
}

fn convert_activity(
    stage_path: &str,
    spec: &ActivitySpec,
    order_index: usize,
) -> Result<ActivityTemplate, ConversionError> {
    let path = format!("{}/activity[{}]", stage_path, order_index);
    if spec.id.trim().is_empty() {
        return Err(ConversionError::EmptyId { path });
    }
    if spec.activity_type.trim().is_empty() {
        return Err(ConversionError::EmptyTypeTag { path });
    }

    Ok(ActivityTemplate {
        record_id: Uuid::new_v4(),
        semantic_id: spec.id.clone(),
        name: spec.name.clone(),
        activity_type: spec.activity_type.clone(),
        order_index,
        condition: spec.condition.clone(),
        params: spec.params.clone(),
    })
}
