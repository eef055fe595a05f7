//! Authored template forms.
//!
//! These are the serde-facing structs a template author writes (JSON/YAML).
//! Authors never supply order indices; position in the authored lists is the
//! order of record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An authored workflow definition, scoped to one business type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSpec {
    /// Semantic id, stable across versions.
    pub id: String,
    pub name: String,
    /// Owning business-type tag; materialization is scoped by this.
    pub business_type: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stages: Vec<StageSpec>,
}

fn default_version() -> u32 {
    1
}

/// An authored stage. An empty `condition` means unconditional entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSpec {
    pub id: String,
    pub name: String,
    pub stage_type: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub activities: Vec<ActivitySpec>,
}

/// An authored activity. `params` is an opaque payload handed to the
/// external handler untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySpec {
    pub id: String,
    pub name: String,
    pub activity_type: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub params: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workflow_spec_defaults() {
        let spec: WorkflowSpec = serde_json::from_value(json!({
            "id": "order-flow",
            "name": "Order flow",
            "business_type": "order",
            "stages": [
                {
                    "id": "intake",
                    "name": "Intake",
                    "stage_type": "manual",
                    "activities": [
                        { "id": "validate", "name": "Validate", "activity_type": "script" }
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(spec.version, 1);
        assert!(spec.tags.is_empty());
        assert!(spec.category.is_none());
        assert_eq!(spec.stages.len(), 1);
        assert!(spec.stages[0].condition.is_empty());
        assert_eq!(spec.stages[0].activities[0].params, Value::Null);
    }

    #[test]
    fn test_workflow_spec_roundtrip() {
        let spec = WorkflowSpec {
            id: "kyc".into(),
            name: "KYC".into(),
            business_type: "onboarding".into(),
            version: 3,
            category: Some("compliance".into()),
            tags: vec!["kyc".into()],
            description: "Know your customer".into(),
            stages: vec![],
        };
        let round: WorkflowSpec =
            serde_json::from_value(serde_json::to_value(&spec).unwrap()).unwrap();
        assert_eq!(round.id, "kyc");
        assert_eq!(round.version, 3);
    }
}
