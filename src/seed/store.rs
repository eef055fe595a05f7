use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;

use crate::template::WorkflowTemplate;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store conflict: {0}")]
    Conflict(String),
    #[error("store failure: {0}")]
    Backend(String),
}

/// Persistence seam for materialized templates. A workflow and its full
/// stage/activity subtree persist atomically as one record-set.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn insert(&self, template: &WorkflowTemplate) -> Result<(), StoreError>;
    /// Delete every template in a business-type scope, returning the count.
    async fn delete_scope(&self, business_type: &str) -> Result<usize, StoreError>;
    async fn list_scope(&self, business_type: &str) -> Result<Vec<WorkflowTemplate>, StoreError>;
}

/// In-memory store, used in tests and as the mock backend.
#[derive(Default)]
pub struct MemoryTemplateStore {
    records: RwLock<Vec<WorkflowTemplate>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn insert(&self, template: &WorkflowTemplate) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let duplicate = records.iter().any(|r| {
            r.business_type == template.business_type
                && r.semantic_id == template.semantic_id
                && r.version == template.version
        });
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "template '{}' v{} already exists in scope '{}'",
                template.semantic_id, template.version, template.business_type
            )));
        }
        records.push(template.clone());
        Ok(())
    }

    async fn delete_scope(&self, business_type: &str) -> Result<usize, StoreError> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.business_type != business_type);
        Ok(before - records.len())
    }

    async fn list_scope(&self, business_type: &str) -> Result<Vec<WorkflowTemplate>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.business_type == business_type)
            .cloned()
            .collect())
    }
}
