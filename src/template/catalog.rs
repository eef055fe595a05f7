//! Business-type-scoped catalog of materialized templates.
//!
//! The catalog is built once at bootstrap and shared read-only across
//! concurrent runs (`Arc` per template). A catalog for business type `B`
//! holds only templates tagged `B`, each with its full stage/activity
//! subtree.

use std::collections::HashMap;
use std::sync::Arc;

use super::model::WorkflowTemplate;
use super::schema::WorkflowSpec;
use crate::error::ConversionError;

pub struct TemplateCatalog {
    business_type: String,
    templates: Vec<Arc<WorkflowTemplate>>,
    by_semantic_id: HashMap<String, usize>,
}

impl TemplateCatalog {
    /// Materialize all specs tagged with `business_type` into one catalog.
    ///
    /// Specs for other business types are ignored. The whole scope converts
    /// atomically: any conversion failure rejects the catalog.
    pub fn materialize(
        business_type: &str,
        specs: &[WorkflowSpec],
    ) -> Result<Self, ConversionError> {
        let mut templates = Vec::new();
        let mut by_semantic_id = HashMap::new();
        for spec in specs.iter().filter(|s| s.business_type == business_type) {
            let template = WorkflowTemplate::from_spec(spec)?;
            by_semantic_id.insert(template.semantic_id.clone(), templates.len());
            templates.push(Arc::new(template));
        }
        Ok(TemplateCatalog {
            business_type: business_type.to_string(),
            templates,
            by_semantic_id,
        })
    }

    /// Build a catalog from already-materialized templates (e.g. loaded from
    /// a store). Templates outside the scope are dropped.
    pub fn from_templates(business_type: &str, templates: Vec<WorkflowTemplate>) -> Self {
        let mut kept = Vec::new();
        let mut by_semantic_id = HashMap::new();
        for template in templates {
            if template.business_type != business_type {
                continue;
            }
            by_semantic_id.insert(template.semantic_id.clone(), kept.len());
            kept.push(Arc::new(template));
        }
        TemplateCatalog {
            business_type: business_type.to_string(),
            templates: kept,
            by_semantic_id,
        }
    }

    pub fn business_type(&self) -> &str {
        &self.business_type
    }

    pub fn get(&self, semantic_id: &str) -> Option<Arc<WorkflowTemplate>> {
        self.by_semantic_id
            .get(semantic_id)
            .map(|&i| self.templates[i].clone())
    }

    /// All templates in the scope, in materialization order.
    pub fn list(&self) -> &[Arc<WorkflowTemplate>] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
