//! The workflow template model.
//!
//! Templates form a strictly three-level hierarchy: Workflow → Stage →
//! Activity. Authored forms ([`schema`]) carry no order indices; those are
//! assigned deterministically from authoring order when the spec is
//! materialized into the runtime [`model`]. Materialized templates are
//! immutable and shared read-only across concurrent runs via the
//! [`catalog`].

pub mod catalog;
pub mod model;
pub mod schema;

pub use catalog::TemplateCatalog;
pub use model::{ActivityTemplate, StageTemplate, WorkflowTemplate};
pub use schema::{ActivitySpec, StageSpec, WorkflowSpec};
