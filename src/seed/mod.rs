//! Template materialization and seeding.
//!
//! The seeding entry point is consumed by an external command-line tool: it
//! takes a business-type scope and authored specs, materializes them, and
//! persists the records through a [`TemplateStore`]. Templates are processed
//! independently — one failure is recorded and the batch continues.

mod materializer;
mod store;

pub use materializer::{seed, SeedOptions, SeedReport};
pub use store::{MemoryTemplateStore, StoreError, TemplateStore};
