//! Activity handler seam.
//!
//! Handlers are the external collaborators that actually do the work of an
//! activity. The sequencer looks them up by the activity-type tag and hands
//! them the activity's opaque params plus the current context; the returned
//! output map is merged into the context at the activity's position.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::context::ExecutionContext;
use crate::error::HandlerError;
use crate::template::ActivityTemplate;

#[async_trait]
pub trait ActivityHandler: Send + Sync {
    async fn execute(
        &self,
        activity: &ActivityTemplate,
        context: &ExecutionContext,
    ) -> Result<Map<String, Value>, HandlerError>;
}

/// Registry of activity handlers keyed by activity-type tag.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn ActivityHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, activity_type: &str, handler: Box<dyn ActivityHandler>) {
        self.handlers.insert(activity_type.to_string(), handler);
    }

    pub fn get(&self, activity_type: &str) -> Option<&dyn ActivityHandler> {
        self.handlers.get(activity_type).map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
