//! Lifecycle binding for the orchestration engine.
//!
//! The engine's own dependencies (catalogs, handler registries) are built
//! after the point where other components want a reference to the engine.
//! The binding manager decouples "the engine exists" from "its dependencies
//! exist" through one of three mutually exclusive modes, chosen once at
//! process start.

mod manager;

pub use manager::{BindingManager, EngineDeps, EngineFactory};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// When and how the engine becomes reachable by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingMode {
    /// Constructed after every other component; callers hold a settable
    /// reference that starts unbound.
    Late,
    /// Construction requested during early bootstrap and deferred until the
    /// dependency graph resolves.
    Eager,
    /// Constructed on first use, then reused (singleton-after-first-use).
    Lazy,
}

impl BindingMode {
    /// Read the process-wide mode from an environment variable, once at
    /// startup. Unset or unparsable values fall back to `Late`.
    pub fn from_env(var: &str) -> Self {
        std::env::var(var)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(BindingMode::Late)
    }
}

impl FromStr for BindingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "late" => Ok(BindingMode::Late),
            "eager" => Ok(BindingMode::Eager),
            "lazy" => Ok(BindingMode::Lazy),
            other => Err(format!("unknown binding mode: {other}")),
        }
    }
}

impl std::fmt::Display for BindingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BindingMode::Late => "late",
            BindingMode::Eager => "eager",
            BindingMode::Lazy => "lazy",
        };
        f.write_str(s)
    }
}
