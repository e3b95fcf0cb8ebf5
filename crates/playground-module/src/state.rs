//! Module Load State Machine
//!
//! ```text
//! Unloaded
//!   ↓ load requested
//! Loading ──→ Failed
//!   ↓          ↓ load requested again
//! Ready      Loading
//! ```
//!
//! `Ready` is terminal: a loaded module is never dropped for the lifetime of
//! the session.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::module::EvaluationModule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    /// No load has been requested yet
    Unloaded,
    /// A load is in flight
    Loading,
    /// The module can be invoked
    Ready,
    /// The last load failed
    Failed,
}

impl ModuleStatus {
    /// Check if transition to another status is valid
    pub fn can_transition_to(&self, target: ModuleStatus) -> bool {
        match (self, target) {
            (ModuleStatus::Unloaded, ModuleStatus::Loading) => true,
            (ModuleStatus::Loading, ModuleStatus::Ready) => true,
            (ModuleStatus::Loading, ModuleStatus::Failed) => true,
            // The user may ask for another attempt after a failure
            (ModuleStatus::Failed, ModuleStatus::Loading) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleStatus::Unloaded => "unloaded",
            ModuleStatus::Loading => "loading",
            ModuleStatus::Ready => "ready",
            ModuleStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Load state together with the data each state carries
#[derive(Clone, Default)]
pub enum ModuleState {
    #[default]
    Unloaded,
    Loading,
    Ready(Arc<dyn EvaluationModule>),
    Failed(String),
}

impl ModuleState {
    pub fn status(&self) -> ModuleStatus {
        match self {
            ModuleState::Unloaded => ModuleStatus::Unloaded,
            ModuleState::Loading => ModuleStatus::Loading,
            ModuleState::Ready(_) => ModuleStatus::Ready,
            ModuleState::Failed(_) => ModuleStatus::Failed,
        }
    }

    pub fn handle(&self) -> Option<&Arc<dyn EvaluationModule>> {
        match self {
            ModuleState::Ready(module) => Some(module),
            _ => None,
        }
    }

    /// Reason of the last failed load, if any
    pub fn failure(&self) -> Option<&str> {
        match self {
            ModuleState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ModuleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleState::Unloaded => write!(f, "Unloaded"),
            ModuleState::Loading => write!(f, "Loading"),
            ModuleState::Ready(module) => f.debug_tuple("Ready").field(&module.name()).finish(),
            ModuleState::Failed(reason) => f.debug_tuple("Failed").field(reason).finish(),
        }
    }
}
