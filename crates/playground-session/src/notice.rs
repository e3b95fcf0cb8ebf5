//! User-visible notices
//!
//! A notice interrupts the user. It is raised only for failures of an action
//! the user just took; background failures are logged instead.

use serde::{Deserialize, Serialize};

const MODULE_NOT_READY: &str = "Evaluation module not loaded!";
const EXAMPLE_UNAVAILABLE: &str = "Cannot load example. See log for details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    ModuleNotReady,
    EvaluationError,
    ExampleUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn module_not_ready() -> Self {
        Self {
            kind: NoticeKind::ModuleNotReady,
            message: MODULE_NOT_READY.to_string(),
        }
    }

    /// The evaluator's message, untouched
    pub fn evaluation_error(message: String) -> Self {
        Self {
            kind: NoticeKind::EvaluationError,
            message,
        }
    }

    pub fn example_unavailable() -> Self {
        Self {
            kind: NoticeKind::ExampleUnavailable,
            message: EXAMPLE_UNAVAILABLE.to_string(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
