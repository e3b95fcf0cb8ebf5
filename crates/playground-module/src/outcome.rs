//! Evaluation outcome
//!
//! The module reports exactly one of two tags per invocation. The set of tags
//! is closed; callers match on it without a wildcard arm.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Ok,
    Err,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Ok => "ok",
            OutcomeStatus::Err => "err",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value")]
pub enum EvaluationOutcome {
    /// Rendered value of the program
    Ok(String),
    /// Error message, displayed verbatim
    Err(String),
}

impl EvaluationOutcome {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            EvaluationOutcome::Ok(_) => OutcomeStatus::Ok,
            EvaluationOutcome::Err(_) => OutcomeStatus::Err,
        }
    }

    /// The payload of either tag
    pub fn value(&self) -> &str {
        match self {
            EvaluationOutcome::Ok(value) => value,
            EvaluationOutcome::Err(message) => message,
        }
    }
}

/// Result of one invocation: the tagged outcome plus the optional
/// secondary output stream some evaluators produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub outcome: EvaluationOutcome,
    pub output: Option<String>,
}

impl Evaluation {
    pub fn ok(value: impl Into<String>) -> Self {
        Self {
            outcome: EvaluationOutcome::Ok(value.into()),
            output: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            outcome: EvaluationOutcome::Err(message.into()),
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}
