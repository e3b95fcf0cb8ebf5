//! Module error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Evaluation module not loaded")]
    NotReady,

    #[error("Evaluator not found: {0}")]
    NotFound(String),

    #[error("Failed to load evaluation module: {0}")]
    Load(String),
}
