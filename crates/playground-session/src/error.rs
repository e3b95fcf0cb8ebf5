//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Example not in catalog: {0}")]
    UnknownExample(String),

    #[error("Invalid module state transition: {from} -> {to}")]
    InvalidModuleTransition { from: String, to: String },
}
