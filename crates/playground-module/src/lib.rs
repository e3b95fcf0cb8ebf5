//! Rufus Playground Evaluation Module Gateway
//!
//! The interpreter lives outside the playground. This crate only knows how to
//! obtain a handle to it and how to submit a program:
//! - `ModuleLoader` acquires the module asynchronously
//! - `ModuleState` tracks the load lifecycle (`Ready` is terminal)
//! - `ModuleGateway` refuses to invoke anything that is not `Ready`

mod command;
mod error;
mod gateway;
mod module;
mod outcome;
mod state;

pub use command::{CommandModule, CommandModuleLoader};
pub use error::ModuleError;
pub use gateway::ModuleGateway;
pub use module::{EvaluationModule, ModuleLoader};
pub use outcome::{Evaluation, EvaluationOutcome, OutcomeStatus};
pub use state::{ModuleState, ModuleStatus};

pub type Result<T> = std::result::Result<T, ModuleError>;
