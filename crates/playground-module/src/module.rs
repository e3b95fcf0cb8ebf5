//! Boundary traits for the external evaluator

use futures_util::future::BoxFuture;
use std::sync::Arc;

use crate::outcome::Evaluation;
use crate::Result;

/// A loaded evaluation module.
///
/// `invoke` never fails at this boundary: anything that goes wrong inside the
/// module is reported as an `Err` outcome so it can be shown to the user.
pub trait EvaluationModule: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    fn invoke<'a>(&'a self, program: &'a str) -> BoxFuture<'a, Evaluation>;
}

/// Acquires an evaluation module. Loading may suspend on I/O.
pub trait ModuleLoader: Send + Sync {
    fn load(&self) -> BoxFuture<'_, Result<Arc<dyn EvaluationModule>>>;
}
