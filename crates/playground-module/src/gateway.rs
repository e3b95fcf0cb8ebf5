//! Module gateway

use std::sync::Arc;

use crate::error::ModuleError;
use crate::module::{EvaluationModule, ModuleLoader};
use crate::outcome::Evaluation;
use crate::state::ModuleState;
use crate::Result;

/// Uniform entry point over whatever evaluator the loader provides.
///
/// The gateway does not own the load state; the session does. Callers pass a
/// snapshot of it to `invoke` so no lock is held while the module runs.
#[derive(Clone)]
pub struct ModuleGateway {
    loader: Arc<dyn ModuleLoader>,
}

impl ModuleGateway {
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self { loader }
    }

    /// Acquire the module through the configured loader
    pub async fn load(&self) -> Result<Arc<dyn EvaluationModule>> {
        tracing::debug!("Loading evaluation module");

        let module = self.loader.load().await?;

        tracing::info!(module = %module.name(), "Evaluation module loaded");

        Ok(module)
    }

    /// Run `program` on the loaded module and hand back its outcome unchanged
    pub async fn invoke(&self, state: &ModuleState, program: &str) -> Result<Evaluation> {
        let module = state.handle().ok_or(ModuleError::NotReady)?;

        tracing::debug!(
            module = %module.name(),
            program_len = program.len(),
            "Invoking evaluation module"
        );

        Ok(module.invoke(program).await)
    }
}
