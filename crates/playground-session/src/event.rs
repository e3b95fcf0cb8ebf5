//! Events that drive session transitions

use std::sync::Arc;

use playground_catalog::ExampleRef;
use playground_module::{Evaluation, EvaluationModule};

pub enum SessionEvent {
    /// The editor contents changed
    ProgramEdited(String),
    ModuleLoaded(Arc<dyn EvaluationModule>),
    ModuleLoadFailed(String),
    CatalogLoaded(Vec<ExampleRef>),
    CatalogLoadFailed(String),
    ExampleLoaded {
        file: String,
        program: String,
    },
    /// The first catalog entry arrived. `base` is the program the fetch
    /// started from; the example only lands if nothing replaced it meanwhile.
    DefaultExampleLoaded {
        file: String,
        program: String,
        base: String,
    },
    ExampleLoadFailed {
        file: String,
        reason: String,
    },
    /// A run was requested while no module was loaded
    RunRejected,
    RunCompleted(Evaluation),
    /// Reset the result and output fields
    OutputCleared,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::ProgramEdited(_) => "program_edited",
            SessionEvent::ModuleLoaded(_) => "module_loaded",
            SessionEvent::ModuleLoadFailed(_) => "module_load_failed",
            SessionEvent::CatalogLoaded(_) => "catalog_loaded",
            SessionEvent::CatalogLoadFailed(_) => "catalog_load_failed",
            SessionEvent::ExampleLoaded { .. } => "example_loaded",
            SessionEvent::DefaultExampleLoaded { .. } => "default_example_loaded",
            SessionEvent::ExampleLoadFailed { .. } => "example_load_failed",
            SessionEvent::RunRejected => "run_rejected",
            SessionEvent::RunCompleted(_) => "run_completed",
            SessionEvent::OutputCleared => "output_cleared",
        }
    }
}
