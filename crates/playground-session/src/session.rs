//! Session data structure and transitions

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use playground_catalog::ExampleRef;
use playground_module::{Evaluation, EvaluationOutcome, ModuleState, ModuleStatus};

use crate::error::SessionError;
use crate::event::SessionEvent;
use crate::notice::Notice;
use crate::Result;

#[derive(Debug)]
pub struct Session {
    /// Unique identifier, used in logs
    pub id: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    program: String,
    module: ModuleState,
    examples: Vec<ExampleRef>,
    selected_example: Option<String>,
    last_result: String,
    last_output: String,
    last_run_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            program: program.into(),
            module: ModuleState::Unloaded,
            examples: Vec::new(),
            selected_example: None,
            last_result: String::new(),
            last_output: String::new(),
            last_run_at: None,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn module(&self) -> &ModuleState {
        &self.module
    }

    pub fn examples(&self) -> &[ExampleRef] {
        &self.examples
    }

    pub fn selected_example(&self) -> Option<&str> {
        self.selected_example.as_deref()
    }

    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    pub fn last_output(&self) -> &str {
        &self.last_output
    }

    pub fn last_run_at(&self) -> Option<DateTime<Utc>> {
        self.last_run_at
    }

    /// Look up a catalog entry by its file
    pub fn example(&self, file: &str) -> Result<&ExampleRef> {
        self.examples
            .iter()
            .find(|e| e.file == file)
            .ok_or_else(|| SessionError::UnknownExample(file.to_string()))
    }

    /// Claim the right to load the module.
    ///
    /// Returns `false` while a load is in flight or once the module is ready,
    /// so at most one load is ever outstanding.
    pub fn begin_module_load(&mut self) -> bool {
        match self.module.status() {
            ModuleStatus::Loading | ModuleStatus::Ready => false,
            ModuleStatus::Unloaded | ModuleStatus::Failed => {
                matches!(self.transition_module(ModuleState::Loading), Ok(true))
            }
        }
    }

    /// Apply one event. Returns the notice the user must see, if any.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Notice> {
        tracing::trace!(session_id = %self.id, event = event.name(), "Applying session event");

        match event {
            SessionEvent::ProgramEdited(program) => {
                self.program = program;
                None
            }
            SessionEvent::ModuleLoaded(module) => {
                let name = module.name().to_string();
                match self.transition_module(ModuleState::Ready(module)) {
                    Ok(true) => tracing::info!(
                        session_id = %self.id,
                        module = %name,
                        "Evaluation module ready"
                    ),
                    Ok(false) => {}
                    Err(e) => tracing::warn!(
                        session_id = %self.id,
                        error = %e,
                        "Ignoring loaded module"
                    ),
                }
                None
            }
            SessionEvent::ModuleLoadFailed(reason) => {
                match self.transition_module(ModuleState::Failed(reason.clone())) {
                    Ok(true) => tracing::error!(
                        session_id = %self.id,
                        error = %reason,
                        "Failed to load evaluation module"
                    ),
                    Ok(false) => {}
                    Err(e) => tracing::warn!(
                        session_id = %self.id,
                        error = %e,
                        reason = %reason,
                        "Ignoring module failure"
                    ),
                }
                None
            }
            SessionEvent::CatalogLoaded(examples) => {
                self.examples = examples;
                None
            }
            SessionEvent::CatalogLoadFailed(reason) => {
                tracing::error!(
                    session_id = %self.id,
                    error = %reason,
                    "Failed to load example catalog"
                );
                None
            }
            SessionEvent::ExampleLoaded { file, program } => {
                self.program = program;
                self.selected_example = Some(file);
                None
            }
            SessionEvent::DefaultExampleLoaded { file, program, base } => {
                if self.selected_example.is_none() && self.program == base {
                    self.program = program;
                    self.selected_example = Some(file);
                } else {
                    tracing::debug!(
                        session_id = %self.id,
                        file = %file,
                        "Default example superseded by user input"
                    );
                }
                None
            }
            SessionEvent::ExampleLoadFailed { file, reason } => {
                tracing::error!(
                    session_id = %self.id,
                    file = %file,
                    error = %reason,
                    "Failed to load example"
                );
                Some(Notice::example_unavailable())
            }
            SessionEvent::RunRejected => {
                tracing::warn!(
                    session_id = %self.id,
                    module = %self.module.status(),
                    "Run requested before the evaluation module was loaded"
                );
                Some(Notice::module_not_ready())
            }
            SessionEvent::RunCompleted(evaluation) => self.record_run(evaluation),
            SessionEvent::OutputCleared => {
                self.last_result.clear();
                self.last_output.clear();
                None
            }
        }
    }

    fn record_run(&mut self, evaluation: Evaluation) -> Option<Notice> {
        self.last_run_at = Some(Utc::now());

        match evaluation.outcome {
            EvaluationOutcome::Ok(value) => {
                self.last_result = value;
                if let Some(output) = evaluation.output {
                    self.last_output = output;
                }
                None
            }
            EvaluationOutcome::Err(message) => Some(Notice::evaluation_error(message)),
        }
    }

    /// Move the module to `next`. Returns whether the state actually changed.
    fn transition_module(&mut self, next: ModuleState) -> Result<bool> {
        let from = self.module.status();
        let to = next.status();

        if !from.can_transition_to(to) {
            return Err(SessionError::InvalidModuleTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        // Same-state transitions keep the existing data, in particular the handle
        if from == to {
            return Ok(false);
        }

        tracing::debug!(
            session_id = %self.id,
            from = %from,
            to = %to,
            "Module state transition"
        );

        self.module = next;
        Ok(true)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            program: self.program.clone(),
            module_status: self.module.status(),
            module_error: self.module.failure().map(str::to_string),
            examples: self.examples.clone(),
            selected_example: self.selected_example.clone(),
            last_result: self.last_result.clone(),
            last_output: self.last_output.clone(),
            last_run_at: self.last_run_at,
        }
    }
}

/// Read-only view handed to the rendering layer
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub program: String,
    pub module_status: ModuleStatus,
    pub module_error: Option<String>,
    pub examples: Vec<ExampleRef>,
    pub selected_example: Option<String>,
    pub last_result: String,
    pub last_output: String,
    pub last_run_at: Option<DateTime<Utc>>,
}
