//! Playground run controller
//!
//! Owns the session and performs the I/O around it: module loading, catalog
//! and example fetches, evaluation runs. Every completion is turned into a
//! `SessionEvent` and applied under a short write lock that is never held
//! across an `.await`.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

use playground_catalog::{CatalogLoader, ExampleRef};
use playground_module::{CommandModuleLoader, ModuleGateway};
use playground_session::{Notice, Session, SessionEvent, SessionSnapshot};

use crate::config::Config;
use crate::Result;

#[derive(Clone)]
pub struct Playground {
    session: Arc<RwLock<Session>>,
    gateway: ModuleGateway,
    catalog: CatalogLoader,
    /// Held for the duration of a run; runs never overlap
    run_lock: Arc<Mutex<()>>,
}

impl Playground {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let loader = CommandModuleLoader::new(
            config.module.command.clone(),
            config.module.args.clone(),
        );
        let catalog = CatalogLoader::from_root(&config.examples_root)?;

        Ok(Self::with_parts(
            Session::new(config.default_program.clone()),
            ModuleGateway::new(Arc::new(loader)),
            catalog,
        ))
    }

    pub fn with_parts(session: Session, gateway: ModuleGateway, catalog: CatalogLoader) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            gateway,
            catalog,
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn session_id(&self) -> String {
        self.session.read().id.clone()
    }

    pub fn with_session<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Session) -> T,
    {
        f(&self.session.read())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.read().snapshot()
    }

    fn apply(&self, event: SessionEvent) -> Option<Notice> {
        self.session.write().apply(event)
    }

    /// Load the catalog and the module side by side.
    ///
    /// The only notice this can produce comes from the automatic load of the
    /// first example.
    pub async fn start(&self) -> Option<Notice> {
        tracing::info!(
            session_id = %self.session_id(),
            examples_root = %self.catalog.root(),
            "Starting playground session"
        );

        let (notice, ()) = tokio::join!(self.load_catalog(), self.load_module());
        notice
    }

    /// Load the evaluation module unless it is loading or loaded already
    pub async fn load_module(&self) {
        if !self.session.write().begin_module_load() {
            tracing::debug!("Evaluation module already loading or loaded");
            return;
        }

        let event = match self.gateway.load().await {
            Ok(module) => SessionEvent::ModuleLoaded(module),
            Err(e) => SessionEvent::ModuleLoadFailed(e.to_string()),
        };
        self.apply(event);
    }

    /// Fetch the manifest; on success preselect the first example
    pub async fn load_catalog(&self) -> Option<Notice> {
        match self.catalog.load_catalog().await {
            Ok(examples) => {
                let first = examples.first().cloned();
                self.apply(SessionEvent::CatalogLoaded(examples));

                match first {
                    Some(example) => self.load_default_example(&example).await,
                    None => None,
                }
            }
            Err(e) => self.apply(SessionEvent::CatalogLoadFailed(e.to_string())),
        }
    }

    /// Fill the editor with `example` unless the user has replaced the
    /// program or picked an example while it was fetched
    async fn load_default_example(&self, example: &ExampleRef) -> Option<Notice> {
        let base = self.session.read().program().to_string();

        let event = match self.catalog.load_example(example).await {
            Ok(program) => SessionEvent::DefaultExampleLoaded {
                file: example.file.clone(),
                program,
                base,
            },
            Err(e) => SessionEvent::ExampleLoadFailed {
                file: example.file.clone(),
                reason: e.to_string(),
            },
        };
        self.apply(event)
    }

    /// Replace the program with the text of `example`
    pub async fn load_example(&self, example: &ExampleRef) -> Option<Notice> {
        let event = match self.catalog.load_example(example).await {
            Ok(program) => SessionEvent::ExampleLoaded {
                file: example.file.clone(),
                program,
            },
            Err(e) => SessionEvent::ExampleLoadFailed {
                file: example.file.clone(),
                reason: e.to_string(),
            },
        };
        self.apply(event)
    }

    /// Selector handler: `file` must name a catalog entry
    pub async fn select_example(&self, file: &str) -> Option<Notice> {
        let example = self.session.read().example(file).cloned();

        match example {
            Ok(example) => self.load_example(&example).await,
            Err(e) => self.apply(SessionEvent::ExampleLoadFailed {
                file: file.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn edit_program(&self, program: impl Into<String>) {
        self.apply(SessionEvent::ProgramEdited(program.into()));
    }

    pub fn clear_output(&self) {
        self.apply(SessionEvent::OutputCleared);
    }

    /// Evaluate the current program.
    ///
    /// Without a loaded module the module is not called and the session is not
    /// touched; the caller gets the "not loaded" notice instead.
    pub async fn run(&self) -> Option<Notice> {
        let _running = self.run_lock.lock().await;

        let (module, program) = {
            let session = self.session.read();
            (session.module().clone(), session.program().to_string())
        };

        match self.gateway.invoke(&module, &program).await {
            Ok(evaluation) => {
                tracing::info!(
                    session_id = %self.session_id(),
                    status = %evaluation.outcome.status(),
                    "Run completed"
                );
                tracing::debug!(value = %evaluation.outcome.value(), "Run outcome");
                self.apply(SessionEvent::RunCompleted(evaluation))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Run rejected by gateway");
                self.apply(SessionEvent::RunRejected)
            }
        }
    }
}
