//! Rufus Playground Core
//!
//! Coordination layer between the editor surface and the evaluation module.
//! `Playground` owns the session; the host only forwards user actions and
//! renders snapshots and notices.

mod config;
mod error;
mod playground;

pub use config::{Config, ModuleConfig};
pub use error::CoreError;
pub use playground::Playground;

// Re-export core components
pub use playground_catalog::{
    CatalogError, CatalogLoader, ExampleRef, FileFetcher, HttpFetcher, MemoryFetcher,
    ResourceFetcher, MANIFEST_FILE,
};
pub use playground_module::{
    CommandModuleLoader, Evaluation, EvaluationModule, EvaluationOutcome, ModuleError,
    ModuleGateway, ModuleLoader, ModuleState, ModuleStatus, OutcomeStatus,
};
pub use playground_session::{
    KeyChord, Notice, NoticeKind, Session, SessionError, SessionEvent, SessionSnapshot,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr; stdout belongs to
/// the host's command bridge.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
