//! Rufus Playground Session State
//!
//! One `Session` per playground instance:
//! - the single source of truth for program text, module handle, catalog and results
//! - mutated only through `Session::apply`, one event at a time
//! - never persisted; it lives as long as the host process

mod error;
mod event;
mod input;
mod notice;
mod session;

pub use error::SessionError;
pub use event::SessionEvent;
pub use input::KeyChord;
pub use notice::{Notice, NoticeKind};
pub use session::{Session, SessionSnapshot};

pub type Result<T> = std::result::Result<T, SessionError>;
