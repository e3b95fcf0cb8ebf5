//! Evaluation commands
use serde::Serialize;

use playground_core::{KeyChord, ModuleStatus, Playground, SessionSnapshot};

use super::{finish, CommandResult};
use crate::bridge::Emitter;

#[derive(Debug, Serialize)]
pub struct KeyDownInfo {
    /// Whether the key press triggered a run
    pub ran: bool,
    pub state: SessionSnapshot,
}

pub async fn run(playground: &Playground, emitter: &Emitter) -> CommandResult<SessionSnapshot> {
    let notice = playground.run().await;
    finish(playground, emitter, notice)
}

/// Editor key handler. Only the run shortcut is acted on; other keys belong to
/// the editor.
pub async fn key_down(
    playground: &Playground,
    emitter: &Emitter,
    chord: KeyChord,
) -> CommandResult<KeyDownInfo> {
    if !chord.is_run_shortcut() {
        return CommandResult::ok(KeyDownInfo {
            ran: false,
            state: playground.snapshot(),
        });
    }

    tracing::debug!(key = %chord.key, "Run shortcut pressed");
    let result = run(playground, emitter).await;
    match result.data {
        Some(state) => CommandResult::ok(KeyDownInfo { ran: true, state }),
        None => CommandResult::err(result.error.unwrap_or_default()),
    }
}

/// Retry loading the evaluation module, e.g. after a failed start
pub async fn load_module(playground: &Playground) -> CommandResult<SessionSnapshot> {
    playground.load_module().await;

    let state = playground.snapshot();
    match state.module_status {
        ModuleStatus::Failed => CommandResult::err(
            state
                .module_error
                .unwrap_or_else(|| "Evaluation module failed to load".to_string()),
        ),
        _ => CommandResult::ok(state),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{channel, drain, playground};
    use super::*;

    #[tokio::test]
    async fn test_run_without_module() {
        let playground = playground(false);
        let (emitter, mut rx) = channel();

        let result = run(&playground, &emitter).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Evaluation module not loaded!"));
        assert_eq!(playground.snapshot().last_result, "");

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "notice");
        assert_eq!(events[0]["payload"]["kind"], "module_not_ready");
    }

    #[tokio::test]
    async fn test_evaluation_error_still_succeeds() {
        let playground = playground(false);
        playground.load_module().await;
        let (emitter, mut rx) = channel();

        let result = run(&playground, &emitter).await;
        assert!(result.success);

        let events = drain(&mut rx);
        assert_eq!(events[0]["payload"]["kind"], "evaluation_error");
        assert_eq!(events[0]["payload"]["message"], "syntax error in `1 +`");
    }

    #[tokio::test]
    async fn test_key_down() {
        let playground = playground(false);
        playground.start().await;
        let (emitter, _rx) = channel();

        let typed = key_down(&playground, &emitter, KeyChord::new("Enter")).await;
        let typed = typed.data.unwrap();
        assert!(!typed.ran);
        assert_eq!(typed.state.last_result, "");

        let ran = key_down(&playground, &emitter, KeyChord::new("Enter").with_ctrl()).await;
        let ran = ran.data.unwrap();
        assert!(ran.ran);
        assert_eq!(ran.state.last_result, "<closure>");
    }

    #[tokio::test]
    async fn test_key_down_without_module() {
        let playground = playground(false);
        let (emitter, _rx) = channel();

        let result = key_down(&playground, &emitter, KeyChord::new("Enter").with_meta()).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Evaluation module not loaded!"));
    }

    #[tokio::test]
    async fn test_load_module() {
        let ready = playground(false);
        let result = load_module(&ready).await;
        assert_eq!(result.data.unwrap().module_status, ModuleStatus::Ready);

        let broken = playground(true);
        let result = load_module(&broken).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("no evaluator"));
        assert_eq!(broken.snapshot().module_status, ModuleStatus::Failed);
    }
}
