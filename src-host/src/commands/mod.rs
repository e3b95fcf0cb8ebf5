//! Host commands
//!
//! Each command maps one frontend action onto the playground and answers with
//! a `CommandResult`. Notices are also pushed as `notice` events so the
//! frontend can show them even for requests it did not await.

mod examples;
mod run;
mod session;

use serde::Serialize;

use playground_core::{Notice, NoticeKind, Playground, SessionSnapshot};

use crate::bridge::{Emitter, Envelope, Request};

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

pub async fn dispatch(playground: &Playground, emitter: &Emitter, envelope: Envelope) {
    let Envelope { id, request } = envelope;
    tracing::debug!(?id, ?request, "Handling command");

    match request {
        Request::GetState => emitter.respond(id, &session::get_state(playground)),
        Request::EditProgram { program } => {
            emitter.respond(id, &session::edit_program(playground, program))
        }
        Request::ClearOutput => emitter.respond(id, &session::clear_output(playground)),
        Request::ListExamples => emitter.respond(id, &examples::list_examples(playground)),
        Request::SelectExample { file } => {
            let result = examples::select_example(playground, emitter, &file).await;
            emitter.respond(id, &result)
        }
        Request::Run => emitter.respond(id, &run::run(playground, emitter).await),
        Request::KeyDown(chord) => {
            let result = run::key_down(playground, emitter, chord).await;
            emitter.respond(id, &result)
        }
        Request::LoadModule => emitter.respond(id, &run::load_module(playground).await),
    }
}

/// Publish `notice`, then answer with the session state.
///
/// A notice that means the action was refused fails the command; an evaluation
/// error is a completed run and still succeeds.
fn finish(
    playground: &Playground,
    emitter: &Emitter,
    notice: Option<Notice>,
) -> CommandResult<SessionSnapshot> {
    let Some(notice) = notice else {
        return CommandResult::ok(playground.snapshot());
    };

    emitter.emit_notice(&notice);

    match notice.kind {
        NoticeKind::ModuleNotReady | NoticeKind::ExampleUnavailable => {
            CommandResult::err(notice.message)
        }
        NoticeKind::EvaluationError => CommandResult::ok(playground.snapshot()),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use futures_util::future::BoxFuture;
    use playground_core::{
        CatalogLoader, Evaluation, EvaluationModule, MemoryFetcher, ModuleError, ModuleGateway,
        ModuleLoader, Playground, Session, MANIFEST_FILE,
    };
    use tokio::sync::mpsc;

    use crate::bridge::Emitter;

    /// Echoes identity programs back as closures and rejects everything else
    pub struct StubModule;

    impl EvaluationModule for StubModule {
        fn name(&self) -> &str {
            "stub"
        }

        fn invoke<'a>(&'a self, program: &'a str) -> BoxFuture<'a, Evaluation> {
            Box::pin(async move {
                match program {
                    "fun x -> x" => Evaluation::ok("<closure>"),
                    "print 1; 2" => Evaluation::ok("2").with_output("1"),
                    _ => Evaluation::err(format!("syntax error in `{program}`")),
                }
            })
        }
    }

    pub struct StubLoader {
        pub fail: bool,
    }

    impl ModuleLoader for StubLoader {
        fn load(&self) -> BoxFuture<'_, Result<Arc<dyn EvaluationModule>, ModuleError>> {
            Box::pin(async move {
                if self.fail {
                    return Err(ModuleError::Load("no evaluator".to_string()));
                }
                let module: Arc<dyn EvaluationModule> = Arc::new(StubModule);
                Ok(module)
            })
        }
    }

    pub fn playground(fail: bool) -> Playground {
        let fetcher = MemoryFetcher::new()
            .with(
                MANIFEST_FILE,
                r#"[{"name":"Identity","file":"id.rufus"},{"name":"Missing","file":"missing.rufus"}]"#,
            )
            .with("id.rufus", "fun x -> x");

        Playground::with_parts(
            Session::new("1 +"),
            ModuleGateway::new(Arc::new(StubLoader { fail })),
            CatalogLoader::new(Arc::new(fetcher)),
        )
    }

    /// Every line sent so far, parsed
    pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(serde_json::from_str(&line).unwrap());
        }
        lines
    }

    pub fn channel() -> (Emitter, mpsc::UnboundedReceiver<String>) {
        Emitter::channel()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::bridge;

    #[tokio::test]
    async fn test_finish_without_notice() {
        let playground = playground(false);
        let (emitter, mut rx) = channel();

        let result = finish(&playground, &emitter, None);
        assert!(result.success);
        assert_eq!(result.data.unwrap().program, "1 +");
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_finish_maps_notice_kinds() {
        let playground = playground(false);
        let (emitter, mut rx) = channel();

        let refused = finish(&playground, &emitter, Some(Notice::module_not_ready()));
        assert!(!refused.success);
        assert_eq!(refused.error.as_deref(), Some("Evaluation module not loaded!"));

        let failed = finish(
            &playground,
            &emitter,
            Some(Notice::evaluation_error("unexpected `+`".to_string())),
        );
        assert!(failed.success);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["payload"]["kind"], "module_not_ready");
        assert_eq!(events[1]["payload"]["kind"], "evaluation_error");
        assert_eq!(events[1]["payload"]["message"], "unexpected `+`");
    }

    #[tokio::test]
    async fn test_serve_session() {
        let playground = playground(false);
        playground.start().await;
        let (emitter, mut rx) = channel();

        let input = concat!(
            r#"{"id": 1, "command": "get_state"}"#,
            "\n",
            "not json\n",
            "\n",
            r#"{"id": 2, "command": "key_down", "key": "Enter", "meta": true}"#,
            "\n",
            r#"{"id": 3, "command": "edit_program", "program": "1 +"}"#,
            "\n",
            r#"{"id": 4, "command": "run"}"#,
            "\n",
        );
        bridge::serve(&playground, input.as_bytes(), &emitter)
            .await
            .unwrap();

        let lines = drain(&mut rx);
        let responses: Vec<_> = lines.iter().filter(|l| l.get("event").is_none()).collect();
        assert_eq!(responses.len(), 5);

        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["data"]["program"], "fun x -> x");
        assert_eq!(responses[0]["data"]["module_status"], "ready");

        assert!(responses[1]["id"].is_null());
        assert_eq!(responses[1]["success"], false);

        assert_eq!(responses[2]["id"], 2);
        assert_eq!(responses[2]["data"]["ran"], true);
        assert_eq!(responses[2]["data"]["state"]["last_result"], "<closure>");

        assert_eq!(responses[4]["id"], 4);
        assert_eq!(responses[4]["success"], true);
        assert_eq!(responses[4]["data"]["last_result"], "<closure>");

        let notices: Vec<_> = lines.iter().filter(|l| l["event"] == "notice").collect();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0]["payload"]["kind"], "evaluation_error");
        assert_eq!(notices[0]["payload"]["message"], "syntax error in `1 +`");
    }
}
