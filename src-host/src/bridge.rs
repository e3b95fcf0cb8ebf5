//! JSON-lines bridge between the frontend and the command handlers

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use playground_core::{KeyChord, Notice, Playground};

use crate::commands::{self, CommandResult};

/// One request line: `{"id": 7, "command": "select_example", "file": "id.rufus"}`
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub request: Request,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    GetState,
    EditProgram { program: String },
    ClearOutput,
    ListExamples,
    SelectExample { file: String },
    Run,
    KeyDown(KeyChord),
    LoadModule,
}

#[derive(Serialize)]
struct Response<'a, T> {
    id: Option<u64>,
    #[serde(flatten)]
    result: &'a CommandResult<T>,
}

#[derive(Serialize)]
struct Event<'a, T> {
    event: &'a str,
    payload: &'a T,
}

/// Outgoing line sink. Cloned freely; a single writer task owns stdout.
#[derive(Clone)]
pub struct Emitter {
    tx: mpsc::UnboundedSender<String>,
}

impl Emitter {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn respond<T: Serialize>(&self, id: Option<u64>, result: &CommandResult<T>) {
        self.send(&Response { id, result });
    }

    pub fn emit<T: Serialize>(&self, event: &str, payload: &T) {
        self.send(&Event { event, payload });
    }

    pub fn emit_notice(&self, notice: &Notice) {
        self.emit("notice", notice);
    }

    fn send<T: Serialize>(&self, message: &T) {
        match serde_json::to_string(message) {
            Ok(line) => {
                if self.tx.send(line).is_err() {
                    tracing::warn!("Output closed, dropping message");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize outgoing message"),
        }
    }
}

/// Drain outgoing lines into `out` until every `Emitter` is dropped
pub async fn write_lines<W>(mut rx: mpsc::UnboundedReceiver<String>, mut out: W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
    }
    Ok(())
}

/// Handle requests in arrival order until the input closes
pub async fn serve<R>(playground: &Playground, input: R, emitter: &Emitter) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Envelope>(line) {
            Ok(envelope) => commands::dispatch(playground, emitter, envelope).await,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed request");
                emitter.respond(None, &CommandResult::<()>::err(format!("Invalid request: {}", e)));
            }
        }
    }

    tracing::info!("Input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Envelope {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_parse_requests() {
        let envelope = parse(r#"{"id": 3, "command": "edit_program", "program": "fun x -> x"}"#);
        assert_eq!(envelope.id, Some(3));
        assert_eq!(
            envelope.request,
            Request::EditProgram {
                program: "fun x -> x".to_string()
            }
        );

        assert_eq!(parse(r#"{"command": "run"}"#).request, Request::Run);
        assert_eq!(parse(r#"{"command": "run"}"#).id, None);
        assert_eq!(
            parse(r#"{"command": "select_example", "file": "id.rufus"}"#).request,
            Request::SelectExample {
                file: "id.rufus".to_string()
            }
        );
        assert_eq!(
            parse(r#"{"command": "key_down", "key": "Enter", "ctrl": true}"#).request,
            Request::KeyDown(KeyChord::new("Enter").with_ctrl())
        );
    }

    #[test]
    fn test_reject_unknown_command() {
        assert!(serde_json::from_str::<Envelope>(r#"{"command": "format_disk"}"#).is_err());
        assert!(serde_json::from_str::<Envelope>(r#"{"command": "select_example"}"#).is_err());
    }

    #[tokio::test]
    async fn test_write_lines() {
        let (emitter, rx) = Emitter::channel();
        emitter.respond(Some(1), &CommandResult::ok("done"));
        emitter.emit_notice(&Notice::module_not_ready());
        drop(emitter);

        let mut out = Vec::new();
        write_lines(rx, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[0]["success"], true);
        assert_eq!(lines[0]["data"], "done");
        assert_eq!(lines[1]["event"], "notice");
        assert_eq!(lines[1]["payload"]["kind"], "module_not_ready");
    }
}
