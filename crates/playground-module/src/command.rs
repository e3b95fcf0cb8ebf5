//! Evaluator backed by an external executable
//!
//! The program text is written to the child's stdin. On a successful exit the
//! last non-empty stdout line is the value and any earlier lines are the
//! secondary output stream. On a failed exit stderr carries the message.

use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ModuleError;
use crate::module::{EvaluationModule, ModuleLoader};
use crate::outcome::Evaluation;
use crate::Result;

pub struct CommandModuleLoader {
    /// Executable name (looked up on `PATH`) or path
    command: String,
    /// Extra arguments passed on every invocation
    args: Vec<String>,
}

impl CommandModuleLoader {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl ModuleLoader for CommandModuleLoader {
    fn load(&self) -> BoxFuture<'_, Result<Arc<dyn EvaluationModule>>> {
        Box::pin(async move {
            let executable = resolve_executable(&self.command).await?;

            tracing::debug!(
                command = %self.command,
                executable = %executable.display(),
                "Resolved evaluator executable"
            );

            let module: Arc<dyn EvaluationModule> = Arc::new(CommandModule {
                name: self.command.clone(),
                executable,
                args: self.args.clone(),
            });
            Ok(module)
        })
    }
}

pub struct CommandModule {
    name: String,
    executable: PathBuf,
    args: Vec<String>,
}

impl CommandModule {
    async fn execute(&self, program: &str) -> std::io::Result<Output> {
        let mut child = Command::new(&self.executable)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Stdin is written concurrently with collecting stdout/stderr
        if let Some(mut stdin) = child.stdin.take() {
            let source = program.to_owned();
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(source.as_bytes()).await {
                    tracing::debug!(error = %e, "Evaluator stopped reading its input");
                }
            });
        }

        child.wait_with_output().await
    }
}

impl EvaluationModule for CommandModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke<'a>(&'a self, program: &'a str) -> BoxFuture<'a, Evaluation> {
        Box::pin(async move {
            match self.execute(program).await {
                Ok(output) => evaluation_from_output(&output),
                Err(e) => Evaluation::err(format!("Failed to run evaluator: {}", e)),
            }
        })
    }
}

fn evaluation_from_output(output: &Output) -> Evaluation {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("Evaluator exited with {}", output.status)
        } else {
            stderr
        };
        return Evaluation::err(message);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines: Vec<&str> = stdout.lines().collect();
    while matches!(lines.last(), Some(line) if line.trim().is_empty()) {
        lines.pop();
    }

    let value = lines.pop().unwrap_or_default().to_string();
    let evaluation = Evaluation::ok(value);

    if lines.is_empty() {
        evaluation
    } else {
        evaluation.with_output(lines.join("\n"))
    }
}

async fn resolve_executable(command: &str) -> Result<PathBuf> {
    let command = command.trim();
    if command.is_empty() {
        return Err(ModuleError::Load("evaluator command is empty".to_string()));
    }

    let candidate = Path::new(command);
    if candidate.is_absolute() || candidate.components().count() > 1 {
        return if is_executable(candidate).await {
            Ok(candidate.to_path_buf())
        } else {
            Err(ModuleError::NotFound(command.to_string()))
        };
    }

    let search_path =
        std::env::var_os("PATH").ok_or_else(|| ModuleError::NotFound(command.to_string()))?;

    for dir in std::env::split_paths(&search_path) {
        let full = dir.join(command);
        if is_executable(&full).await {
            return Ok(full);
        }
    }

    Err(ModuleError::NotFound(command.to_string()))
}

async fn is_executable(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) => meta.is_file() && has_exec_permission(&meta),
        Err(_) => false,
    }
}

#[cfg(unix)]
fn has_exec_permission(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_exec_permission(_meta: &std::fs::Metadata) -> bool {
    true
}
