//! Rufus Playground - Host
//!
//! The editor frontend talks to this process over stdio, one JSON object per
//! line. Requests come in on stdin; responses and events go out on stdout.
//! The frontend holds no state of its own: it renders snapshots and notices.

mod bridge;
mod commands;

use playground_core::{Config, Playground};

use bridge::Emitter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    playground_core::init_logging(&config.log_filter);

    let playground = Playground::new(&config)?;
    let (emitter, outgoing) = Emitter::channel();

    let writer = tokio::spawn(bridge::write_lines(outgoing, tokio::io::stdout()));

    // Module and catalog load in the background; requests are served meanwhile
    let starting = tokio::spawn({
        let playground = playground.clone();
        let emitter = emitter.clone();
        async move {
            if let Some(notice) = playground.start().await {
                emitter.emit_notice(&notice);
            }
        }
    });

    tracing::info!(
        session_id = %playground.session_id(),
        module = %config.module.command,
        "Rufus Playground host started"
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    bridge::serve(&playground, stdin, &emitter).await?;

    // Closing the last sender lets the writer drain and finish
    starting.abort();
    drop(emitter);
    writer.await??;

    Ok(())
}
