//! Example catalog commands
use serde::Serialize;

use playground_core::{Playground, SessionSnapshot};

use super::{finish, CommandResult};
use crate::bridge::Emitter;

#[derive(Debug, Serialize)]
pub struct ExampleInfo {
    pub name: String,
    pub file: String,
    pub selected: bool,
}

/// Selector entries in manifest order. Empty until the catalog has loaded.
pub fn list_examples(playground: &Playground) -> CommandResult<Vec<ExampleInfo>> {
    let examples = playground.with_session(|session| {
        let selected = session.selected_example();
        session
            .examples()
            .iter()
            .map(|example| ExampleInfo {
                name: example.name.clone(),
                file: example.file.clone(),
                selected: selected == Some(example.file.as_str()),
            })
            .collect()
    });
    CommandResult::ok(examples)
}

pub async fn select_example(
    playground: &Playground,
    emitter: &Emitter,
    file: &str,
) -> CommandResult<SessionSnapshot> {
    let notice = playground.select_example(file).await;
    finish(playground, emitter, notice)
}
