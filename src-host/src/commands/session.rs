//! Session state commands
use playground_core::{Playground, SessionSnapshot};

use super::CommandResult;

pub fn get_state(playground: &Playground) -> CommandResult<SessionSnapshot> {
    CommandResult::ok(playground.snapshot())
}

/// Editor change: the text is stored as is, with no validation
pub fn edit_program(playground: &Playground, program: String) -> CommandResult<SessionSnapshot> {
    playground.edit_program(program);
    CommandResult::ok(playground.snapshot())
}

pub fn clear_output(playground: &Playground) -> CommandResult<SessionSnapshot> {
    playground.clear_output();
    CommandResult::ok(playground.snapshot())
}

#[cfg(test)]
mod tests {
    use super::super::testing::playground;
    use super::*;

    #[tokio::test]
    async fn test_edit_and_clear() {
        let playground = playground(false);
        playground.start().await;

        let edited = edit_program(&playground, "print 1; 2".to_string());
        assert_eq!(edited.data.unwrap().program, "print 1; 2");

        assert!(playground.run().await.is_none());
        let state = get_state(&playground).data.unwrap();
        assert_eq!(state.last_result, "2");
        assert_eq!(state.last_output, "1");

        let cleared = clear_output(&playground).data.unwrap();
        assert_eq!(cleared.last_result, "");
        assert_eq!(cleared.last_output, "");
        assert_eq!(cleared.program, "print 1; 2");
    }
}
