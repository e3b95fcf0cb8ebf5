//! Editor keyboard input

use serde::{Deserialize, Serialize};

/// A key press in the program editor, with its modifier state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: String,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Cmd+Enter, or Ctrl+Enter where there is no Cmd key
    pub fn is_run_shortcut(&self) -> bool {
        self.key == "Enter" && (self.meta || self.ctrl)
    }
}
