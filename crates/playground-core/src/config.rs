//! Playground configuration
//!
//! Defaults, then an optional JSON file named by `PLAYGROUND_CONFIG`, then
//! individual environment overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreError;
use crate::Result;

const CONFIG_ENV: &str = "PLAYGROUND_CONFIG";
const EXAMPLES_ROOT_ENV: &str = "PLAYGROUND_EXAMPLES_ROOT";
const MODULE_COMMAND_ENV: &str = "PLAYGROUND_MODULE_COMMAND";

const DEFAULT_PROGRAM: &str =
    "let twice = fun f x -> f (f x) in\nlet inc = fun x -> x + 1 in\ntwice inc 0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL or directory holding `index.json` and the example files
    pub examples_root: String,
    /// Evaluator to load
    pub module: ModuleConfig,
    /// Editor contents before any example is loaded
    pub default_program: String,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            command: "rufus-eval".to_string(),
            args: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            examples_root: "rufus/examples".to_string(),
            module: ModuleConfig::default(),
            default_program: DEFAULT_PROGRAM.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Resolve the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(EXAMPLES_ROOT_ENV) {
            self.examples_root = root;
        }
        if let Some(command) = lookup(MODULE_COMMAND_ENV) {
            self.module.command = command;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.examples_root.trim().is_empty() {
            return Err(CoreError::Config("examples_root cannot be empty".to_string()));
        }
        if self.module.command.trim().is_empty() {
            return Err(CoreError::Config("module.command cannot be empty".to_string()));
        }
        Ok(())
    }
}
