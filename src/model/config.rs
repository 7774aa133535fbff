use serde::{Deserialize, Serialize};

/// Configuration from eisen/config.toml (all fields optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether `eisen clear` asks for confirmation first
    #[serde(default = "default_true")]
    pub confirm_clear: bool,
    /// Whether `eisen list` shows completed tasks without --all
    #[serde(default = "default_true")]
    pub show_completed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            confirm_clear: true,
            show_completed: true,
        }
    }
}

fn default_true() -> bool {
    true
}
