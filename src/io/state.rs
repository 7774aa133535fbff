use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::task::Task;

/// Persisted color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Display name (pt-BR)
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "claro",
            Theme::Dark => "escuro",
        }
    }
}

/// Persisted view state (written to eisen/state.json), kept separate from
/// the task data so a corrupt one does not take the other down.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Expanded task ids, in toggle order
    #[serde(default)]
    pub expanded: Vec<u64>,
    #[serde(default)]
    pub theme: Theme,
}

/// Read tasks.json. Missing or unparseable files read as None; the caller
/// falls back to an empty list (there is no server-side copy to recover
/// from, so a corrupt file must never be fatal).
pub fn read_tasks(dir: &Path) -> Option<Vec<Task>> {
    let content = fs::read_to_string(dir.join("tasks.json")).ok()?;
    serde_json::from_str(&content).ok()
}

/// Read state.json, same policy as [`read_tasks`].
pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(dir.join("state.json")).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write tasks.json atomically
pub fn write_tasks(dir: &Path, tasks: &[Task]) -> io::Result<()> {
    let content = serde_json::to_string_pretty(tasks)?;
    atomic_write(&dir.join("tasks.json"), content.as_bytes())
}

/// Write state.json atomically
pub fn write_ui_state(dir: &Path, state: &UiState) -> io::Result<()> {
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(&dir.join("state.json"), content.as_bytes())
}

/// Write through a tempfile in the same directory and rename into place,
/// so a crash mid-write cannot leave a truncated file behind.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
