use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::io::state::{self, Theme, UiState};
use crate::model::config::Config;
use crate::store::{Snapshot, TaskStore};

/// Error type for store directory operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("nenhum diretório eisen/ encontrado (rode `eisen init`)")]
    NotAStore,
    #[error("eisen/ já existe em {0} (use --force para recriar)")]
    AlreadyExists(PathBuf),
    #[error("could not parse config.toml: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

const STORE_DIR: &str = "eisen";

const CONFIG_TEMPLATE: &str = "\
# eisen configuration
#
# confirm_clear  = true   # ask before `eisen clear` wipes everything
# show_completed = true   # show completed tasks in `eisen list`
";

/// Find the store directory by walking up from `start` until a directory
/// containing `eisen/tasks.json` is found. Returns the `eisen/` path.
pub fn discover_dir(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = start.to_path_buf();
    loop {
        let dir = current.join(STORE_DIR);
        if dir.is_dir() && dir.join("tasks.json").exists() {
            return Ok(dir);
        }
        if !current.pop() {
            return Err(StoreError::NotAStore);
        }
    }
}

/// Create a fresh `eisen/` directory under `base` with empty state files
/// and a commented config template. Refuses to clobber an existing store
/// unless `force` is set.
pub fn init_dir(base: &Path, force: bool) -> Result<PathBuf, StoreError> {
    let dir = base.join(STORE_DIR);
    if dir.join("tasks.json").exists() && !force {
        return Err(StoreError::AlreadyExists(dir));
    }
    fs::create_dir_all(&dir)?;
    state::write_tasks(&dir, &[])?;
    state::write_ui_state(&dir, &UiState::default())?;
    fs::write(dir.join("config.toml"), CONFIG_TEMPLATE)?;
    Ok(dir)
}

/// Everything a command needs from disk
pub struct LoadedStore {
    pub dir: PathBuf,
    pub store: TaskStore,
    pub theme: Theme,
    pub config: Config,
}

/// Load the store from an `eisen/` directory. Missing or corrupt state
/// files fall back to empty/default values; only a malformed config.toml
/// is surfaced, since silently ignoring explicit configuration would be
/// worse than stopping.
pub fn load_store(dir: &Path) -> Result<LoadedStore, StoreError> {
    let tasks = state::read_tasks(dir).unwrap_or_default();
    let ui = state::read_ui_state(dir).unwrap_or_default();
    let expanded: IndexSet<u64> = ui.expanded.iter().copied().collect();
    let config = read_config(dir)?;
    Ok(LoadedStore {
        dir: dir.to_path_buf(),
        store: TaskStore::from_parts(tasks, expanded),
        theme: ui.theme,
        config,
    })
}

/// Persist a snapshot (both files). Callers treat a failure as non-fatal:
/// the in-memory state stays valid for the rest of the invocation.
pub fn save_snapshot(dir: &Path, snapshot: &Snapshot, theme: Theme) -> Result<(), StoreError> {
    state::write_tasks(dir, &snapshot.tasks)?;
    state::write_ui_state(
        dir,
        &UiState {
            expanded: snapshot.expanded.clone(),
            theme,
        },
    )?;
    Ok(())
}

/// Read config.toml; a missing file means all defaults.
pub fn read_config(dir: &Path) -> Result<Config, StoreError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn init_then_discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let dir = init_dir(tmp.path(), false).unwrap();
        assert!(dir.join("tasks.json").exists());
        assert!(dir.join("state.json").exists());
        assert!(dir.join("config.toml").exists());

        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();
        let found = discover_dir(&sub).unwrap();
        assert_eq!(found, dir);
    }

    #[test]
    fn discover_fails_outside_a_store() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_dir(tmp.path()),
            Err(StoreError::NotAStore)
        ));
    }

    #[test]
    fn init_refuses_existing_store_without_force() {
        let tmp = TempDir::new().unwrap();
        init_dir(tmp.path(), false).unwrap();
        assert!(matches!(
            init_dir(tmp.path(), false),
            Err(StoreError::AlreadyExists(_))
        ));
        assert!(init_dir(tmp.path(), true).is_ok());
    }

    #[test]
    fn load_falls_back_to_empty_on_corrupt_state() {
        let tmp = TempDir::new().unwrap();
        let dir = init_dir(tmp.path(), false).unwrap();
        fs::write(dir.join("tasks.json"), "{broken").unwrap();
        fs::write(dir.join("state.json"), "broken too").unwrap();

        let loaded = load_store(&dir).unwrap();
        assert!(loaded.store.tasks().is_empty());
        assert_eq!(loaded.theme, Theme::Light);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let tmp = TempDir::new().unwrap();
        let dir = init_dir(tmp.path(), false).unwrap();

        let mut loaded = load_store(&dir).unwrap();
        loaded.store.add_task("Pagar contas", true, false);
        loaded.store.add_task("Ler livro", false, false);
        let id = loaded.store.tasks()[0].id;
        loaded.store.toggle_expanded(id);

        save_snapshot(&dir, &loaded.store.snapshot(), Theme::Dark).unwrap();

        let reloaded = load_store(&dir).unwrap();
        assert_eq!(reloaded.store.snapshot(), loaded.store.snapshot());
        assert_eq!(reloaded.theme, Theme::Dark);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let dir = init_dir(tmp.path(), false).unwrap();
        fs::write(dir.join("config.toml"), "confirm_clear = \"sim\"").unwrap();
        assert!(matches!(
            load_store(&dir),
            Err(StoreError::ConfigParse(_))
        ));
    }
}
