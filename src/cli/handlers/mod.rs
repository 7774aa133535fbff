mod init;
pub use init::cmd_init;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::lock::StoreLock;
use crate::io::state::Theme;
use crate::io::store_io::{self, LoadedStore, StoreError};
use crate::model::task::Task;
use crate::store::TaskStore;

/// Global override for the working directory (set by -C)
static DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;

    if let Some(ref dir) = cli.dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("não foi possível resolver o caminho -C '{}': {}", dir, e))?;
        DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        // No subcommand → list
        None => cmd_list(ListArgs { all: false }, json),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, &base_dir()?),

            // Read commands
            Commands::List(args) => cmd_list(args, json),
            Commands::Show(args) => cmd_show(args, json),

            // Write commands
            Commands::Add(args) => cmd_add(args),
            Commands::Sub(args) => cmd_sub(args),
            Commands::Check(args) => cmd_check(args),
            Commands::Done(args) => cmd_set_completed(args, true),
            Commands::Reopen(args) => cmd_set_completed(args, false),
            Commands::Rm(args) => cmd_rm(args),
            Commands::Expand(args) => cmd_expand(args),
            Commands::Clear(args) => cmd_clear(args),
            Commands::Theme(args) => cmd_theme(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn base_dir() -> Result<PathBuf, StoreError> {
    match DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => Ok(dir.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

fn open_store() -> Result<LoadedStore, StoreError> {
    let dir = store_io::discover_dir(&base_dir()?)?;
    store_io::load_store(&dir)
}

/// Wire persistence into the store: every state-changing mutation writes
/// both files. A failed write keeps the in-memory state and only warns.
fn attach_saver(loaded: &mut LoadedStore) {
    let dir = loaded.dir.clone();
    let theme = loaded.theme;
    loaded.store.subscribe(move |snapshot| {
        if let Err(e) = store_io::save_snapshot(&dir, snapshot, theme) {
            eprintln!("aviso: não foi possível salvar o estado: {}", e);
        }
    });
}

/// Load the store, take the write lock, persist-on-change, run the
/// mutation, and hand the store back so the handler can report on it.
fn mutate(
    f: impl FnOnce(&mut TaskStore) -> bool,
) -> Result<(bool, LoadedStore), Box<dyn std::error::Error>> {
    let mut loaded = open_store()?;
    let _lock = StoreLock::acquire_default(&loaded.dir)?;
    attach_saver(&mut loaded);
    let changed = f(&mut loaded.store);
    Ok((changed, loaded))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> CmdResult {
    let loaded = open_store()?;
    let snapshot = loaded.store.snapshot();

    if json {
        let out = output::snapshot_to_json(&snapshot);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let show_completed = args.all || loaded.config.show_completed;
    let visible: Vec<&Task> = snapshot
        .tasks
        .iter()
        .filter(|t| show_completed || !t.completed)
        .collect();

    if visible.is_empty() {
        println!("{}", output::EMPTY_LIST_MSG);
        return Ok(());
    }
    for task in visible {
        let expanded = args.all || snapshot.expanded.contains(&task.id);
        for line in output::format_task_block(task, expanded) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(args: IdArg, json: bool) -> CmdResult {
    let loaded = open_store()?;
    let Some(task) = loaded.store.task(args.id) else {
        return Err(format!("tarefa {} não encontrada", args.id).into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output::task_to_json(task))?);
    } else {
        for line in output::format_task_detail(task) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> CmdResult {
    let (changed, loaded) =
        mutate(|store| store.add_task(&args.text, args.urgent, args.important))?;
    if changed {
        // The new task is the one with the highest id
        if let Some(task) = loaded.store.tasks().iter().max_by_key(|t| t.id) {
            println!("Tarefa {} adicionada ({}).", task.id, task.quadrant().label());
        }
    }
    Ok(())
}

fn cmd_sub(args: SubArgs) -> CmdResult {
    let (changed, loaded) = mutate(|store| store.add_subtask(args.id, &args.text))?;
    if changed {
        if let Some(subtask) = loaded
            .store
            .task(args.id)
            .and_then(|t| t.subtasks.last())
        {
            println!("Subtarefa {} adicionada à tarefa {}.", subtask.id, args.id);
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> CmdResult {
    let (changed, loaded) = mutate(|store| store.toggle_subtask(args.id, args.sub_id))?;
    if changed {
        if let Some(task) = loaded.store.task(args.id) {
            if let Some(subtask) = task.subtasks.iter().find(|s| s.id == args.sub_id) {
                let state = if subtask.completed { "concluída" } else { "reaberta" };
                println!("Subtarefa {} {}.", subtask.id, state);
            }
            if task.completed {
                println!("Tarefa {} concluída.", task.id);
            }
        }
    }
    Ok(())
}

fn cmd_set_completed(args: IdArg, completed: bool) -> CmdResult {
    let (changed, _) = mutate(|store| store.set_task_completed(args.id, completed))?;
    if changed {
        let verb = if completed { "concluída" } else { "reaberta" };
        println!("Tarefa {} {}.", args.id, verb);
    }
    Ok(())
}

fn cmd_rm(args: RmArgs) -> CmdResult {
    match args.sub_id {
        Some(sub_id) => {
            let (changed, _) = mutate(|store| store.remove_subtask(args.id, sub_id))?;
            if changed {
                println!("Subtarefa {} removida.", sub_id);
            }
        }
        None => {
            let (changed, _) = mutate(|store| store.remove_task(args.id))?;
            if changed {
                println!("Tarefa {} removida.", args.id);
            }
        }
    }
    Ok(())
}

fn cmd_expand(args: IdArg) -> CmdResult {
    // View-state only, but still keyed to a real task
    let (changed, loaded) =
        mutate(|store| store.task(args.id).is_some() && store.toggle_expanded(args.id))?;
    if changed {
        let state = if loaded.store.is_expanded(args.id) { "expandida" } else { "recolhida" };
        println!("Tarefa {} {}.", args.id, state);
    }
    Ok(())
}

fn cmd_clear(args: ClearArgs) -> CmdResult {
    let mut loaded = open_store()?;

    if loaded.config.confirm_clear && !args.yes {
        print!("{}", output::CONFIRM_CLEAR_PROMPT);
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        let answer = answer.trim().to_lowercase();
        if answer != "s" && answer != "sim" {
            println!("Operação cancelada.");
            return Ok(());
        }
    }

    let _lock = StoreLock::acquire_default(&loaded.dir)?;
    attach_saver(&mut loaded);
    if loaded.store.clear_all() {
        println!("Todas as tarefas foram apagadas.");
    }
    Ok(())
}

fn cmd_theme(args: ThemeArgs) -> CmdResult {
    let loaded = open_store()?;
    let theme = match args.mode.as_deref() {
        None => loaded.theme.toggled(),
        Some("light") => Theme::Light,
        Some("dark") => Theme::Dark,
        Some(other) => {
            return Err(format!("tema desconhecido '{}' (esperado: light, dark)", other).into());
        }
    };

    let _lock = StoreLock::acquire_default(&loaded.dir)?;
    store_io::save_snapshot(&loaded.dir, &loaded.store.snapshot(), theme)?;
    println!("Tema: {}", theme.label());
    Ok(())
}
