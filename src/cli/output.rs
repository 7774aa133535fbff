use serde::Serialize;

use crate::model::task::{Quadrant, Subtask, Task};
use crate::store::Snapshot;

pub const EMPTY_LIST_MSG: &str = "Nenhuma tarefa adicionada ainda.";
pub const CONFIRM_CLEAR_PROMPT: &str = "Tem certeza que deseja apagar todas as tarefas? [s/N] ";

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SubtaskJson {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub text: String,
    pub urgent: bool,
    pub important: bool,
    pub score: u8,
    pub quadrant: Quadrant,
    pub completed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<SubtaskJson>,
}

#[derive(Serialize)]
pub struct SnapshotJson {
    pub tasks: Vec<TaskJson>,
    pub expanded: Vec<u64>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        text: task.text.clone(),
        urgent: task.urgent,
        important: task.important,
        score: task.score,
        quadrant: task.quadrant(),
        completed: task.completed,
        subtasks: task
            .subtasks
            .iter()
            .map(|s| SubtaskJson {
                id: s.id,
                text: s.text.clone(),
                completed: s.completed,
            })
            .collect(),
    }
}

pub fn snapshot_to_json(snapshot: &Snapshot) -> SnapshotJson {
    SnapshotJson {
        tasks: snapshot.tasks.iter().map(task_to_json).collect(),
        expanded: snapshot.expanded.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn checkbox(completed: bool) -> char {
    if completed { 'x' } else { ' ' }
}

/// One-line task summary: checkbox, quadrant marker, id, text, flags
pub fn format_task_line(task: &Task) -> String {
    let mut flags = String::new();
    if task.urgent {
        flags.push_str(" #urgente");
    }
    if task.important {
        flags.push_str(" #importante");
    }
    format!(
        "[{}] {} {:>3}  {}{}",
        checkbox(task.completed),
        task.quadrant().marker(),
        task.id,
        task.text,
        flags
    )
}

pub fn format_subtask_line(subtask: &Subtask) -> String {
    format!(
        "      [{}] {:>3}  {}",
        checkbox(subtask.completed),
        subtask.id,
        subtask.text
    )
}

/// Task line plus, when expanded, its subtask lines
pub fn format_task_block(task: &Task, expanded: bool) -> Vec<String> {
    let mut lines = vec![format_task_line(task)];
    if expanded {
        for subtask in &task.subtasks {
            lines.push(format_subtask_line(subtask));
        }
    }
    lines
}

/// Detailed view for `eisen show`
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = vec![format_task_line(task)];
    lines.push(format!("pontuação: {}", task.score));
    lines.push(format!("quadrante: {}", task.quadrant().label()));

    if !task.subtasks.is_empty() {
        lines.push(String::new());
        lines.push("subtarefas:".to_string());
        for subtask in &task.subtasks {
            lines.push(format_subtask_line(subtask));
        }
    }
    lines
}
