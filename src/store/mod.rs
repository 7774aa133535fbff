use indexmap::IndexSet;

use crate::model::task::{Subtask, Task};

/// Immutable view of the store, handed to subscribers and the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Tasks in priority order (score descending, stable for ties)
    pub tasks: Vec<Task>,
    /// Ids of tasks whose subtasks are currently shown, in toggle order
    pub expanded: Vec<u64>,
}

/// Handle returned by [`TaskStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(&Snapshot)>;

/// The authoritative task state and every operation that mutates it.
///
/// No mutating operation returns an error: blank text and unknown ids are
/// silent no-ops. Each returns whether the state actually changed, and
/// subscribers are notified (with a fresh snapshot) only on a real change.
pub struct TaskStore {
    tasks: Vec<Task>,
    expanded: IndexSet<u64>,
    next_id: u64,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            expanded: IndexSet::new(),
            next_id: 1,
            subscribers: Vec::new(),
            next_subscriber: 1,
        }
    }

    /// Rebuild a store from persisted state. The task order is taken as-is
    /// (it was sorted when saved); the id counter resumes past the highest
    /// id found so ids stay unique across sessions.
    pub fn from_parts(tasks: Vec<Task>, expanded: IndexSet<u64>) -> Self {
        let max_id = tasks
            .iter()
            .flat_map(|t| std::iter::once(t.id).chain(t.subtasks.iter().map(|s| s.id)))
            .max()
            .unwrap_or(0);
        TaskStore {
            tasks,
            expanded,
            next_id: max_id + 1,
            subscribers: Vec::new(),
            next_subscriber: 1,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.clone(),
            expanded: self.expanded.iter().copied().collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register a subscriber called with a fresh snapshot after every
    /// state-changing mutation.
    pub fn subscribe(&mut self, f: impl FnMut(&Snapshot) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Remove a subscriber. Returns false if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = Snapshot {
            tasks: self.tasks.clone(),
            expanded: self.expanded.iter().copied().collect(),
        };
        for (_, f) in &mut self.subscribers {
            f(&snapshot);
        }
    }

    // -----------------------------------------------------------------------
    // Task operations
    // -----------------------------------------------------------------------

    /// Create a task and insert it in priority order. Blank text declines
    /// silently. The whole list is re-sorted by score descending; the sort
    /// is stable, so equal-score tasks keep their insertion order.
    pub fn add_task(&mut self, text: &str, urgent: bool, important: bool) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let task = Task::new(self.fresh_id(), text.to_string(), urgent, important);
        self.tasks.push(task);
        self.tasks.sort_by(|a, b| b.score.cmp(&a.score));
        self.notify();
        true
    }

    /// Append a subtask to an existing task. Blank text or an unknown task
    /// id declines silently. The task list is not resorted and the parent's
    /// `completed` flag is left alone, even on an already-completed task.
    pub fn add_subtask(&mut self, task_id: u64, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(idx) = self.tasks.iter().position(|t| t.id == task_id) else {
            return false;
        };
        let subtask = Subtask::new(self.fresh_id(), text.to_string());
        self.tasks[idx].subtasks.push(subtask);
        self.notify();
        true
    }

    /// Flip one subtask, then re-derive the parent's `completed` as the AND
    /// over all its subtasks (cascade-up).
    pub fn toggle_subtask(&mut self, task_id: u64, subtask_id: u64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let Some(subtask) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) else {
            return false;
        };
        subtask.completed = !subtask.completed;
        task.completed = task.subtasks.iter().all(|s| s.completed);
        self.notify();
        true
    }

    /// Explicit completion override from the task's own checkbox: sets the
    /// task and cascades the same value down to every subtask. This is the
    /// only path that can complete a task with no subtasks.
    pub fn set_task_completed(&mut self, task_id: u64, completed: bool) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let changed = task.completed != completed
            || task.subtasks.iter().any(|s| s.completed != completed);
        task.completed = completed;
        for subtask in &mut task.subtasks {
            subtask.completed = completed;
        }
        if changed {
            self.notify();
        }
        changed
    }

    /// Remove a task. Idempotent; also drops the id from the expanded set
    /// so the view-state never accumulates orphans.
    pub fn remove_task(&mut self, task_id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        if self.tasks.len() == before {
            return false;
        }
        self.expanded.shift_remove(&task_id);
        self.notify();
        true
    }

    /// Remove one subtask from its parent. The parent's `completed` flag is
    /// not recomputed afterward.
    pub fn remove_subtask(&mut self, task_id: u64, subtask_id: u64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let before = task.subtasks.len();
        task.subtasks.retain(|s| s.id != subtask_id);
        if task.subtasks.len() == before {
            return false;
        }
        self.notify();
        true
    }

    /// Drop every task and the whole expanded set. Confirmation is the
    /// caller's responsibility.
    pub fn clear_all(&mut self) -> bool {
        if self.tasks.is_empty() && self.expanded.is_empty() {
            return false;
        }
        self.tasks.clear();
        self.expanded.clear();
        self.notify();
        true
    }

    /// Flip a task id's membership in the expanded view-state set.
    pub fn toggle_expanded(&mut self, task_id: u64) -> bool {
        if !self.expanded.shift_remove(&task_id) {
            self.expanded.insert(task_id);
        }
        self.notify();
        true
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, task_id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn is_expanded(&self, task_id: u64) -> bool {
        self.expanded.contains(&task_id)
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
