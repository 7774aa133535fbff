use serde::{Deserialize, Serialize};

/// Priority score derived from the urgent/important flag pair.
///
/// Urgency weighs double so the four combinations map onto the
/// distinct values 3, 2, 1, 0. The score is the sort key for the
/// task list (higher sorts first).
pub fn score(urgent: bool, important: bool) -> u8 {
    (urgent as u8) * 2 + (important as u8)
}

/// Eisenhower-matrix quadrant for a flag pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Urgent and important
    Do,
    /// Important, not urgent
    Schedule,
    /// Urgent, not important
    Delegate,
    /// Neither
    Eliminate,
}

impl Quadrant {
    pub fn from_flags(urgent: bool, important: bool) -> Quadrant {
        match (urgent, important) {
            (true, true) => Quadrant::Do,
            (false, true) => Quadrant::Schedule,
            (true, false) => Quadrant::Delegate,
            (false, false) => Quadrant::Eliminate,
        }
    }

    /// Marker character shown in listings
    pub fn marker(self) -> char {
        match self {
            Quadrant::Do => '!',
            Quadrant::Schedule => '+',
            Quadrant::Delegate => '>',
            Quadrant::Eliminate => '.',
        }
    }

    /// Display label (pt-BR, like the rest of the user-facing strings)
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::Do => "faça agora",
            Quadrant::Schedule => "agende",
            Quadrant::Delegate => "delegue",
            Quadrant::Eliminate => "elimine",
        }
    }
}

/// A checkable step inside a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(id: u64, text: String) -> Self {
        Subtask {
            id,
            text,
            completed: false,
        }
    }
}

/// A task with its priority flags and subtasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    /// Fixed at creation, not editable afterward
    pub urgent: bool,
    /// Fixed at creation, not editable afterward
    pub important: bool,
    /// Computed once at creation from the flags, never recomputed
    pub score: u8,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: u64, text: String, urgent: bool, important: bool) -> Self {
        Task {
            id,
            text,
            urgent,
            important,
            score: score(urgent, important),
            subtasks: Vec::new(),
            completed: false,
        }
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::from_flags(self.urgent, self.important)
    }
}
