//! Task and subtask types.
//!
//! A [`Task`] is the persisted record supplied by the surrounding storage
//! layer. Everything derived from it (urgency, remaining time, progress) is
//! recomputed on demand and never written back by this crate.
//!
//! [`TaskWithSubTasks`] is the ephemeral aggregate used wherever subtask
//! time has to be folded into a task's budget. The parent-first estimation
//! rule lives there and nowhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority, five levels.
///
/// Variants are declared in ascending order so the derived `Ord` ranks
/// `Critical` highest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Immediate,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Task severity, four levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

/// A single task as stored by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Optional owning project ID
    pub project_id: Option<String>,
    /// Task title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Task priority
    pub priority: Priority,
    /// Task severity
    pub severity: Severity,
    /// Estimated duration in minutes
    pub estimated_minutes: u32,
    /// Minutes already worked
    pub actual_minutes: u32,
    /// Optional absolute deadline
    pub deadline: Option<DateTime<Utc>>,
    /// Whether the task is completed
    pub done: bool,
    /// Whether the task is archived
    pub archived: bool,
    /// Whether an explicit blocker is set
    pub has_blocker: bool,
    /// Free-form blocker description
    pub blocker_description: Option<String>,
    /// Who or what the task is waiting for
    pub waiting_for: Option<String>,
    /// How many times the task rolled over unfinished to the next day
    pub moved_to_next_day: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Completion timestamp (null if not completed)
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task with default values.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            project_id: None,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            severity: Severity::default(),
            estimated_minutes: 0,
            actual_minutes: 0,
            deadline: None,
            done: false,
            archived: false,
            has_blocker: false,
            blocker_description: None,
            waiting_for: None,
            moved_to_next_day: 0,
            created_at: now,
            completed_at: None,
        }
    }

    /// A task is blocked when an explicit blocker is set or it is waiting
    /// on someone (non-blank `waiting_for`).
    pub fn is_blocked(&self) -> bool {
        self.has_blocker
            || self
                .waiting_for
                .as_deref()
                .map(|w| !w.trim().is_empty())
                .unwrap_or(false)
    }

    /// Minutes still needed, never negative.
    pub fn remaining_minutes(&self) -> u32 {
        self.estimated_minutes.saturating_sub(self.actual_minutes)
    }

    /// Progress percentage, capped at 99 until the task is done.
    pub fn progress_percent(&self) -> u32 {
        if self.done {
            return 100;
        }
        if self.estimated_minutes == 0 {
            return 0;
        }
        let pct = (self.actual_minutes as u64 * 100) / self.estimated_minutes as u64;
        (pct as u32).min(99)
    }

    /// Whether the deadline has already passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.deadline.map(|d| d < now).unwrap_or(false)
    }

    /// Whether the deadline falls on today's UTC calendar date.
    pub fn is_due_today(&self, now: DateTime<Utc>) -> bool {
        self.deadline
            .map(|d| d.date_naive() == now.date_naive())
            .unwrap_or(false)
    }

    /// Whether the deadline falls on tomorrow's UTC calendar date.
    pub fn is_due_tomorrow(&self, now: DateTime<Utc>) -> bool {
        self.deadline
            .map(|d| d.date_naive() == now.date_naive() + chrono::Duration::days(1))
            .unwrap_or(false)
    }
}

/// A subtask owned by exactly one task.
///
/// Cascade deletion with the parent is the persistence layer's contract;
/// this crate only ever reads subtask snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTask {
    /// Unique identifier
    pub id: String,
    /// Owning task ID
    pub task_id: String,
    /// Subtask title
    pub title: String,
    /// Estimated duration in hours (fractional)
    pub estimated_hours: f64,
    /// Minutes already worked
    pub actual_minutes: u32,
    /// Subtask priority
    pub priority: Priority,
    /// Subtask severity
    pub severity: Severity,
    /// Optional absolute deadline
    pub deadline: Option<DateTime<Utc>>,
    /// Whether the subtask is completed
    pub done: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Completion timestamp (null if not completed)
    pub completed_at: Option<DateTime<Utc>>,
}

impl SubTask {
    /// Create a new subtask under the given task.
    pub fn new(task_id: impl Into<String>, title: impl Into<String>, estimated_hours: f64) -> Self {
        let now = Utc::now();
        SubTask {
            id: format!("subtask-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            task_id: task_id.into(),
            title: title.into(),
            estimated_hours,
            actual_minutes: 0,
            priority: Priority::default(),
            severity: Severity::default(),
            deadline: None,
            done: false,
            created_at: now,
            completed_at: None,
        }
    }

    /// Estimated duration converted to whole minutes.
    pub fn estimated_minutes(&self) -> u32 {
        (self.estimated_hours * 60.0) as u32
    }
}

/// A task together with its live (undone) subtasks.
///
/// Computed, never stored. All time totals follow the parent-first rule:
/// a nonzero task estimate overrides the sum of subtask estimates, while
/// actual minutes always accumulate from both levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWithSubTasks {
    /// The wrapped task
    pub task: Task,
    /// Live subtasks belonging to the task
    pub sub_tasks: Vec<SubTask>,
}

impl TaskWithSubTasks {
    /// Assemble the aggregate from a task and the full subtask snapshot.
    ///
    /// Only undone subtasks of this task are retained.
    pub fn assemble(task: Task, all_sub_tasks: &[SubTask]) -> Self {
        let sub_tasks = all_sub_tasks
            .iter()
            .filter(|s| s.task_id == task.id && !s.done)
            .cloned()
            .collect();
        TaskWithSubTasks { task, sub_tasks }
    }

    /// Total estimate in minutes, parent-first.
    pub fn total_estimated_minutes(&self) -> u32 {
        if self.task.estimated_minutes > 0 {
            self.task.estimated_minutes
        } else {
            self.sub_tasks.iter().map(|s| s.estimated_minutes()).sum()
        }
    }

    /// Total worked minutes across the task and its subtasks.
    pub fn total_actual_minutes(&self) -> u32 {
        self.task.actual_minutes + self.sub_tasks.iter().map(|s| s.actual_minutes).sum::<u32>()
    }

    /// Minutes still needed, never negative.
    pub fn remaining_minutes(&self) -> u32 {
        self.total_estimated_minutes()
            .saturating_sub(self.total_actual_minutes())
    }
}
