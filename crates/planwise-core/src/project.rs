//! Project entity.
//!
//! Derived project state (risk, task counts, progress, time needed) is not
//! stored here; it is recomputed as a [`crate::risk::ProjectHealth`] view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Priority;

/// A project grouping related tasks via a loose foreign key.
///
/// Task ownership does not cascade at this layer; deleting a project is the
/// persistence layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: String,
    /// Project name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional project deadline
    pub deadline: Option<DateTime<Utc>>,
    /// Project priority
    pub priority: Priority,
    /// Whether all tasks are completed
    pub completed: bool,
    /// Whether the user explicitly marked the project complete
    pub marked_complete: bool,
    /// Completion timestamp (null if not completed)
    pub completed_at: Option<DateTime<Utc>>,
    /// Whether the project is archived
    pub archived: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project with default values.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            id: format!("project-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            name: name.into(),
            description: None,
            deadline: None,
            priority: Priority::default(),
            completed: false,
            marked_complete: false,
            completed_at: None,
            archived: false,
            created_at: now,
        }
    }
}
