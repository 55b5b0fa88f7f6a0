//! # Planwise Core Library
//!
//! This library implements the priority-and-capacity scheduling engine of
//! the Planwise task manager. It turns a snapshot of tasks, subtasks,
//! projects, and a user profile into a normalized urgency score per task,
//! a day-by-day work schedule, project risk classifications, and
//! productivity metrics.
//!
//! ## Architecture
//!
//! Data flows one direction: the raw snapshot enters the
//! [`UrgencyEngine`], which produces [`ScoredTask`] annotations; every
//! downstream component — capacity planning, project risk, the weekly
//! scheduler, productivity stats — consumes the annotated view. All
//! computations are pure, synchronous transforms over immutable input;
//! callers recompute the whole view whenever the snapshot changes.
//! Persistence, UI, notifications, and calendar integration live outside
//! this crate; "available minutes today" arrives as an already computed
//! figure.
//!
//! ## Key Components
//!
//! - [`UrgencyEngine`]: 0-100 urgency scoring with level and reason
//! - [`CapacityEngine`]: day planning, focus recommendation, warnings
//! - [`RiskAssessor`]: project risk and completion forecasting
//! - [`WeeklyScheduler`]: seven-day bin packing with two-segment splits
//! - [`ProductivityTracker`]: post-hoc efficiency and productivity score

pub mod capacity;
pub mod error;
pub mod profile;
pub mod project;
pub mod risk;
pub mod scheduler;
pub mod stats;
pub mod task;
pub mod urgency;

pub use capacity::{CapacityEngine, Warning};
pub use error::{Result, ValidationError};
pub use profile::UserProfile;
pub use project::Project;
pub use risk::{ProjectHealth, ProjectRisk, RiskAssessor};
pub use scheduler::{ScheduledItem, WeeklyScheduler, MIN_SPLIT_MINUTES};
pub use stats::{ProductivityReport, ProductivityTracker};
pub use task::{Priority, Severity, SubTask, Task, TaskWithSubTasks};
pub use urgency::{ScoredTask, UrgencyEngine, UrgencyLevel};
