//! Project risk assessment and completion forecasting.
//!
//! Risk compares the remaining workload of a project against the work
//! capacity left before its deadline. The work-week approximation maps
//! calendar days to work days at a 5/7 ratio rather than consulting the
//! profile's actual work-day set; the completion forecast likewise ignores
//! weekends. Both are deliberate simplifications carried over from the
//! product's planning model and are covered by tests as specified behavior.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;
use crate::project::Project;
use crate::task::{SubTask, Task, TaskWithSubTasks};

/// Qualitative risk classification for a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRisk {
    /// Workload comfortably fits the remaining capacity
    OnTrack,
    /// Utilization above 85%, little slack left
    Warning,
    /// Deadline passed, or utilization above 120%
    AtRisk,
}

/// Recomputed project view: risk plus denormalized counts and totals.
///
/// Never persisted; derive it fresh from the current snapshot whenever the
/// underlying tasks change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectHealth {
    /// Project ID this view was computed for
    pub project_id: String,
    /// Current risk classification
    pub risk: ProjectRisk,
    /// Number of live (non-archived) tasks in the project
    pub total_tasks: usize,
    /// Number of completed tasks among them
    pub completed_tasks: usize,
    /// Completion progress in percent
    pub progress_percent: u32,
    /// Remaining minutes of work across undone tasks
    pub time_needed_minutes: u32,
}

/// Stateless project risk assessor.
pub struct RiskAssessor;

impl RiskAssessor {
    /// Utilization above this is AtRisk.
    const CRITICAL_UTILIZATION: f64 = 1.2;
    /// Utilization above this (but under critical) is Warning.
    const WARNING_UTILIZATION: f64 = 0.85;

    /// Classify the project's deadline risk.
    ///
    /// No deadline reads as on track. A deadline already behind us is
    /// terminal AtRisk with no further computation.
    pub fn assess(
        project: &Project,
        tasks: &[Task],
        sub_tasks: &[SubTask],
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> ProjectRisk {
        let Some(deadline) = project.deadline else {
            return ProjectRisk::OnTrack;
        };
        if deadline < now {
            return ProjectRisk::AtRisk;
        }

        let time_needed = Self::time_needed_minutes(project, tasks, sub_tasks);

        let calendar_days_left = (deadline - now).num_days();
        // 5-day work week approximated from calendar days, floor of one.
        let work_days_left = (calendar_days_left * 5 / 7).max(1);
        let available_minutes = work_days_left * profile.daily_work_minutes() as i64;

        let utilization = time_needed as f64 / available_minutes.max(1) as f64;
        if utilization > Self::CRITICAL_UTILIZATION {
            ProjectRisk::AtRisk
        } else if utilization > Self::WARNING_UTILIZATION {
            ProjectRisk::Warning
        } else {
            ProjectRisk::OnTrack
        }
    }

    /// Forecast the completion date from remaining work and daily capacity.
    ///
    /// Whole days only: the fractional day is truncated. Work-day
    /// membership and weekends are ignored by design.
    pub fn predict_completion(
        project: &Project,
        tasks: &[Task],
        sub_tasks: &[SubTask],
        daily_capacity_minutes: u32,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let remaining: u32 = Self::project_tasks(project, tasks)
            .filter(|t| !t.done && !t.is_blocked())
            .map(|t| TaskWithSubTasks::assemble(t.clone(), sub_tasks).remaining_minutes())
            .sum();

        let days_needed = (remaining as f64 / daily_capacity_minutes.max(1) as f64) as i64;
        now + Duration::days(days_needed)
    }

    /// Whether the forecast misses the project deadline.
    pub fn will_miss_deadline(project: &Project, predicted_completion: DateTime<Utc>) -> bool {
        project
            .deadline
            .map(|d| predicted_completion > d)
            .unwrap_or(false)
    }

    /// Compute the full recomputed view for a project.
    pub fn health(
        project: &Project,
        tasks: &[Task],
        sub_tasks: &[SubTask],
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> ProjectHealth {
        let live: Vec<&Task> = Self::project_tasks(project, tasks)
            .filter(|t| !t.archived)
            .collect();
        let total_tasks = live.len();
        let completed_tasks = live.iter().filter(|t| t.done).count();
        let progress_percent = if total_tasks == 0 {
            0
        } else {
            (completed_tasks * 100 / total_tasks) as u32
        };

        ProjectHealth {
            project_id: project.id.clone(),
            risk: Self::assess(project, tasks, sub_tasks, profile, now),
            total_tasks,
            completed_tasks,
            progress_percent,
            time_needed_minutes: Self::time_needed_minutes(project, tasks, sub_tasks),
        }
    }

    /// Remaining minutes across the project's undone tasks, parent-first.
    fn time_needed_minutes(project: &Project, tasks: &[Task], sub_tasks: &[SubTask]) -> u32 {
        Self::project_tasks(project, tasks)
            .filter(|t| !t.done)
            .map(|t| TaskWithSubTasks::assemble(t.clone(), sub_tasks).remaining_minutes())
            .sum()
    }

    fn project_tasks<'a>(
        project: &'a Project,
        tasks: &'a [Task],
    ) -> impl Iterator<Item = &'a Task> {
        tasks
            .iter()
            .filter(move |t| t.project_id.as_deref() == Some(project.id.as_str()))
    }
}
