//! Capacity planning and task recommendation.
//!
//! Every operation here consumes the annotated [`ScoredTask`] view plus an
//! externally computed "available minutes today" budget, and works over
//! tasks that are neither done nor blocked unless stated otherwise.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;
use crate::task::{SubTask, TaskWithSubTasks};
use crate::urgency::ScoredTask;

/// Capacity warning emitted for the day view.
///
/// Several warnings can co-occur; they are emitted in a fixed order:
/// workload, capacity, approaching deadline, overdue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Open workload exceeds 1.5x the available budget
    HighWorkload {
        estimated_minutes: u32,
        available_minutes: u32,
    },
    /// Less than 30% of a normal work day remains available
    LowCapacity {
        available_minutes: u32,
        daily_work_minutes: u32,
    },
    /// Some open task is due within the next 24 hours
    DeadlineApproaching { task_id: String, hours_left: i64 },
    /// Some open task is past its deadline
    Overdue { task_id: String },
}

/// Stateless capacity and recommendation engine.
pub struct CapacityEngine;

impl CapacityEngine {
    /// Maximum number of tasks selected for a single day.
    const DAILY_TASK_CAP: usize = 10;

    /// Urgency floor above which a task counts toward ranged workload.
    const WORKLOAD_SCORE_FLOOR: u8 = 30;

    /// Total estimated workload for a date range.
    ///
    /// A task is selected when its deadline falls within the range, it is
    /// already overdue relative to the range start, it is in progress, or
    /// its urgency score is at least 30. For a selected task with a zero
    /// estimate the live subtask minutes are summed instead, per the
    /// parent-first rule, so subtask time is never double counted.
    pub fn workload_for_range(
        scored: &[ScoredTask],
        sub_tasks: &[SubTask],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> u32 {
        scored
            .iter()
            .filter(|s| s.is_actionable())
            .filter(|s| {
                let in_range = s
                    .task
                    .deadline
                    .map(|d| d >= start && d <= end)
                    .unwrap_or(false);
                let overdue = s.task.deadline.map(|d| d < start).unwrap_or(false);
                in_range
                    || overdue
                    || s.task.actual_minutes > 0
                    || s.urgency_score >= Self::WORKLOAD_SCORE_FLOOR
            })
            .map(|s| {
                if s.task.estimated_minutes > 0 {
                    s.task.estimated_minutes
                } else {
                    sub_tasks
                        .iter()
                        .filter(|sub| sub.task_id == s.task.id && !sub.done)
                        .map(|sub| sub.estimated_minutes())
                        .sum()
                }
            })
            .sum()
    }

    /// Pick the single task to focus on right now.
    ///
    /// Prefers the highest-urgency task that fits the budget; falls back to
    /// the global highest-urgency task when nothing fits.
    pub fn recommend_focus_task(scored: &[ScoredTask], available_minutes: u32) -> Option<&ScoredTask> {
        let eligible = || scored.iter().filter(|s| s.is_actionable());

        eligible()
            .filter(|s| s.task.estimated_minutes <= available_minutes)
            .max_by_key(|s| s.urgency_score)
            .or_else(|| eligible().max_by_key(|s| s.urgency_score))
    }

    /// Greedy urgency-first selection of tasks for today.
    ///
    /// Consumes the budget in descending urgency order; a task that does
    /// not fit is skipped (its minutes are not reserved) and smaller tasks
    /// further down the ranking may still be taken. At most ten tasks are
    /// selected. This is bin-filling, not optimal knapsack.
    pub fn tasks_for_today(
        scored: &[ScoredTask],
        sub_tasks: &[SubTask],
        available_minutes: u32,
    ) -> Vec<ScoredTask> {
        let mut ranked: Vec<&ScoredTask> = scored.iter().filter(|s| s.is_actionable()).collect();
        // Stable sort keeps input order across equal scores.
        ranked.sort_by(|a, b| b.urgency_score.cmp(&a.urgency_score));

        let mut remaining = available_minutes;
        let mut selected = Vec::new();
        for candidate in ranked {
            if selected.len() >= Self::DAILY_TASK_CAP {
                break;
            }
            let total = TaskWithSubTasks::assemble(candidate.task.clone(), sub_tasks)
                .total_estimated_minutes();
            if total <= remaining {
                remaining -= total;
                selected.push(candidate.clone());
            }
        }
        selected
    }

    /// Decide whether a task deserves attention right now.
    ///
    /// With a deadline: overdue, or due within 24 hours and fitting the
    /// budget, or urgency at least 60. Without one the decision falls back
    /// to an urgency floor of 40.
    pub fn should_work_on_task(
        scored: &ScoredTask,
        available_minutes: u32,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(deadline) = scored.task.deadline else {
            return scored.urgency_score >= 40;
        };

        if deadline < now {
            return true;
        }
        let minutes_left = (deadline - now).num_minutes();
        if minutes_left <= 24 * 60 && scored.task.estimated_minutes <= available_minutes {
            return true;
        }
        scored.urgency_score >= 60
    }

    /// Collect capacity warnings for the day.
    pub fn warnings(
        scored: &[ScoredTask],
        available_minutes: u32,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> Vec<Warning> {
        let mut warnings = Vec::new();
        let open: Vec<&ScoredTask> = scored.iter().filter(|s| s.is_actionable()).collect();

        let total_estimated: u32 = open.iter().map(|s| s.task.estimated_minutes).sum();
        if total_estimated as f64 > 1.5 * available_minutes as f64 {
            warnings.push(Warning::HighWorkload {
                estimated_minutes: total_estimated,
                available_minutes,
            });
        }

        let daily = profile.daily_work_minutes();
        if (available_minutes as f64) < 0.3 * daily as f64 {
            warnings.push(Warning::LowCapacity {
                available_minutes,
                daily_work_minutes: daily,
            });
        }

        if let Some(approaching) = open.iter().find(|s| {
            s.task
                .deadline
                .map(|d| {
                    let minutes_left = (d - now).num_minutes();
                    minutes_left > 0 && minutes_left <= 24 * 60
                })
                .unwrap_or(false)
        }) {
            let hours_left = (approaching.task.deadline.unwrap() - now).num_hours();
            warnings.push(Warning::DeadlineApproaching {
                task_id: approaching.task.id.clone(),
                hours_left,
            });
        }

        if let Some(overdue) = open.iter().find(|s| s.task.is_overdue(now)) {
            warnings.push(Warning::Overdue {
                task_id: overdue.task.id.clone(),
            });
        }

        warnings
    }

    /// Undone tasks needing attention: blocked, due soon, chronically
    /// postponed, or very urgent. Blocked tasks score 0 but still appear
    /// here so the caller can surface them.
    pub fn tasks_needing_attention(scored: &[ScoredTask], now: DateTime<Utc>) -> Vec<ScoredTask> {
        let mut needing: Vec<ScoredTask> = scored
            .iter()
            .filter(|s| !s.task.done)
            .filter(|s| {
                let due_soon = s
                    .task
                    .deadline
                    .map(|d| {
                        let minutes_left = (d - now).num_minutes();
                        minutes_left > 0 && minutes_left <= 24 * 60
                    })
                    .unwrap_or(false);
                s.task.is_blocked()
                    || due_soon
                    || s.task.moved_to_next_day >= 3
                    || s.urgency_score >= 75
            })
            .cloned()
            .collect();
        needing.sort_by(|a, b| b.urgency_score.cmp(&a.urgency_score));
        needing
    }
}
