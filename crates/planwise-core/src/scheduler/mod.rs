//! Weekly schedule packing.
//!
//! Distributes open tasks across a seven-day horizon honoring per-day
//! capacity and work-day membership. A task too large for the remaining
//! capacity of a day is split into exactly two segments on consecutive
//! calendar days, provided at least an hour of capacity is left; otherwise
//! packing stops for that day (first fit with early stop, not best fit).
//!
//! Known quirk, kept on purpose and covered by tests: the second segment of
//! a split lands on the next calendar day without a work-day check, so it
//! can occupy a non-work day. Whether that is slack absorption or a defect
//! in the product model is an open question; the behavior is contractual
//! until it is resolved.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;
use crate::task::{SubTask, TaskWithSubTasks};
use crate::urgency::ScoredTask;

/// Minimum remaining capacity, in minutes, worth opening a split for.
pub const MIN_SPLIT_MINUTES: u32 = 60;

/// One entry in the packed week.
///
/// A closed two-variant union: every consumer must handle both the whole
/// task case and the split-segment case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduledItem {
    /// The whole task (parent-first total) fits the day
    Full {
        task: TaskWithSubTasks,
        date: NaiveDate,
    },
    /// One of exactly two segments of a task split across consecutive days
    Split {
        task: TaskWithSubTasks,
        /// Size of this segment in minutes
        minutes: u32,
        date: NaiveDate,
        /// Segment number, 1 or 2
        part: u8,
    },
}

impl ScheduledItem {
    /// The calendar day this item occupies.
    pub fn scheduled_date(&self) -> NaiveDate {
        match self {
            ScheduledItem::Full { date, .. } => *date,
            ScheduledItem::Split { date, .. } => *date,
        }
    }

    /// Minutes this item consumes on its day.
    pub fn estimated_minutes(&self) -> u32 {
        match self {
            ScheduledItem::Full { task, .. } => task.total_estimated_minutes(),
            ScheduledItem::Split { minutes, .. } => *minutes,
        }
    }

    /// The underlying task aggregate.
    pub fn task(&self) -> &TaskWithSubTasks {
        match self {
            ScheduledItem::Full { task, .. } => task,
            ScheduledItem::Split { task, .. } => task,
        }
    }

    /// Whether this is a split segment.
    pub fn is_split(&self) -> bool {
        matches!(self, ScheduledItem::Split { .. })
    }
}

/// Stateless week packer.
pub struct WeeklyScheduler;

impl WeeklyScheduler {
    /// Days in the packing horizon.
    const HORIZON_DAYS: i64 = 7;

    /// Pack open tasks into a seven-day schedule starting at `start`.
    ///
    /// `start` is normalized to its calendar date (midnight). Non-work days
    /// get an empty bucket and consume a horizon slot. Tasks left over
    /// after day seven are absent from the result; surfacing them as
    /// backlog is the caller's job.
    pub fn schedule_week(
        scored: &[ScoredTask],
        sub_tasks: &[SubTask],
        profile: &UserProfile,
        start: DateTime<Utc>,
    ) -> BTreeMap<NaiveDate, Vec<ScheduledItem>> {
        let start = start.date_naive();

        // Remaining queue, highest urgency first. The sort must be stable:
        // equal scores keep their snapshot order, and the packing result is
        // order sensitive.
        let mut queue: Vec<TaskWithSubTasks> = {
            let mut ranked: Vec<&ScoredTask> =
                scored.iter().filter(|s| s.is_actionable()).collect();
            ranked.sort_by(|a, b| b.urgency_score.cmp(&a.urgency_score));
            ranked
                .into_iter()
                .map(|s| TaskWithSubTasks::assemble(s.task.clone(), sub_tasks))
                .collect()
        };

        let mut schedule: BTreeMap<NaiveDate, Vec<ScheduledItem>> = BTreeMap::new();

        for offset in 0..Self::HORIZON_DAYS {
            let date = start + Duration::days(offset);
            // The bucket may already hold a split continuation from the
            // previous day; never clear it.
            schedule.entry(date).or_default();

            if !profile.is_work_day(date) {
                continue;
            }

            let mut available = profile.daily_work_minutes();

            // Index-based scan over the remaining queue; placing a task
            // removes it so it is never reconsidered on a later day.
            let mut idx = 0;
            while idx < queue.len() {
                let total = queue[idx].total_estimated_minutes();

                if total <= available {
                    let task = queue.remove(idx);
                    available -= total;
                    schedule
                        .entry(date)
                        .or_default()
                        .push(ScheduledItem::Full { task, date });
                    // Queue shifted left; idx now points at the next task.
                } else if available >= MIN_SPLIT_MINUTES {
                    let task = queue.remove(idx);
                    let next_date = date + Duration::days(1);
                    schedule.entry(date).or_default().push(ScheduledItem::Split {
                        task: task.clone(),
                        minutes: available,
                        date,
                        part: 1,
                    });
                    // Continuation goes to the very next calendar day,
                    // work day or not.
                    schedule.entry(next_date).or_default().push(ScheduledItem::Split {
                        task,
                        minutes: total - available,
                        date: next_date,
                        part: 2,
                    });
                    // The split fills the day exactly.
                    break;
                } else {
                    // Under an hour left and the task does not fit: stop
                    // packing this day rather than hunting for a filler.
                    break;
                }
            }
        }

        schedule
    }

    /// Simple 1-D workload balancing over uniform-capacity buckets.
    ///
    /// Ignores subtasks and never splits. A task that does not fit the
    /// current bucket advances to the next one (capacity resets); if it
    /// does not fit there either it is dropped. Tasks remaining once the
    /// buckets run out are dropped too — callers must not assume every
    /// input task appears in the result.
    pub fn balance_workload(
        scored: &[ScoredTask],
        daily_capacity_minutes: u32,
        days: usize,
    ) -> Vec<Vec<ScoredTask>> {
        let mut buckets: Vec<Vec<ScoredTask>> = vec![Vec::new(); days];
        if days == 0 {
            return buckets;
        }

        let mut ranked: Vec<&ScoredTask> = scored.iter().filter(|s| s.is_actionable()).collect();
        ranked.sort_by(|a, b| b.urgency_score.cmp(&a.urgency_score));

        let mut bucket = 0;
        let mut used = 0u32;
        for candidate in ranked {
            let estimated = candidate.task.estimated_minutes;
            if estimated <= daily_capacity_minutes.saturating_sub(used) {
                used += estimated;
                buckets[bucket].push(candidate.clone());
            } else {
                bucket += 1;
                if bucket >= days {
                    break;
                }
                used = 0;
                if estimated <= daily_capacity_minutes {
                    used = estimated;
                    buckets[bucket].push(candidate.clone());
                }
                // Otherwise the task is dropped; keep filling this bucket.
            }
        }

        buckets
    }
}
