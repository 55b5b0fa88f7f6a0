//! Urgency scoring engine.
//!
//! Converts a task plus today's available minutes into a normalized
//! 0-100 urgency score, a coarse level, and a human-readable reason.
//!
//! Score composition:
//! - priority contributes up to 30 points
//! - severity contributes up to 20 points
//! - deadline pressure contributes up to 40 points
//! - momentum/fit bonus contributes up to 10 points
//! - anti-starvation boost adds `min(moved x 2, 10)` on top
//!
//! The accumulator runs in f64 and is truncated (not rounded) before the
//! final clamp to [0, 100]. A done or blocked task scores 0 before any
//! other factor is evaluated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Severity, Task};

/// Coarse urgency classification derived from the numeric score.
///
/// Thresholds are strict lower bounds evaluated top-down, first match wins:
/// Critical >= 85, VeryHigh >= 70, High >= 50, Medium >= 30, Low otherwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    VeryHigh,
    Critical,
}

impl UrgencyLevel {
    /// Classify a 0-100 score.
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            UrgencyLevel::Critical
        } else if score >= 70 {
            UrgencyLevel::VeryHigh
        } else if score >= 50 {
            UrgencyLevel::High
        } else if score >= 30 {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        }
    }
}

/// A task annotated with its recomputed urgency view.
///
/// This is the value every downstream component consumes. Urgency is never
/// written back onto the stored [`Task`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTask {
    /// The underlying task snapshot
    pub task: Task,
    /// Normalized urgency score, 0-100
    pub urgency_score: u8,
    /// Coarse urgency level
    pub urgency_level: UrgencyLevel,
    /// Human-readable explanation of the dominant factor
    pub urgency_reason: String,
}

impl ScoredTask {
    /// Whether this task can be worked on at all.
    pub fn is_actionable(&self) -> bool {
        !self.task.done && !self.task.is_blocked()
    }
}

/// Stateless urgency scoring engine.
pub struct UrgencyEngine;

impl UrgencyEngine {
    /// Moves beyond this count read as chronic procrastination.
    const CHRONIC_MOVE_THRESHOLD: u32 = 3;

    /// Score a single task against today's available minutes.
    pub fn score(task: &Task, available_minutes_today: u32, now: DateTime<Utc>) -> u8 {
        // Done or blocked short-circuits every other factor.
        if task.done || task.is_blocked() {
            return 0;
        }

        let mut score = Self::priority_points(task.priority) + Self::severity_points(task.severity);
        score += Self::time_pressure_points(task, now);

        // Momentum/fit bonus
        if task.actual_minutes > 0 {
            score += 5.0;
        }
        if task.estimated_minutes <= available_minutes_today {
            score += 5.0;
        }

        // Anti-starvation boost for tasks that keep rolling over
        score += (task.moved_to_next_day * 2).min(10) as f64;

        // Truncate the accumulator, then clamp.
        (score as i64).clamp(0, 100) as u8
    }

    /// Human explanation for the task's urgency, by condition priority.
    pub fn reason(task: &Task, now: DateTime<Utc>) -> String {
        if task.is_blocked() {
            return match task.waiting_for.as_deref().filter(|w| !w.trim().is_empty()) {
                Some(who) => format!("Blocked: waiting for {}", who),
                None => "Blocked by another task".to_string(),
            };
        }
        if task.done {
            return "Already completed".to_string();
        }
        if task.is_overdue(now) {
            return "Past its deadline".to_string();
        }
        if task.is_due_today(now) {
            return "Due today".to_string();
        }
        if task.is_due_tomorrow(now) {
            return "Due tomorrow".to_string();
        }
        if matches!(task.priority, Priority::Critical | Priority::Immediate) {
            return "High priority".to_string();
        }
        if task.actual_minutes > 0 {
            return "Already in progress".to_string();
        }
        if task.moved_to_next_day > Self::CHRONIC_MOVE_THRESHOLD {
            return format!("Postponed {} times", task.moved_to_next_day);
        }
        "Standard priority".to_string()
    }

    /// Annotate a whole snapshot, preserving input order.
    pub fn annotate(
        tasks: &[Task],
        available_minutes_today: u32,
        now: DateTime<Utc>,
    ) -> Vec<ScoredTask> {
        tasks
            .iter()
            .map(|task| {
                let score = Self::score(task, available_minutes_today, now);
                ScoredTask {
                    task: task.clone(),
                    urgency_score: score,
                    urgency_level: UrgencyLevel::from_score(score),
                    urgency_reason: Self::reason(task, now),
                }
            })
            .collect()
    }

    fn priority_points(priority: Priority) -> f64 {
        match priority {
            Priority::Critical => 30.0,
            Priority::Immediate => 25.0,
            Priority::High => 20.0,
            Priority::Medium => 10.0,
            Priority::Low => 5.0,
        }
    }

    fn severity_points(severity: Severity) -> f64 {
        match severity {
            Severity::Critical => 20.0,
            Severity::High => 15.0,
            Severity::Medium => 10.0,
            Severity::Low => 5.0,
        }
    }

    /// Deadline pressure contribution, up to 40 points.
    ///
    /// Monotonically climbs 35 -> 40 over the last 24 hours before the
    /// deadline; a missing deadline reads as a small flat contribution.
    fn time_pressure_points(task: &Task, now: DateTime<Utc>) -> f64 {
        let Some(deadline) = task.deadline else {
            return 5.0;
        };

        let hours_left = (deadline - now).num_minutes() as f64 / 60.0;
        if hours_left <= 0.0 {
            40.0
        } else if hours_left < 24.0 {
            35.0 + (1.0 - hours_left / 24.0) * 5.0
        } else if hours_left < 72.0 {
            25.0
        } else if hours_left < 168.0 {
            15.0
        } else {
            5.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn fixed_now() -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339("2026-03-02T12:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn make_task(priority: Priority, severity: Severity) -> Task {
        let mut task = Task::new("Test");
        task.priority = priority;
        task.severity = severity;
        task
    }

    #[test]
    fn done_task_scores_zero() {
        let now = fixed_now();
        let mut task = make_task(Priority::Critical, Severity::Critical);
        task.deadline = Some(now - Duration::hours(1));
        task.moved_to_next_day = 10;
        task.done = true;
        assert_eq!(UrgencyEngine::score(&task, 480, now), 0);
    }

    #[test]
    fn blocked_task_scores_zero() {
        let now = fixed_now();
        let mut task = make_task(Priority::Critical, Severity::Critical);
        task.deadline = Some(now - Duration::hours(1));
        task.waiting_for = Some("legal".to_string());
        assert_eq!(UrgencyEngine::score(&task, 480, now), 0);
    }

    #[test]
    fn baseline_score_without_deadline() {
        let now = fixed_now();
        let mut task = make_task(Priority::Medium, Severity::Medium);
        task.estimated_minutes = 600; // does not fit 480
        // 10 priority + 10 severity + 5 no-deadline = 25
        assert_eq!(UrgencyEngine::score(&task, 480, now), 25);
    }

    #[test]
    fn overdue_contributes_full_time_pressure() {
        let now = fixed_now();
        let mut task = make_task(Priority::Low, Severity::Low);
        task.estimated_minutes = 600;
        task.deadline = Some(now - Duration::minutes(1));
        // 5 + 5 + 40 = 50
        assert_eq!(UrgencyEngine::score(&task, 480, now), 50);
    }

    #[test]
    fn pressure_climbs_as_deadline_nears() {
        let now = fixed_now();
        let mut task = make_task(Priority::Low, Severity::Low);
        task.estimated_minutes = 600;

        task.deadline = Some(now + Duration::hours(23));
        let far = UrgencyEngine::score(&task, 480, now);
        task.deadline = Some(now + Duration::hours(1));
        let near = UrgencyEngine::score(&task, 480, now);
        assert!(near > far, "score must climb as the deadline nears");

        // 12h out: 35 + (1 - 0.5) * 5 = 37.5, truncated -> 47 with 5+5 base
        task.deadline = Some(now + Duration::hours(12));
        assert_eq!(UrgencyEngine::score(&task, 480, now), 47);
    }

    #[test]
    fn pressure_bands() {
        let now = fixed_now();
        let mut task = make_task(Priority::Low, Severity::Low);
        task.estimated_minutes = 600;

        task.deadline = Some(now + Duration::hours(48)); // <72h band
        assert_eq!(UrgencyEngine::score(&task, 480, now), 35); // 10 + 25
        task.deadline = Some(now + Duration::hours(100)); // <168h band
        assert_eq!(UrgencyEngine::score(&task, 480, now), 25); // 10 + 15
        task.deadline = Some(now + Duration::hours(500)); // far future
        assert_eq!(UrgencyEngine::score(&task, 480, now), 15); // 10 + 5
    }

    #[test]
    fn momentum_and_fit_bonuses() {
        let now = fixed_now();
        let mut task = make_task(Priority::Low, Severity::Low);
        task.estimated_minutes = 600;
        let base = UrgencyEngine::score(&task, 480, now);

        task.actual_minutes = 10;
        assert_eq!(UrgencyEngine::score(&task, 480, now), base + 5);

        task.estimated_minutes = 60; // now fits
        assert_eq!(UrgencyEngine::score(&task, 480, now), base + 10);
    }

    #[test]
    fn anti_starvation_boost_caps_at_ten() {
        let now = fixed_now();
        let mut task = make_task(Priority::Low, Severity::Low);
        task.estimated_minutes = 600;
        let base = UrgencyEngine::score(&task, 480, now);

        task.moved_to_next_day = 3;
        assert_eq!(UrgencyEngine::score(&task, 480, now), base + 6);

        task.moved_to_next_day = 50;
        assert_eq!(UrgencyEngine::score(&task, 480, now), base + 10);
    }

    #[test]
    fn score_clamps_at_one_hundred() {
        let now = fixed_now();
        let mut task = make_task(Priority::Critical, Severity::Critical);
        task.deadline = Some(now - Duration::hours(1));
        task.actual_minutes = 10;
        task.estimated_minutes = 30;
        task.moved_to_next_day = 20;
        // 30 + 20 + 40 + 5 + 5 + 10 = 110 -> clamped
        assert_eq!(UrgencyEngine::score(&task, 480, now), 100);
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(UrgencyLevel::from_score(85), UrgencyLevel::Critical);
        assert_eq!(UrgencyLevel::from_score(84), UrgencyLevel::VeryHigh);
        assert_eq!(UrgencyLevel::from_score(70), UrgencyLevel::VeryHigh);
        assert_eq!(UrgencyLevel::from_score(69), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::from_score(50), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::from_score(49), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_score(30), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_score(29), UrgencyLevel::Low);
        assert_eq!(UrgencyLevel::from_score(0), UrgencyLevel::Low);
    }

    #[test]
    fn reason_condition_priority() {
        let now = fixed_now();
        let mut task = make_task(Priority::Critical, Severity::Critical);
        task.deadline = Some(now - Duration::hours(1));
        task.actual_minutes = 10;
        task.moved_to_next_day = 5;

        // Blocked wins over everything
        task.waiting_for = Some("Sam".to_string());
        assert_eq!(UrgencyEngine::reason(&task, now), "Blocked: waiting for Sam");
        task.waiting_for = None;

        // Done beats overdue
        task.done = true;
        assert_eq!(UrgencyEngine::reason(&task, now), "Already completed");
        task.done = false;

        assert_eq!(UrgencyEngine::reason(&task, now), "Past its deadline");

        task.deadline = Some(now + Duration::hours(3));
        assert_eq!(UrgencyEngine::reason(&task, now), "Due today");

        task.deadline = Some(now + Duration::hours(24));
        assert_eq!(UrgencyEngine::reason(&task, now), "Due tomorrow");

        task.deadline = None;
        assert_eq!(UrgencyEngine::reason(&task, now), "High priority");

        task.priority = Priority::Medium;
        assert_eq!(UrgencyEngine::reason(&task, now), "Already in progress");

        task.actual_minutes = 0;
        assert_eq!(UrgencyEngine::reason(&task, now), "Postponed 5 times");

        task.moved_to_next_day = 0;
        assert_eq!(UrgencyEngine::reason(&task, now), "Standard priority");
    }

    #[test]
    fn annotate_preserves_order_and_attaches_levels() {
        let now = fixed_now();
        let mut urgent = make_task(Priority::Critical, Severity::Critical);
        urgent.deadline = Some(now + Duration::hours(2));
        let calm = make_task(Priority::Low, Severity::Low);

        let scored = UrgencyEngine::annotate(&[calm.clone(), urgent.clone()], 480, now);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].task.id, calm.id);
        assert_eq!(scored[1].task.id, urgent.id);
        assert!(scored[1].urgency_score > scored[0].urgency_score);
        assert_eq!(
            scored[1].urgency_level,
            UrgencyLevel::from_score(scored[1].urgency_score)
        );
    }

    fn arb_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![
            Just(Priority::Low),
            Just(Priority::Medium),
            Just(Priority::High),
            Just(Priority::Immediate),
            Just(Priority::Critical),
        ]
    }

    fn arb_severity() -> impl Strategy<Value = Severity> {
        prop_oneof![
            Just(Severity::Low),
            Just(Severity::Medium),
            Just(Severity::High),
            Just(Severity::Critical),
        ]
    }

    proptest! {
        #[test]
        fn score_is_always_in_bounds(
            priority in arb_priority(),
            severity in arb_severity(),
            estimated in 0u32..10_000,
            actual in 0u32..10_000,
            moved in 0u32..100,
            deadline_offset_hours in proptest::option::of(-1_000i64..1_000),
            done in any::<bool>(),
            has_blocker in any::<bool>(),
            available in 0u32..2_000,
        ) {
            let now = fixed_now();
            let mut task = Task::new("prop");
            task.priority = priority;
            task.severity = severity;
            task.estimated_minutes = estimated;
            task.actual_minutes = actual;
            task.moved_to_next_day = moved;
            task.deadline = deadline_offset_hours.map(|h| now + Duration::hours(h));
            task.done = done;
            task.has_blocker = has_blocker;

            let score = UrgencyEngine::score(&task, available, now);
            prop_assert!(score <= 100);
            if done || has_blocker {
                prop_assert_eq!(score, 0);
            }
        }
    }
}
