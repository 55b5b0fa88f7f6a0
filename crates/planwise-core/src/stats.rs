//! Post-hoc productivity metrics over completed tasks.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Bundle of productivity scalars for a reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductivityReport {
    /// Mean estimation efficiency, 1.0 = perfect estimates
    pub efficiency: f64,
    /// Productivity score, typically 0-100
    pub productivity_score: i64,
    /// Tasks that contributed an efficiency sample
    pub eligible_tasks: usize,
    /// Total minutes worked in the period
    pub total_worked_minutes: u32,
    /// Total minutes that were available in the period
    pub total_available_minutes: u32,
}

/// Stateless productivity metrics calculator.
pub struct ProductivityTracker;

impl ProductivityTracker {
    /// Mean estimation efficiency over completed tasks.
    ///
    /// Each task with a nonzero estimate and nonzero actual contributes
    /// `1 - |1 - actual/estimate|`: a perfect estimate scores 1.0, double
    /// or half the estimate scores 0.0, and wildly wrong estimates can go
    /// negative. With no eligible task the result defaults to 1.0 — no
    /// signal reads as competent estimation.
    pub fn estimate_efficiency(completed: &[Task]) -> f64 {
        let samples: Vec<f64> = completed
            .iter()
            .filter(|t| t.estimated_minutes > 0 && t.actual_minutes > 0)
            .map(|t| {
                let ratio = t.actual_minutes as f64 / t.estimated_minutes as f64;
                1.0 - (1.0 - ratio).abs()
            })
            .collect();

        if samples.is_empty() {
            return 1.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Combined productivity score.
    ///
    /// Utilization (worked over available, capped at 1) times efficiency,
    /// scaled to 100 and rounded. Zero availability scores zero.
    pub fn productivity_score(
        total_worked_minutes: u32,
        total_available_minutes: u32,
        efficiency: f64,
    ) -> i64 {
        if total_available_minutes == 0 {
            return 0;
        }
        let utilization =
            (total_worked_minutes as f64 / total_available_minutes as f64).min(1.0);
        (utilization * efficiency * 100.0).round() as i64
    }

    /// Build a full report for a period.
    pub fn report(
        completed: &[Task],
        total_worked_minutes: u32,
        total_available_minutes: u32,
    ) -> ProductivityReport {
        let efficiency = Self::estimate_efficiency(completed);
        ProductivityReport {
            efficiency,
            productivity_score: Self::productivity_score(
                total_worked_minutes,
                total_available_minutes,
                efficiency,
            ),
            eligible_tasks: completed
                .iter()
                .filter(|t| t.estimated_minutes > 0 && t.actual_minutes > 0)
                .count(),
            total_worked_minutes,
            total_available_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_task(estimated: u32, actual: u32) -> Task {
        let mut task = Task::new("Done");
        task.estimated_minutes = estimated;
        task.actual_minutes = actual;
        task.done = true;
        task
    }

    #[test]
    fn no_tasks_defaults_to_perfect() {
        assert_eq!(ProductivityTracker::estimate_efficiency(&[]), 1.0);
    }

    #[test]
    fn perfect_estimate_scores_one() {
        let tasks = vec![completed_task(60, 60)];
        assert_eq!(ProductivityTracker::estimate_efficiency(&tasks), 1.0);
    }

    #[test]
    fn double_the_estimate_scores_zero() {
        let tasks = vec![completed_task(60, 120)];
        assert_eq!(ProductivityTracker::estimate_efficiency(&tasks), 0.0);
    }

    #[test]
    fn half_the_estimate_scores_half() {
        // actual/estimate = 0.5 -> 1 - 0.5 = 0.5
        let tasks = vec![completed_task(60, 30)];
        assert!((ProductivityTracker::estimate_efficiency(&tasks) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn wildly_wrong_estimates_go_negative() {
        let tasks = vec![completed_task(10, 100)];
        assert!(ProductivityTracker::estimate_efficiency(&tasks) < 0.0);
    }

    #[test]
    fn efficiency_averages_over_eligible_only() {
        let tasks = vec![
            completed_task(60, 60),  // 1.0
            completed_task(60, 120), // 0.0
            completed_task(0, 50),   // skipped: no estimate
            completed_task(50, 0),   // skipped: no actual
        ];
        assert!((ProductivityTracker::estimate_efficiency(&tasks) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn productivity_score_zero_when_no_availability() {
        assert_eq!(ProductivityTracker::productivity_score(100, 0, 1.0), 0);
    }

    #[test]
    fn productivity_score_caps_utilization() {
        // Worked more than available: utilization capped at 1.
        assert_eq!(ProductivityTracker::productivity_score(600, 480, 1.0), 100);
        assert_eq!(ProductivityTracker::productivity_score(240, 480, 1.0), 50);
        assert_eq!(ProductivityTracker::productivity_score(240, 480, 0.5), 25);
    }

    #[test]
    fn report_bundles_scalars() {
        let tasks = vec![completed_task(60, 60), completed_task(0, 10)];
        let report = ProductivityTracker::report(&tasks, 240, 480);
        assert_eq!(report.efficiency, 1.0);
        assert_eq!(report.productivity_score, 50);
        assert_eq!(report.eligible_tasks, 1);
        assert_eq!(report.total_worked_minutes, 240);
        assert_eq!(report.total_available_minutes, 480);
    }
}
