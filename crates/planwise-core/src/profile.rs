//! User profile: work hours, work days, and daily capacity.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Singleton user profile supplied whole to every capacity computation.
///
/// Presentation fields (name, role, language) pass through untouched; the
/// engine only reads the work-hour range and work-day membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Role description (presentation only)
    pub role: String,
    /// UI language tag (presentation only)
    pub language: String,
    /// Work day start hour (0-23)
    pub start_work_hour: u32,
    /// Work day end hour (1-24), exclusive
    pub end_work_hour: u32,
    /// Working days of the week, 0=Sun .. 6=Sat
    pub work_days: Vec<u8>,
    /// Focus/do-not-disturb block length in minutes
    pub focus_dnd_minutes: u32,
    /// Current consecutive-day streak
    pub current_streak: u32,
    /// Best streak ever reached
    pub best_streak: u32,
}

impl UserProfile {
    /// Create a profile with the given work-hour range.
    ///
    /// Returns an error when the range is not a forward interval.
    pub fn new(start_work_hour: u32, end_work_hour: u32) -> Result<Self, ValidationError> {
        if end_work_hour <= start_work_hour {
            return Err(ValidationError::InvalidWorkHours {
                start: start_work_hour,
                end: end_work_hour,
            });
        }
        Ok(UserProfile {
            name: String::new(),
            role: String::new(),
            language: "en".to_string(),
            start_work_hour,
            end_work_hour,
            work_days: vec![1, 2, 3, 4, 5], // Mon-Fri
            focus_dnd_minutes: 0,
            current_streak: 0,
            best_streak: 0,
        })
    }

    /// Set the working days (0=Sun .. 6=Sat).
    pub fn with_work_days(mut self, days: Vec<u8>) -> Self {
        self.work_days = days;
        self
    }

    /// Minutes of work capacity in one work day.
    pub fn daily_work_minutes(&self) -> u32 {
        (self.end_work_hour - self.start_work_hour) * 60
    }

    /// Whether the given calendar date is a working day.
    pub fn is_work_day(&self, date: NaiveDate) -> bool {
        let day = date.weekday().num_days_from_sunday() as u8;
        self.work_days.contains(&day)
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        // 9-17 Mon-Fri; the unwrap cannot fail for a forward range.
        UserProfile::new(9, 17).expect("default work hours are a forward range")
    }
}
