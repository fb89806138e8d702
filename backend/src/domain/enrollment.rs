//! Enrollment state and the progress workflow.
//!
//! An enrollment links a learner to a course and tracks a completion
//! percentage. The workflow is:
//!
//! ```text
//! not enrolled -> enrolled(0) -> in progress(0..100) -> completed(100)
//! ```
//!
//! ## Invariants
//! - One enrollment per (user, course) pair.
//! - `progress_percent` never decreases.
//! - `completed_at` is set exactly once, when progress first reaches 100.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::profile::UserId;
use super::progress::rounded_percent;

/// Progress reached when every lesson is complete.
pub const COMPLETE_PERCENT: u8 = 100;

/// A learner's membership in a course.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    /// Enrolled learner.
    pub user_id: UserId,
    /// Course being taken.
    pub course_id: Uuid,
    /// Completion percentage in [0, 100].
    pub progress_percent: u8,
    /// Enrollment timestamp.
    pub enrolled_at: DateTime<Utc>,
    /// Set exactly once, when progress first reaches 100.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    /// Fresh enrollment at zero progress.
    pub fn new(user_id: UserId, course_id: Uuid, enrolled_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            course_id,
            progress_percent: 0,
            enrolled_at,
            completed_at: None,
        }
    }

    /// Whether the course has been completed.
    pub const fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Apply a freshly computed percentage.
    ///
    /// The stored percentage only moves forward (last-write-wins races on
    /// the lesson-progress table must not drag a finished course backwards),
    /// and an existing completion timestamp is never overwritten.
    pub fn apply_progress(&mut self, percent: u8, now: DateTime<Utc>) {
        let percent = percent.min(COMPLETE_PERCENT);
        if percent > self.progress_percent {
            self.progress_percent = percent;
        }
        if self.progress_percent == COMPLETE_PERCENT && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Recompute and apply progress from lesson counts.
    ///
    /// Returns the (possibly unchanged) stored percentage.
    pub fn apply_lesson_counts(
        &mut self,
        completed_lessons: u64,
        total_lessons: u64,
        now: DateTime<Utc>,
    ) -> u8 {
        self.apply_progress(rounded_percent(completed_lessons, total_lessons), now);
        self.progress_percent
    }
}

/// Per-learner, per-lesson completion record.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonProgress {
    /// Learner.
    pub user_id: UserId,
    /// Lesson the record refers to.
    pub lesson_id: Uuid,
    /// Course the lesson belongs to (denormalised for counting).
    pub course_id: Uuid,
    /// Whether the lesson counts towards course progress.
    pub completed: bool,
    /// Accumulated watch time, in seconds.
    pub watch_time_seconds: i32,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
