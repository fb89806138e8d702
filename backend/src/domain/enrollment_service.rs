//! Enrollment and progress workflow services.
//!
//! This is the heart of the platform: enrolling gated on subscription tier,
//! folding lesson updates into a monotonic course percentage, and firing the
//! completion notification exactly once.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::course::Course;
use crate::domain::enrollment::{Enrollment, LessonProgress};
use crate::domain::notification::Notification;
use crate::domain::ports::{
    CourseRepository, EnrollmentCommand, EnrollmentQuery, EnrollmentRepository,
    LessonProgressRepository, LessonRepository, LessonProgressUpdate, NotificationRepository,
    ProgressSnapshot, SubscriptionRepository,
};
use crate::domain::profile::UserId;
use crate::domain::subscription::SubscriptionTier;
use crate::domain::Error;

/// Days after enrollment at which the nudge reminder is scheduled.
const REMINDER_DELAY_DAYS: i64 = 3;

/// Repository-backed implementation of the enrollment ports.
#[derive(Clone)]
pub struct EnrollmentService {
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    lesson_progress: Arc<dyn LessonProgressRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl EnrollmentService {
    /// Create a new service over the workflow's repositories.
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        lesson_progress: Arc<dyn LessonProgressRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            courses,
            lessons,
            enrollments,
            lesson_progress,
            subscriptions,
            notifications,
        }
    }

    /// Tier the user currently holds, treating absence as free.
    async fn effective_tier(&self, user_id: UserId) -> Result<SubscriptionTier, Error> {
        let subscription = self.subscriptions.find_for_user(user_id).await?;
        Ok(subscription.map_or(SubscriptionTier::Free, |s| s.effective_tier()))
    }

    /// Build a snapshot from a stored enrollment and fresh lesson counts.
    async fn snapshot(&self, enrollment: &Enrollment) -> Result<ProgressSnapshot, Error> {
        let total = self.lessons.count_for_course(enrollment.course_id).await?;
        let completed = self
            .lesson_progress
            .count_completed(enrollment.user_id, enrollment.course_id)
            .await?;
        Ok(ProgressSnapshot {
            course_id: enrollment.course_id,
            progress_percent: enrollment.progress_percent,
            completed_lessons: completed,
            total_lessons: total,
            completed_at: enrollment.completed_at,
        })
    }

    /// Recompute progress for one enrollment and persist the result.
    ///
    /// Fires the completion notification when the course crosses 100 for
    /// the first time.
    async fn refresh_progress(
        &self,
        mut enrollment: Enrollment,
        course: &Course,
    ) -> Result<ProgressSnapshot, Error> {
        let total = self.lessons.count_for_course(enrollment.course_id).await?;
        let completed = self
            .lesson_progress
            .count_completed(enrollment.user_id, enrollment.course_id)
            .await?;

        let was_complete = enrollment.is_complete();
        let now = Utc::now();
        enrollment.apply_lesson_counts(completed, total, now);

        self.enrollments
            .update_progress(
                enrollment.user_id,
                enrollment.course_id,
                enrollment.progress_percent,
                enrollment.completed_at,
            )
            .await?;

        if enrollment.is_complete() && !was_complete {
            self.notifications
                .insert(&Notification::immediate(
                    enrollment.user_id,
                    "Course completed",
                    format!("You have completed \"{}\". Well done!", course.title()),
                    now,
                ))
                .await?;
        }

        Ok(ProgressSnapshot {
            course_id: enrollment.course_id,
            progress_percent: enrollment.progress_percent,
            completed_lessons: completed,
            total_lessons: total,
            completed_at: enrollment.completed_at,
        })
    }
}

#[async_trait]
impl EnrollmentCommand for EnrollmentService {
    async fn enroll(&self, user_id: UserId, course_id: Uuid) -> Result<ProgressSnapshot, Error> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .filter(Course::is_published)
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))?;

        let tier = self.effective_tier(user_id).await?;
        if !tier.allows(course.tier()) {
            return Err(Error::forbidden(format!(
                "a {} subscription is required for this course",
                course.tier()
            )));
        }

        // Enrolling twice is a no-op.
        if let Some(existing) = self.enrollments.find(user_id, course_id).await? {
            return self.snapshot(&existing).await;
        }

        let now = Utc::now();
        let enrollment = Enrollment::new(user_id, course_id, now);
        self.enrollments.insert(&enrollment).await?;

        let mut reminder = Notification::immediate(
            user_id,
            "Keep learning",
            format!("Pick up where you left off in \"{}\".", course.title()),
            now,
        );
        reminder.scheduled_for = Some(now + Duration::days(REMINDER_DELAY_DAYS));
        self.notifications.insert(&reminder).await?;

        self.snapshot(&enrollment).await
    }

    async fn record_lesson_progress(
        &self,
        user_id: UserId,
        lesson_id: Uuid,
        update: LessonProgressUpdate,
    ) -> Result<ProgressSnapshot, Error> {
        let lesson = self
            .lessons
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("lesson {lesson_id} not found")))?;

        let enrollment = self
            .enrollments
            .find(user_id, lesson.course_id())
            .await?
            .ok_or_else(|| Error::forbidden("you are not enrolled in this course"))?;
        let course = self
            .courses
            .find_by_id(lesson.course_id())
            .await?
            .ok_or_else(|| Error::not_found(format!("course {} not found", lesson.course_id())))?;

        if update.watch_time_seconds < 0 {
            return Err(Error::invalid_request("watch time must not be negative"));
        }

        self.lesson_progress
            .upsert(&LessonProgress {
                user_id,
                lesson_id,
                course_id: lesson.course_id(),
                completed: update.completed,
                watch_time_seconds: update.watch_time_seconds,
                updated_at: Utc::now(),
            })
            .await?;

        self.refresh_progress(enrollment, &course).await
    }

    async fn complete_course(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<ProgressSnapshot, Error> {
        let enrollment = self
            .enrollments
            .find(user_id, course_id)
            .await?
            .ok_or_else(|| Error::not_found("you are not enrolled in this course"))?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))?;

        let total = self.lessons.count_for_course(course_id).await?;
        let completed = self
            .lesson_progress
            .count_completed(user_id, course_id)
            .await?;
        if total == 0 || completed < total {
            return Err(Error::invalid_request(format!(
                "course is not fully completed ({completed} of {total} lessons)"
            )));
        }

        self.refresh_progress(enrollment, &course).await
    }
}

#[async_trait]
impl EnrollmentQuery for EnrollmentService {
    async fn list_enrollments(&self, user_id: UserId) -> Result<Vec<ProgressSnapshot>, Error> {
        let enrollments = self.enrollments.list_for_user(user_id).await?;
        let mut snapshots = Vec::with_capacity(enrollments.len());
        for enrollment in &enrollments {
            snapshots.push(self.snapshot(enrollment).await?);
        }
        Ok(snapshots)
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
