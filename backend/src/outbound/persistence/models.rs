//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. Conversion into domain types lives in the
//! repository adapters so that each adapter owns its own validation failures.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    certificates, courses, enrollments, exam_attempts, exams, lesson_progress, lessons,
    notifications, profiles, subscriptions,
};

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new profile records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the subscriptions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubscriptionRow {
    pub user_id: Uuid,
    pub tier: String,
    pub status: String,
    pub current_period_end: Option<DateTime<Utc>>,
}

/// Insertable and upsertable struct for subscription records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = subscriptions)]
pub(crate) struct NewSubscriptionRow<'a> {
    pub user_id: Uuid,
    pub tier: &'a str,
    pub status: &'a str,
    pub current_period_end: Option<DateTime<Utc>>,
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub description: String,
    pub level: String,
    pub category: String,
    pub tier: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new course records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub level: &'a str,
    pub category: &'a str,
    pub tier: &'a str,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for replacing a course's mutable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
pub(crate) struct CourseUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub level: &'a str,
    pub category: &'a str,
    pub tier: &'a str,
}

/// Row struct for reading from the lessons table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LessonRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub position: i32,
    pub title: String,
    pub kind: String,
    pub duration_seconds: i32,
}

/// Insertable struct for creating new lesson records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lessons)]
pub(crate) struct NewLessonRow<'a> {
    pub id: Uuid,
    pub course_id: Uuid,
    pub position: i32,
    pub title: &'a str,
    pub kind: &'a str,
    pub duration_seconds: i32,
}

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub progress_percent: i16,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insertable struct for creating new enrollment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub progress_percent: i16,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Row struct for reading from the lesson_progress table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lesson_progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LessonProgressRow {
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub course_id: Uuid,
    pub completed: bool,
    pub watch_time_seconds: i32,
    pub updated_at: DateTime<Utc>,
}

/// Insertable and upsertable struct for lesson progress records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = lesson_progress)]
pub(crate) struct NewLessonProgressRow {
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub course_id: Uuid,
    pub completed: bool,
    pub watch_time_seconds: i32,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the exams table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExamRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub passing_percent: i16,
    pub questions: serde_json::Value,
}

/// Row struct for reading from the exam_attempts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exam_attempts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExamAttemptRow {
    pub id: Uuid,
    pub exam_id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
    pub percent: i16,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Insertable struct for recording graded attempts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exam_attempts)]
pub(crate) struct NewExamAttemptRow {
    pub id: Uuid,
    pub exam_id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
    pub percent: i16,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Row struct for reading from the certificates table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = certificates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CertificateRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub exam_attempt_id: Option<Uuid>,
    pub certificate_number: String,
    pub issued_at: DateTime<Utc>,
}

/// Insertable struct for freshly issued certificates.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = certificates)]
pub(crate) struct NewCertificateRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub exam_attempt_id: Option<Uuid>,
    pub certificate_number: &'a str,
    pub issued_at: DateTime<Utc>,
}

/// Row struct for reading from the notifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub sent: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub body: &'a str,
    pub read: bool,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub sent: bool,
    pub created_at: DateTime<Utc>,
}
