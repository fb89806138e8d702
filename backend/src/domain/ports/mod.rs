//! Domain ports and supporting types for the hexagonal boundary.

mod auth;
mod certificate_repository;
mod certification;
mod course_catalogue;
mod course_repository;
mod dashboard;
mod enrollment_repository;
mod enrollment_workflow;
mod exam_repository;
mod examination;
mod lesson_progress_repository;
mod lesson_repository;
mod mailer;
mod notification_feed;
mod notification_repository;
mod profile_repository;
mod reminders;
mod subscription_repository;
mod subscription_sync;
mod user_admin;

#[cfg(test)]
pub use auth::MockAuthCommand;
pub use auth::{AuthCommand, FixtureAuthCommand, LoginRequest, RegisterRequest};
#[cfg(test)]
pub use certificate_repository::MockCertificateRepository;
pub use certificate_repository::{
    CertificateRepository, CertificateRepositoryError, FixtureCertificateRepository,
};
#[cfg(test)]
pub use certification::MockCertification;
pub use certification::{Certification, FixtureCertification};
#[cfg(test)]
pub use course_catalogue::{MockCourseCommand, MockCourseQuery};
pub use course_catalogue::{
    CourseCommand, CourseDetail, CoursePayload, CourseQuery, CreateCourseRequest,
    CreateLessonRequest, FixtureCourseCommand, FixtureCourseQuery, LessonPayload,
    UpdateCourseRequest,
};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError, FixtureCourseRepository};
#[cfg(test)]
pub use dashboard::MockDashboardQuery;
pub use dashboard::{DashboardQuery, DashboardStats, FixtureDashboardQuery};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{
    EnrollmentCounts, EnrollmentRepository, EnrollmentRepositoryError,
    FixtureEnrollmentRepository,
};
#[cfg(test)]
pub use enrollment_workflow::{MockEnrollmentCommand, MockEnrollmentQuery};
pub use enrollment_workflow::{
    EnrollmentCommand, EnrollmentQuery, FixtureEnrollmentCommand, FixtureEnrollmentQuery,
    LessonProgressUpdate, ProgressSnapshot,
};
#[cfg(test)]
pub use exam_repository::MockExamRepository;
pub use exam_repository::{ExamRepository, ExamRepositoryError, FixtureExamRepository};
#[cfg(test)]
pub use examination::MockExamination;
pub use examination::{
    AnswerPayload, AttemptSubmission, ExamQuestionView, ExamView, Examination, FixtureExamination,
};
#[cfg(test)]
pub use lesson_progress_repository::MockLessonProgressRepository;
pub use lesson_progress_repository::{
    FixtureLessonProgressRepository, LessonProgressRepository, LessonProgressRepositoryError,
};
#[cfg(test)]
pub use lesson_repository::MockLessonRepository;
pub use lesson_repository::{FixtureLessonRepository, LessonRepository, LessonRepositoryError};
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{EmailMessage, FixtureMailer, Mailer, MailerError};
#[cfg(test)]
pub use notification_feed::MockNotificationFeed;
pub use notification_feed::{FixtureNotificationFeed, NotificationFeed, NotificationPayload};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{
    FixtureNotificationRepository, NotificationRepository, NotificationRepositoryError,
};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError, StoredProfile,
};
#[cfg(test)]
pub use reminders::MockReminderDispatch;
pub use reminders::{
    FixtureReminderDispatch, ReminderDispatch, ReminderFailure, ReminderRunReport,
};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{
    FixtureSubscriptionRepository, SubscriptionRepository, SubscriptionRepositoryError,
};
#[cfg(test)]
pub use subscription_sync::MockSubscriptionSync;
pub use subscription_sync::{FixtureSubscriptionSync, SubscriptionSync};
#[cfg(test)]
pub use user_admin::{MockProfileQuery, MockUserAdmin};
pub use user_admin::{
    FixtureProfileQuery, FixtureUserAdmin, ProfileQuery, UserAdmin,
};
