//! Core domain model and use-case services.
//!
//! Everything under this module is infrastructure-free: entities, value
//! objects, driving/driven ports, and the services that wire them together.
//! Adapters live under `inbound` and `outbound`.

pub mod certificate;
pub mod course;
pub mod credentials;
pub mod enrollment;
mod error;
pub mod exam;
pub mod lesson;
pub mod notification;
pub mod ports;
pub mod profile;
pub mod progress;
pub mod subscription;

mod auth_service;
mod certificate_service;
mod course_service;
mod dashboard_service;
mod enrollment_service;
mod exam_service;
mod notification_service;
mod reminder_service;
mod subscription_service;

pub use auth_service::AuthService;
pub use certificate_service::CertificateService;
pub use certificate::{Certificate, CertificateNumber, CertificateNumberError};
pub use course::{Course, CourseDraft, CourseFilter, CourseLevel, CourseValidationError};
pub use course_service::CourseService;
pub use credentials::{PasswordHash, PasswordHashError};
pub use dashboard_service::DashboardService;
pub use enrollment::{Enrollment, LessonProgress, COMPLETE_PERCENT};
pub use enrollment_service::EnrollmentService;
pub use error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use exam::{AnswerSelection, Exam, ExamAttempt, ExamError, ExamQuestion};
pub use exam_service::ExamService;
pub use lesson::{Lesson, LessonDraft, LessonKind, LessonValidationError};
pub use notification::Notification;
pub use notification_service::NotificationService;
pub use profile::{
    DisplayName, EmailAddress, Profile, ProfileValidationError, Role, UserId,
};
pub use progress::rounded_percent;
pub use reminder_service::ReminderService;
pub use subscription::{
    PaymentEvent, PaymentEventEnvelope, Subscription, SubscriptionParseError,
    SubscriptionStatus, SubscriptionTier,
};
pub use subscription_service::SubscriptionService;
