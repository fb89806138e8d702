//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are thin translators: Diesel row structs (`models.rs`) and
//! schema definitions (`schema.rs`) stay internal to this module, and every
//! database error is mapped to the owning port's error type. No business
//! logic lives here.

mod diesel_certificate_repository;
mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_exam_repository;
mod diesel_lesson_progress_repository;
mod diesel_lesson_repository;
mod diesel_notification_repository;
mod diesel_profile_repository;
mod diesel_subscription_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_certificate_repository::DieselCertificateRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_exam_repository::DieselExamRepository;
pub use diesel_lesson_progress_repository::DieselLessonProgressRepository;
pub use diesel_lesson_repository::DieselLessonRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
