//! In-memory repository doubles backing full-stack endpoint tests.
//!
//! One [`MemoryStore`] implements every repository port over mutex-guarded
//! vectors, so the real domain services run end to end without a database.

use std::sync::{Arc, Mutex};

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use backend::domain::ports::{
    CertificateRepository, CertificateRepositoryError, CourseRepository, CourseRepositoryError,
    EmailMessage, EnrollmentCounts, EnrollmentRepository, EnrollmentRepositoryError,
    ExamRepository, ExamRepositoryError, LessonProgressRepository, LessonProgressRepositoryError,
    LessonRepository, LessonRepositoryError, Mailer, MailerError, NotificationRepository,
    NotificationRepositoryError, ProfileRepository, ProfileRepositoryError, StoredProfile,
    SubscriptionRepository, SubscriptionRepositoryError,
};
use backend::domain::{
    AuthService, Certificate, CertificateNumber, CertificateService, Course, CourseDraft,
    CourseFilter, CourseService, DashboardService, EmailAddress, Enrollment, EnrollmentService,
    Exam, ExamAttempt, ExamService, Lesson, LessonProgress, Notification, NotificationService,
    Profile, ReminderService, Role, Subscription, SubscriptionService, UserId,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};

/// Shared in-memory backing store for every repository port.
#[derive(Default)]
pub struct MemoryStore {
    profiles: Mutex<Vec<StoredProfile>>,
    courses: Mutex<Vec<Course>>,
    lessons: Mutex<Vec<Lesson>>,
    enrollments: Mutex<Vec<Enrollment>>,
    lesson_progress: Mutex<Vec<LessonProgress>>,
    exams: Mutex<Vec<Exam>>,
    attempts: Mutex<Vec<ExamAttempt>>,
    certificates: Mutex<Vec<Certificate>>,
    notifications: Mutex<Vec<Notification>>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl MemoryStore {
    /// Out-of-band role change, standing in for operator-seeded accounts.
    pub fn assign_role(&self, email: &str, role: Role) {
        let mut profiles = self.profiles.lock().expect("profiles lock");
        let stored = profiles
            .iter_mut()
            .find(|stored| stored.profile.email.as_ref() == email)
            .expect("profile to promote");
        stored.profile.role = role;
    }

    /// Seed an exam directly, as course authoring tooling would.
    pub fn seed_exam(&self, exam: Exam) {
        self.exams.lock().expect("exams lock").push(exam);
    }

    /// Pull every reminder's schedule into the past.
    pub fn make_reminders_due(&self) {
        let mut notifications = self.notifications.lock().expect("notifications lock");
        let past = Utc::now() - chrono::Duration::hours(1);
        for notification in notifications.iter_mut() {
            if notification.scheduled_for.is_some() {
                notification.scheduled_for = Some(past);
            }
        }
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn insert(&self, stored: &StoredProfile) -> Result<(), ProfileRepositoryError> {
        let mut profiles = self.profiles.lock().expect("profiles lock");
        if profiles
            .iter()
            .any(|existing| existing.profile.email == stored.profile.email)
        {
            return Err(ProfileRepositoryError::DuplicateEmail);
        }
        profiles.push(stored.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let profiles = self.profiles.lock().expect("profiles lock");
        Ok(profiles
            .iter()
            .find(|stored| stored.profile.id == id)
            .map(|stored| stored.profile.clone()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredProfile>, ProfileRepositoryError> {
        let profiles = self.profiles.lock().expect("profiles lock");
        Ok(profiles
            .iter()
            .find(|stored| &stored.profile.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let profiles = self.profiles.lock().expect("profiles lock");
        let mut all: Vec<Profile> = profiles.iter().map(|s| s.profile.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_role(&self, id: UserId, role: Role) -> Result<bool, ProfileRepositoryError> {
        let mut profiles = self.profiles.lock().expect("profiles lock");
        match profiles.iter_mut().find(|stored| stored.profile.id == id) {
            Some(stored) => {
                stored.profile.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_all(&self) -> Result<u64, ProfileRepositoryError> {
        Ok(self.profiles.lock().expect("profiles lock").len() as u64)
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        self.courses
            .lock()
            .expect("courses lock")
            .push(course.clone());
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut courses = self.courses.lock().expect("courses lock");
        if let Some(slot) = courses.iter_mut().find(|c| c.id() == course.id()) {
            *slot = course.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, CourseRepositoryError> {
        let courses = self.courses.lock().expect("courses lock");
        Ok(courses.iter().find(|c| c.id() == id).cloned())
    }

    async fn list_published(
        &self,
        filter: &CourseFilter,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let courses = self.courses.lock().expect("courses lock");
        let mut matching: Vec<Course> = courses
            .iter()
            .filter(|c| c.is_published())
            .filter(|c| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|category| c.category() == category)
            })
            .filter(|c| filter.level.is_none_or(|level| c.level() == level))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }

    async fn list_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let courses = self.courses.lock().expect("courses lock");
        let mut own: Vec<Course> = courses
            .iter()
            .filter(|c| c.instructor_id() == instructor_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(own)
    }

    async fn set_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<bool, CourseRepositoryError> {
        let mut courses = self.courses.lock().expect("courses lock");
        match courses.iter_mut().find(|c| c.id() == id) {
            Some(course) => {
                let republished = Course::new(CourseDraft {
                    id: course.id(),
                    instructor_id: course.instructor_id(),
                    title: course.title().to_owned(),
                    description: course.description().to_owned(),
                    level: course.level(),
                    category: course.category().to_owned(),
                    tier: course.tier(),
                    published,
                    created_at: course.created_at(),
                })
                .expect("stored course stays valid");
                *course = republished;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_all(&self) -> Result<u64, CourseRepositoryError> {
        Ok(self.courses.lock().expect("courses lock").len() as u64)
    }

    async fn count_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<u64, CourseRepositoryError> {
        let courses = self.courses.lock().expect("courses lock");
        Ok(courses
            .iter()
            .filter(|c| c.instructor_id() == instructor_id)
            .count() as u64)
    }
}

#[async_trait]
impl LessonRepository for MemoryStore {
    async fn insert(&self, lesson: &Lesson) -> Result<(), LessonRepositoryError> {
        self.lessons
            .lock()
            .expect("lessons lock")
            .push(lesson.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lesson>, LessonRepositoryError> {
        let lessons = self.lessons.lock().expect("lessons lock");
        Ok(lessons.iter().find(|l| l.id() == id).cloned())
    }

    async fn list_for_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<Lesson>, LessonRepositoryError> {
        let lessons = self.lessons.lock().expect("lessons lock");
        let mut for_course: Vec<Lesson> = lessons
            .iter()
            .filter(|l| l.course_id() == course_id)
            .cloned()
            .collect();
        for_course.sort_by_key(Lesson::position);
        Ok(for_course)
    }

    async fn count_for_course(&self, course_id: Uuid) -> Result<u64, LessonRepositoryError> {
        let lessons = self.lessons.lock().expect("lessons lock");
        Ok(lessons.iter().filter(|l| l.course_id() == course_id).count() as u64)
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn find(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let enrollments = self.enrollments.lock().expect("enrollments lock");
        Ok(enrollments
            .iter()
            .find(|e| e.user_id == user_id && e.course_id == course_id)
            .cloned())
    }

    async fn insert(&self, enrollment: &Enrollment) -> Result<(), EnrollmentRepositoryError> {
        let mut enrollments = self.enrollments.lock().expect("enrollments lock");
        let duplicate = enrollments
            .iter()
            .any(|e| e.user_id == enrollment.user_id && e.course_id == enrollment.course_id);
        if !duplicate {
            enrollments.push(enrollment.clone());
        }
        Ok(())
    }

    async fn update_progress(
        &self,
        user_id: UserId,
        course_id: Uuid,
        progress_percent: u8,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut enrollments = self.enrollments.lock().expect("enrollments lock");
        if let Some(enrollment) = enrollments
            .iter_mut()
            .find(|e| e.user_id == user_id && e.course_id == course_id)
        {
            enrollment.progress_percent = progress_percent;
            enrollment.completed_at = completed_at;
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let enrollments = self.enrollments.lock().expect("enrollments lock");
        let mut own: Vec<Enrollment> = enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(own)
    }

    async fn completion_counts(
        &self,
        instructor_id: Option<UserId>,
    ) -> Result<EnrollmentCounts, EnrollmentRepositoryError> {
        let enrollments = self.enrollments.lock().expect("enrollments lock");
        let courses = self.courses.lock().expect("courses lock");
        let in_scope = |enrollment: &&Enrollment| match instructor_id {
            Some(owner) => courses
                .iter()
                .any(|c| c.id() == enrollment.course_id && c.instructor_id() == owner),
            None => true,
        };
        let total = enrollments.iter().filter(in_scope).count() as u64;
        let completed = enrollments
            .iter()
            .filter(in_scope)
            .filter(|e| e.completed_at.is_some())
            .count() as u64;
        Ok(EnrollmentCounts { total, completed })
    }
}

#[async_trait]
impl LessonProgressRepository for MemoryStore {
    async fn upsert(&self, progress: &LessonProgress) -> Result<(), LessonProgressRepositoryError> {
        let mut records = self.lesson_progress.lock().expect("lesson progress lock");
        match records
            .iter_mut()
            .find(|r| r.user_id == progress.user_id && r.lesson_id == progress.lesson_id)
        {
            Some(existing) => {
                existing.completed = existing.completed || progress.completed;
                existing.watch_time_seconds =
                    existing.watch_time_seconds.max(progress.watch_time_seconds);
                existing.updated_at = progress.updated_at;
            }
            None => records.push(progress.clone()),
        }
        Ok(())
    }

    async fn count_completed(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<u64, LessonProgressRepositoryError> {
        let records = self.lesson_progress.lock().expect("lesson progress lock");
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id && r.course_id == course_id && r.completed)
            .count() as u64)
    }
}

#[async_trait]
impl ExamRepository for MemoryStore {
    async fn find_for_course(
        &self,
        course_id: Uuid,
    ) -> Result<Option<Exam>, ExamRepositoryError> {
        let exams = self.exams.lock().expect("exams lock");
        Ok(exams.iter().find(|e| e.course_id == course_id).cloned())
    }

    async fn insert_attempt(&self, attempt: &ExamAttempt) -> Result<(), ExamRepositoryError> {
        self.attempts
            .lock()
            .expect("attempts lock")
            .push(attempt.clone());
        Ok(())
    }

    async fn find_passing_attempt(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<Option<ExamAttempt>, ExamRepositoryError> {
        let exams = self.exams.lock().expect("exams lock");
        let attempts = self.attempts.lock().expect("attempts lock");
        let mut passing: Vec<&ExamAttempt> = attempts
            .iter()
            .filter(|a| a.user_id == user_id && a.passed)
            .filter(|a| {
                exams
                    .iter()
                    .any(|e| e.id == a.exam_id && e.course_id == course_id)
            })
            .collect();
        passing.sort_by_key(|a| a.submitted_at);
        Ok(passing.first().map(|a| (*a).clone()))
    }
}

#[async_trait]
impl CertificateRepository for MemoryStore {
    async fn find_for_user_course(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<Option<Certificate>, CertificateRepositoryError> {
        let certificates = self.certificates.lock().expect("certificates lock");
        Ok(certificates
            .iter()
            .find(|c| c.user_id == user_id && c.course_id == course_id)
            .cloned())
    }

    async fn find_by_number(
        &self,
        number: &CertificateNumber,
    ) -> Result<Option<Certificate>, CertificateRepositoryError> {
        let certificates = self.certificates.lock().expect("certificates lock");
        Ok(certificates
            .iter()
            .find(|c| &c.certificate_number == number)
            .cloned())
    }

    async fn insert(&self, certificate: &Certificate) -> Result<(), CertificateRepositoryError> {
        let mut certificates = self.certificates.lock().expect("certificates lock");
        let duplicate = certificates
            .iter()
            .any(|c| c.user_id == certificate.user_id && c.course_id == certificate.course_id);
        if duplicate {
            return Err(CertificateRepositoryError::AlreadyIssued);
        }
        certificates.push(certificate.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Certificate>, CertificateRepositoryError> {
        let certificates = self.certificates.lock().expect("certificates lock");
        let mut own: Vec<Certificate> = certificates
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(own)
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<u64, CertificateRepositoryError> {
        let certificates = self.certificates.lock().expect("certificates lock");
        Ok(certificates.iter().filter(|c| c.user_id == user_id).count() as u64)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        self.notifications
            .lock()
            .expect("notifications lock")
            .push(notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let notifications = self.notifications.lock().expect("notifications lock");
        let mut own: Vec<Notification> = notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(own)
    }

    async fn mark_read(
        &self,
        id: Uuid,
        user_id: UserId,
    ) -> Result<bool, NotificationRepositoryError> {
        let mut notifications = self.notifications.lock().expect("notifications lock");
        match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(notification) => {
                notification.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_due(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let notifications = self.notifications.lock().expect("notifications lock");
        let mut due: Vec<Notification> = notifications
            .iter()
            .filter(|n| n.is_due(now))
            .cloned()
            .collect();
        due.sort_by_key(|n| n.scheduled_for);
        Ok(due)
    }

    async fn mark_sent(&self, id: Uuid) -> Result<(), NotificationRepositoryError> {
        let mut notifications = self.notifications.lock().expect("notifications lock");
        if let Some(notification) = notifications.iter_mut().find(|n| n.id == id) {
            notification.sent = true;
        }
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn find_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        let subscriptions = self.subscriptions.lock().expect("subscriptions lock");
        Ok(subscriptions.iter().find(|s| s.user_id == user_id).cloned())
    }

    async fn upsert(&self, subscription: &Subscription) -> Result<(), SubscriptionRepositoryError> {
        let mut subscriptions = self.subscriptions.lock().expect("subscriptions lock");
        match subscriptions
            .iter_mut()
            .find(|s| s.user_id == subscription.user_id)
        {
            Some(existing) => *existing = subscription.clone(),
            None => subscriptions.push(subscription.clone()),
        }
        Ok(())
    }

    async fn set_status(
        &self,
        user_id: UserId,
        status: backend::domain::SubscriptionStatus,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut subscriptions = self.subscriptions.lock().expect("subscriptions lock");
        match subscriptions.iter_mut().find(|s| s.user_id == user_id) {
            Some(subscription) => {
                subscription.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Mailer double that records every delivery.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        self.sent.lock().expect("sent lock").push(message.clone());
        Ok(())
    }
}

/// Wire the real domain services over one shared memory store.
pub fn memory_state(store: &Arc<MemoryStore>, mailer: &Arc<RecordingMailer>) -> HttpState {
    let profiles: Arc<dyn ProfileRepository> = store.clone();
    let courses: Arc<dyn CourseRepository> = store.clone();
    let lessons: Arc<dyn LessonRepository> = store.clone();
    let enrollments: Arc<dyn EnrollmentRepository> = store.clone();
    let lesson_progress: Arc<dyn LessonProgressRepository> = store.clone();
    let exams: Arc<dyn ExamRepository> = store.clone();
    let certificates: Arc<dyn CertificateRepository> = store.clone();
    let notifications: Arc<dyn NotificationRepository> = store.clone();
    let subscriptions: Arc<dyn SubscriptionRepository> = store.clone();

    let auth = Arc::new(AuthService::new(profiles.clone()));
    let course = Arc::new(CourseService::new(courses.clone(), lessons.clone()));
    let enrollment = Arc::new(EnrollmentService::new(
        courses.clone(),
        lessons,
        enrollments.clone(),
        lesson_progress,
        subscriptions.clone(),
        notifications.clone(),
    ));

    HttpState::new(HttpStatePorts {
        auth: auth.clone(),
        profiles: auth.clone(),
        user_admin: auth,
        course_command: course.clone(),
        course_query: course,
        enrollment_command: enrollment.clone(),
        enrollment_query: enrollment,
        examination: Arc::new(ExamService::new(exams.clone(), enrollments.clone())),
        certification: Arc::new(CertificateService::new(
            certificates,
            enrollments.clone(),
            exams,
            notifications.clone(),
        )),
        dashboard: Arc::new(DashboardService::new(profiles.clone(), courses, enrollments)),
        notifications: Arc::new(NotificationService::new(notifications.clone())),
        reminders: Arc::new(ReminderService::new(
            notifications.clone(),
            profiles,
            mailer.clone() as Arc<dyn Mailer>,
        )),
        subscription_sync: Arc::new(SubscriptionService::new(subscriptions, notifications)),
    })
}

/// Session middleware matching the server's cookie contract.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Signing secret shared between the suites and their webhook requests.
pub const WEBHOOK_SECRET: &str = "whsec_integration_secret";

/// Produce a `Payment-Signature` header value for a webhook body.
pub fn sign_webhook(body: &[u8]) -> String {
    let timestamp = Utc::now().timestamp().to_string();
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).expect("hmac key");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    let digest = hex::encode(mac.finalize().into_bytes());
    format!("t={timestamp},v1={digest}")
}

/// Webhook verifier matching [`sign_webhook`].
pub fn webhook_verifier() -> web::Data<backend::inbound::http::webhook_signature::WebhookVerifier> {
    web::Data::new(backend::inbound::http::webhook_signature::WebhookVerifier::new(WEBHOOK_SECRET))
}
