//! Unit tests for [`CertificateService`].

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::enrollment::Enrollment;
use crate::domain::exam::{Exam, ExamAttempt, ExamQuestion};
use crate::domain::ports::{
    MockCertificateRepository, MockEnrollmentRepository, MockExamRepository,
    MockNotificationRepository,
};
use crate::domain::ErrorCode;

struct Mocks {
    certificates: MockCertificateRepository,
    enrollments: MockEnrollmentRepository,
    exams: MockExamRepository,
    notifications: MockNotificationRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            certificates: MockCertificateRepository::new(),
            enrollments: MockEnrollmentRepository::new(),
            exams: MockExamRepository::new(),
            notifications: MockNotificationRepository::new(),
        }
    }

    fn into_service(self) -> CertificateService {
        CertificateService::new(
            Arc::new(self.certificates),
            Arc::new(self.enrollments),
            Arc::new(self.exams),
            Arc::new(self.notifications),
        )
    }
}

fn completed_enrollment(user: UserId, course_id: Uuid) -> Enrollment {
    let mut enrollment = Enrollment::new(user, course_id, Utc::now());
    enrollment.apply_progress(100, Utc::now());
    enrollment
}

fn exam_for(course_id: Uuid) -> Exam {
    Exam {
        id: Uuid::new_v4(),
        course_id,
        title: "Final".to_owned(),
        passing_percent: 70,
        questions: vec![ExamQuestion {
            id: Uuid::new_v4(),
            prompt: "?".to_owned(),
            choices: vec!["a".to_owned(), "b".to_owned()],
            correct_choice: 0,
        }],
    }
}

fn passing_attempt(user: UserId, exam_id: Uuid) -> ExamAttempt {
    ExamAttempt {
        id: Uuid::new_v4(),
        exam_id,
        user_id: user,
        score: 1,
        percent: 100,
        passed: true,
        submitted_at: Utc::now(),
    }
}

#[rstest]
#[tokio::test]
async fn issue_awards_a_certificate_for_a_completed_examless_course() {
    let user = UserId::random();
    let course_id = Uuid::new_v4();

    let mut mocks = Mocks::new();
    mocks
        .certificates
        .expect_find_for_user_course()
        .returning(|_, _| Ok(None));
    let enrollment = completed_enrollment(user, course_id);
    mocks
        .enrollments
        .expect_find()
        .with(eq(user), eq(course_id))
        .returning(move |_, _| Ok(Some(enrollment.clone())));
    mocks.exams.expect_find_for_course().returning(|_| Ok(None));
    mocks
        .certificates
        .expect_insert()
        .withf(move |cert: &Certificate| {
            cert.user_id == user && cert.course_id == course_id && cert.exam_attempt_id.is_none()
        })
        .times(1)
        .returning(|_| Ok(()));
    mocks
        .notifications
        .expect_insert()
        .withf(|n| n.title == "Certificate issued")
        .times(1)
        .returning(|_| Ok(()));

    let certificate = mocks
        .into_service()
        .issue(user, course_id)
        .await
        .expect("issue succeeds");

    assert!(certificate
        .certificate_number
        .as_ref()
        .starts_with("CERT-"));
}

#[rstest]
#[tokio::test]
async fn issue_is_idempotent_per_user_and_course() {
    let user = UserId::random();
    let course_id = Uuid::new_v4();
    let existing = Certificate::issue(user, course_id, None, Utc::now());
    let existing_number = existing.certificate_number.clone();

    let mut mocks = Mocks::new();
    mocks
        .certificates
        .expect_find_for_user_course()
        .returning(move |_, _| Ok(Some(existing.clone())));
    mocks.certificates.expect_insert().never();
    mocks.notifications.expect_insert().never();

    let certificate = mocks
        .into_service()
        .issue(user, course_id)
        .await
        .expect("repeat issue succeeds");

    assert_eq!(certificate.certificate_number, existing_number);
}

#[rstest]
#[tokio::test]
async fn issue_requires_a_completed_course() {
    let user = UserId::random();
    let course_id = Uuid::new_v4();

    let mut mocks = Mocks::new();
    mocks
        .certificates
        .expect_find_for_user_course()
        .returning(|_, _| Ok(None));
    mocks
        .enrollments
        .expect_find()
        .returning(move |u, c| Ok(Some(Enrollment::new(u, c, Utc::now()))));
    mocks.certificates.expect_insert().never();

    let err = mocks
        .into_service()
        .issue(user, course_id)
        .await
        .expect_err("incomplete course is rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn issue_requires_a_passing_attempt_when_the_course_has_an_exam() {
    let user = UserId::random();
    let course_id = Uuid::new_v4();
    let exam = exam_for(course_id);

    let mut mocks = Mocks::new();
    mocks
        .certificates
        .expect_find_for_user_course()
        .returning(|_, _| Ok(None));
    let enrollment = completed_enrollment(user, course_id);
    mocks
        .enrollments
        .expect_find()
        .returning(move |_, _| Ok(Some(enrollment.clone())));
    mocks
        .exams
        .expect_find_for_course()
        .returning(move |_| Ok(Some(exam.clone())));
    mocks
        .exams
        .expect_find_passing_attempt()
        .returning(|_, _| Ok(None));
    mocks.certificates.expect_insert().never();

    let err = mocks
        .into_service()
        .issue(user, course_id)
        .await
        .expect_err("missing passing attempt is rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn issue_links_the_passing_attempt() {
    let user = UserId::random();
    let course_id = Uuid::new_v4();
    let exam = exam_for(course_id);
    let attempt = passing_attempt(user, exam.id);
    let attempt_id = attempt.id;

    let mut mocks = Mocks::new();
    mocks
        .certificates
        .expect_find_for_user_course()
        .returning(|_, _| Ok(None));
    let enrollment = completed_enrollment(user, course_id);
    mocks
        .enrollments
        .expect_find()
        .returning(move |_, _| Ok(Some(enrollment.clone())));
    mocks
        .exams
        .expect_find_for_course()
        .returning(move |_| Ok(Some(exam.clone())));
    mocks
        .exams
        .expect_find_passing_attempt()
        .returning(move |_, _| Ok(Some(attempt.clone())));
    mocks
        .certificates
        .expect_insert()
        .withf(move |cert: &Certificate| cert.exam_attempt_id == Some(attempt_id))
        .times(1)
        .returning(|_| Ok(()));
    mocks
        .notifications
        .expect_insert()
        .returning(|_| Ok(()));

    let certificate = mocks
        .into_service()
        .issue(user, course_id)
        .await
        .expect("issue succeeds");

    assert_eq!(certificate.exam_attempt_id, Some(attempt_id));
}

#[rstest]
#[tokio::test]
async fn a_lost_insert_race_returns_the_winning_certificate() {
    let user = UserId::random();
    let course_id = Uuid::new_v4();
    let winner = Certificate::issue(user, course_id, None, Utc::now());
    let winner_number = winner.certificate_number.clone();

    let mut mocks = Mocks::new();
    let mut first = true;
    mocks
        .certificates
        .expect_find_for_user_course()
        .returning(move |_, _| {
            if first {
                first = false;
                Ok(None)
            } else {
                Ok(Some(winner.clone()))
            }
        });
    let enrollment = completed_enrollment(user, course_id);
    mocks
        .enrollments
        .expect_find()
        .returning(move |_, _| Ok(Some(enrollment.clone())));
    mocks.exams.expect_find_for_course().returning(|_| Ok(None));
    mocks
        .certificates
        .expect_insert()
        .returning(|_| Err(CertificateRepositoryError::AlreadyIssued));
    mocks.notifications.expect_insert().never();

    let certificate = mocks
        .into_service()
        .issue(user, course_id)
        .await
        .expect("race resolves to the winner");

    assert_eq!(certificate.certificate_number, winner_number);
}

#[rstest]
#[tokio::test]
async fn verify_rejects_a_malformed_number() {
    let mocks = Mocks::new();
    let err = mocks
        .into_service()
        .verify("not-a-number")
        .await
        .expect_err("malformed number is rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn verify_finds_a_known_number() {
    let certificate = Certificate::issue(UserId::random(), Uuid::new_v4(), None, Utc::now());
    let number = certificate.certificate_number.clone();

    let mut mocks = Mocks::new();
    mocks
        .certificates
        .expect_find_by_number()
        .with(eq(number.clone()))
        .returning(move |_| Ok(Some(certificate.clone())));

    let found = mocks
        .into_service()
        .verify(number.as_ref())
        .await
        .expect("lookup succeeds");

    assert_eq!(found.certificate_number, number);
}
