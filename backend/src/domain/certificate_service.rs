//! Certificate issuance and verification services.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::certificate::{Certificate, CertificateNumber};
use crate::domain::notification::Notification;
use crate::domain::ports::{
    CertificateRepository, CertificateRepositoryError, Certification, EnrollmentRepository,
    ExamRepository, NotificationRepository,
};
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Repository-backed implementation of the certification port.
#[derive(Clone)]
pub struct CertificateService {
    certificates: Arc<dyn CertificateRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    exams: Arc<dyn ExamRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl CertificateService {
    /// Create a new service over the certification repositories.
    pub fn new(
        certificates: Arc<dyn CertificateRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        exams: Arc<dyn ExamRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            certificates,
            enrollments,
            exams,
            notifications,
        }
    }
}

#[async_trait]
impl Certification for CertificateService {
    async fn issue(&self, user_id: UserId, course_id: Uuid) -> Result<Certificate, Error> {
        // Issuance is idempotent per (user, course).
        if let Some(existing) = self
            .certificates
            .find_for_user_course(user_id, course_id)
            .await?
        {
            return Ok(existing);
        }

        let enrollment = self
            .enrollments
            .find(user_id, course_id)
            .await?
            .ok_or_else(|| Error::not_found("you are not enrolled in this course"))?;
        if !enrollment.is_complete() {
            return Err(Error::invalid_request("course is not completed"));
        }

        // Courses with an exam additionally require a passing attempt.
        let exam = self.exams.find_for_course(course_id).await?;
        let exam_attempt_id = match exam {
            Some(_) => {
                let attempt = self
                    .exams
                    .find_passing_attempt(user_id, course_id)
                    .await?
                    .ok_or_else(|| {
                        Error::invalid_request("a passing exam attempt is required")
                    })?;
                Some(attempt.id)
            }
            None => None,
        };

        let now = Utc::now();
        let certificate = Certificate::issue(user_id, course_id, exam_attempt_id, now);
        match self.certificates.insert(&certificate).await {
            Ok(()) => {}
            Err(CertificateRepositoryError::AlreadyIssued) => {
                // Lost a race with a concurrent issue; return the winner.
                return self
                    .certificates
                    .find_for_user_course(user_id, course_id)
                    .await?
                    .ok_or_else(|| Error::internal("certificate vanished after conflict"));
            }
            Err(err) => return Err(err.into()),
        }

        self.notifications
            .insert(&Notification::immediate(
                user_id,
                "Certificate issued",
                format!(
                    "Your certificate {} is ready.",
                    certificate.certificate_number
                ),
                now,
            ))
            .await?;

        Ok(certificate)
    }

    async fn verify(&self, certificate_number: &str) -> Result<Certificate, Error> {
        let number = CertificateNumber::parse(certificate_number)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.certificates
            .find_by_number(&number)
            .await?
            .ok_or_else(|| Error::not_found(format!("certificate {number} not found")))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Certificate>, Error> {
        Ok(self.certificates.list_for_user(user_id).await?)
    }
}

#[cfg(test)]
#[path = "certificate_service_tests.rs"]
mod tests;
