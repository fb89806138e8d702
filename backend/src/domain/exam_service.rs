//! Exam retrieval and grading services.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::exam::{AnswerSelection, ExamAttempt, ExamError};
use crate::domain::ports::{
    AttemptSubmission, EnrollmentRepository, ExamRepository, ExamView, Examination,
};
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Repository-backed implementation of the examination port.
#[derive(Clone)]
pub struct ExamService {
    exams: Arc<dyn ExamRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl ExamService {
    /// Create a new service over the exam and enrollment repositories.
    pub fn new(exams: Arc<dyn ExamRepository>, enrollments: Arc<dyn EnrollmentRepository>) -> Self {
        Self { exams, enrollments }
    }

    async fn require_enrollment(&self, user_id: UserId, course_id: Uuid) -> Result<(), Error> {
        self.enrollments
            .find(user_id, course_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| Error::forbidden("you are not enrolled in this course"))
    }
}

fn map_grading_error(error: ExamError) -> Error {
    match error {
        ExamError::UnknownQuestion(_) | ExamError::DuplicateAnswer(_) => {
            Error::invalid_request(error.to_string())
        }
        ExamError::NoQuestions => Error::internal(error.to_string()),
    }
}

#[async_trait]
impl Examination for ExamService {
    async fn exam_for_course(&self, user_id: UserId, course_id: Uuid) -> Result<ExamView, Error> {
        self.require_enrollment(user_id, course_id).await?;
        let exam = self
            .exams
            .find_for_course(course_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {course_id} has no exam")))?;
        Ok(ExamView::from(exam))
    }

    async fn submit_attempt(
        &self,
        user_id: UserId,
        course_id: Uuid,
        submission: AttemptSubmission,
    ) -> Result<ExamAttempt, Error> {
        self.require_enrollment(user_id, course_id).await?;
        let exam = self
            .exams
            .find_for_course(course_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {course_id} has no exam")))?;

        let answers: Vec<AnswerSelection> = submission
            .answers
            .iter()
            .map(|answer| AnswerSelection {
                question_id: answer.question_id,
                choice: answer.choice,
            })
            .collect();

        let attempt = exam
            .grade(user_id, &answers, Utc::now())
            .map_err(map_grading_error)?;
        self.exams.insert_attempt(&attempt).await?;
        Ok(attempt)
    }
}
