//! Driving port for exam retrieval and attempt grading.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::exam::{Exam, ExamAttempt};
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Exam projection safe to send to learners.
///
/// The correct-choice indices are stripped; only prompts and choices remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamView {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub passing_percent: u8,
    pub questions: Vec<ExamQuestionView>,
}

/// One question without its answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestionView {
    pub id: Uuid,
    pub prompt: String,
    pub choices: Vec<String>,
}

impl From<Exam> for ExamView {
    fn from(exam: Exam) -> Self {
        Self {
            id: exam.id,
            course_id: exam.course_id,
            title: exam.title,
            passing_percent: exam.passing_percent,
            questions: exam
                .questions
                .into_iter()
                .map(|question| ExamQuestionView {
                    id: question.id,
                    prompt: question.prompt,
                    choices: question.choices,
                })
                .collect(),
        }
    }
}

/// One answer in a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    /// Question being answered.
    pub question_id: Uuid,
    /// Index of the chosen answer.
    pub choice: usize,
}

/// A learner's submitted answers for one exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSubmission {
    pub answers: Vec<AnswerPayload>,
}

/// Driving port for exam use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Examination: Send + Sync {
    /// Fetch the exam for a course, stripped of its answer key.
    ///
    /// The caller must be enrolled in the course.
    async fn exam_for_course(&self, user_id: UserId, course_id: Uuid) -> Result<ExamView, Error>;

    /// Grade a submission against the course's exam and persist the attempt.
    ///
    /// The caller must be enrolled in the course.
    async fn submit_attempt(
        &self,
        user_id: UserId,
        course_id: Uuid,
        submission: AttemptSubmission,
    ) -> Result<ExamAttempt, Error>;
}

/// Fixture examination port for adapters under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureExamination;

#[async_trait]
impl Examination for FixtureExamination {
    async fn exam_for_course(
        &self,
        _user_id: UserId,
        _course_id: Uuid,
    ) -> Result<ExamView, Error> {
        Err(Error::not_found("exam not found"))
    }

    async fn submit_attempt(
        &self,
        _user_id: UserId,
        _course_id: Uuid,
        _submission: AttemptSubmission,
    ) -> Result<ExamAttempt, Error> {
        Err(Error::not_found("exam not found"))
    }
}
