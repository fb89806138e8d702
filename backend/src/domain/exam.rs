//! Exams, questions, and attempt grading.
//!
//! Questions are multiple choice with a single correct choice index.
//! Grading is pure: `score = #correct`, `percent = round(score/total*100)`,
//! `passed = percent >= passing_percent`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::UserId;
use super::progress::rounded_percent;

/// Grading errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExamError {
    /// An answer references a question id the exam does not contain.
    #[error("answer references unknown question {0}")]
    UnknownQuestion(Uuid),
    /// The same question was answered more than once.
    #[error("question {0} answered more than once")]
    DuplicateAnswer(Uuid),
    /// The exam has no questions, so no attempt can be graded.
    #[error("exam has no questions")]
    NoQuestions,
}

/// One multiple-choice question. Stored as JSONB on the exam row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    /// Question identifier, unique within the exam.
    pub id: Uuid,
    /// Question text.
    pub prompt: String,
    /// Candidate answers, indexed from 0.
    pub choices: Vec<String>,
    /// Index into `choices` of the correct answer. Never sent to clients.
    pub correct_choice: usize,
}

/// An exam attached to a course.
#[derive(Debug, Clone, PartialEq)]
pub struct Exam {
    /// Exam identifier.
    pub id: Uuid,
    /// Course the exam belongs to.
    pub course_id: Uuid,
    /// Exam title.
    pub title: String,
    /// Minimum percentage required to pass.
    pub passing_percent: u8,
    /// Question bank.
    pub questions: Vec<ExamQuestion>,
}

/// A learner's selected choice for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerSelection {
    /// Question being answered.
    pub question_id: Uuid,
    /// Index of the chosen answer.
    pub choice: usize,
}

/// Persisted result of grading one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamAttempt {
    /// Attempt identifier.
    pub id: Uuid,
    /// Exam the attempt belongs to.
    pub exam_id: Uuid,
    /// Learner who submitted.
    pub user_id: UserId,
    /// Number of correctly answered questions.
    pub score: i32,
    /// Rounded percentage of correct answers.
    pub percent: u8,
    /// Whether `percent` met the passing threshold.
    pub passed: bool,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

impl Exam {
    /// Grade a submission into an attempt.
    ///
    /// Unanswered questions count as wrong. Answers for unknown questions
    /// and duplicate answers are rejected rather than silently dropped.
    pub fn grade(
        &self,
        user_id: UserId,
        answers: &[AnswerSelection],
        submitted_at: DateTime<Utc>,
    ) -> Result<ExamAttempt, ExamError> {
        if self.questions.is_empty() {
            return Err(ExamError::NoQuestions);
        }

        let mut seen = std::collections::HashSet::with_capacity(answers.len());
        let mut score: u64 = 0;
        for answer in answers {
            let question = self
                .questions
                .iter()
                .find(|q| q.id == answer.question_id)
                .ok_or(ExamError::UnknownQuestion(answer.question_id))?;
            if !seen.insert(answer.question_id) {
                return Err(ExamError::DuplicateAnswer(answer.question_id));
            }
            if question.correct_choice == answer.choice {
                score += 1;
            }
        }

        let percent = rounded_percent(score, self.questions.len() as u64);
        Ok(ExamAttempt {
            id: Uuid::new_v4(),
            exam_id: self.id,
            user_id,
            score: i32::try_from(score).unwrap_or(i32::MAX),
            percent,
            passed: percent >= self.passing_percent,
            submitted_at,
        })
    }
}
