//! PostgreSQL-backed `ExamRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ExamRepository, ExamRepositoryError};
use crate::domain::{Exam, ExamAttempt, ExamQuestion, UserId};

use super::error_mapping;
use super::models::{ExamAttemptRow, ExamRow, NewExamAttemptRow};
use super::pool::{DbPool, PoolError};
use super::schema::{exam_attempts, exams};

/// Diesel-backed implementation of the `ExamRepository` port.
#[derive(Clone)]
pub struct DieselExamRepository {
    pool: DbPool,
}

impl DieselExamRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExamRepositoryError {
    error_mapping::map_pool_error(error, ExamRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ExamRepositoryError {
    error_mapping::map_diesel_error(
        error,
        ExamRepositoryError::query,
        ExamRepositoryError::connection,
    )
}

fn row_to_exam(row: ExamRow) -> Result<Exam, ExamRepositoryError> {
    let questions: Vec<ExamQuestion> = serde_json::from_value(row.questions)
        .map_err(|err| ExamRepositoryError::query(format!("stored questions invalid: {err}")))?;
    let passing_percent = u8::try_from(row.passing_percent)
        .map_err(|_| ExamRepositoryError::query("stored passing percentage out of range"))?;

    Ok(Exam {
        id: row.id,
        course_id: row.course_id,
        title: row.title,
        passing_percent,
        questions,
    })
}

fn row_to_attempt(row: ExamAttemptRow) -> Result<ExamAttempt, ExamRepositoryError> {
    let percent = u8::try_from(row.percent)
        .map_err(|_| ExamRepositoryError::query("stored attempt percentage out of range"))?;

    Ok(ExamAttempt {
        id: row.id,
        exam_id: row.exam_id,
        user_id: UserId::from_uuid(row.user_id),
        score: row.score,
        percent,
        passed: row.passed,
        submitted_at: row.submitted_at,
    })
}

#[async_trait]
impl ExamRepository for DieselExamRepository {
    async fn find_for_course(
        &self,
        course_id: uuid::Uuid,
    ) -> Result<Option<Exam>, ExamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ExamRow> = exams::table
            .filter(exams::course_id.eq(course_id))
            .select(ExamRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_exam).transpose()
    }

    async fn insert_attempt(&self, attempt: &ExamAttempt) -> Result<(), ExamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewExamAttemptRow {
            id: attempt.id,
            exam_id: attempt.exam_id,
            user_id: *attempt.user_id.as_uuid(),
            score: attempt.score,
            percent: i16::from(attempt.percent),
            passed: attempt.passed,
            submitted_at: attempt.submitted_at,
        };

        diesel::insert_into(exam_attempts::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_passing_attempt(
        &self,
        user_id: UserId,
        course_id: uuid::Uuid,
    ) -> Result<Option<ExamAttempt>, ExamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ExamAttemptRow> = exam_attempts::table
            .inner_join(exams::table)
            .filter(exams::course_id.eq(course_id))
            .filter(exam_attempts::user_id.eq(user_id.as_uuid()))
            .filter(exam_attempts::passed.eq(true))
            .order(exam_attempts::submitted_at.asc())
            .select(ExamAttemptRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_attempt).transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn row_converts_to_exam_with_questions() {
        let question_id = uuid::Uuid::new_v4();
        let row = ExamRow {
            id: uuid::Uuid::new_v4(),
            course_id: uuid::Uuid::new_v4(),
            title: "Final exam".to_owned(),
            passing_percent: 70,
            questions: serde_json::json!([{
                "id": question_id,
                "prompt": "What moves ownership?",
                "choices": ["assignment", "borrowing"],
                "correct_choice": 0,
            }]),
        };

        let exam = row_to_exam(row).expect("valid row");
        assert_eq!(exam.passing_percent, 70);
        assert_eq!(exam.questions.len(), 1);
        assert_eq!(exam.questions[0].id, question_id);
    }

    #[rstest]
    fn malformed_stored_questions_are_a_query_error() {
        let row = ExamRow {
            id: uuid::Uuid::new_v4(),
            course_id: uuid::Uuid::new_v4(),
            title: "Final exam".to_owned(),
            passing_percent: 70,
            questions: serde_json::json!({"not": "an array"}),
        };

        let err = row_to_exam(row).expect_err("invalid questions");
        assert!(matches!(err, ExamRepositoryError::Query { .. }));
    }

    #[rstest]
    fn attempt_row_converts_to_domain() {
        let row = ExamAttemptRow {
            id: uuid::Uuid::new_v4(),
            exam_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            score: 8,
            percent: 80,
            passed: true,
            submitted_at: Utc::now(),
        };

        let attempt = row_to_attempt(row).expect("valid row");
        assert!(attempt.passed);
        assert_eq!(attempt.percent, 80);
    }
}
