//! PostgreSQL-backed `LessonRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LessonRepository, LessonRepositoryError};
use crate::domain::{Lesson, LessonDraft, LessonKind};

use super::error_mapping;
use super::models::{LessonRow, NewLessonRow};
use super::pool::{DbPool, PoolError};
use super::schema::lessons;

/// Diesel-backed implementation of the `LessonRepository` port.
#[derive(Clone)]
pub struct DieselLessonRepository {
    pool: DbPool,
}

impl DieselLessonRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LessonRepositoryError {
    error_mapping::map_pool_error(error, LessonRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LessonRepositoryError {
    error_mapping::map_diesel_error(
        error,
        LessonRepositoryError::query,
        LessonRepositoryError::connection,
    )
}

fn row_to_lesson(row: LessonRow) -> Result<Lesson, LessonRepositoryError> {
    let kind: LessonKind = row
        .kind
        .parse()
        .map_err(|err| LessonRepositoryError::query(format!("stored kind invalid: {err}")))?;

    Lesson::new(LessonDraft {
        id: row.id,
        course_id: row.course_id,
        position: row.position,
        title: row.title,
        kind,
        duration_seconds: row.duration_seconds,
    })
    .map_err(|err| LessonRepositoryError::query(format!("stored lesson invalid: {err}")))
}

#[async_trait]
impl LessonRepository for DieselLessonRepository {
    async fn insert(&self, lesson: &Lesson) -> Result<(), LessonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewLessonRow {
            id: lesson.id(),
            course_id: lesson.course_id(),
            position: lesson.position(),
            title: lesson.title(),
            kind: lesson.kind().as_str(),
            duration_seconds: lesson.duration_seconds(),
        };

        diesel::insert_into(lessons::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: uuid::Uuid) -> Result<Option<Lesson>, LessonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<LessonRow> = lessons::table
            .filter(lessons::id.eq(id))
            .select(LessonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_lesson).transpose()
    }

    async fn list_for_course(
        &self,
        course_id: uuid::Uuid,
    ) -> Result<Vec<Lesson>, LessonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LessonRow> = lessons::table
            .filter(lessons::course_id.eq(course_id))
            .order(lessons::position.asc())
            .select(LessonRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_lesson).collect()
    }

    async fn count_for_course(&self, course_id: uuid::Uuid) -> Result<u64, LessonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = lessons::table
            .filter(lessons::course_id.eq(course_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }
}
