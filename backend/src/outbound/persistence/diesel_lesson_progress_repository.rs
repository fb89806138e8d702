//! PostgreSQL-backed `LessonProgressRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LessonProgressRepository, LessonProgressRepositoryError};
use crate::domain::{LessonProgress, UserId};

use super::error_mapping;
use super::models::NewLessonProgressRow;
use super::pool::{DbPool, PoolError};
use super::schema::lesson_progress;

/// Diesel-backed implementation of the `LessonProgressRepository` port.
#[derive(Clone)]
pub struct DieselLessonProgressRepository {
    pool: DbPool,
}

impl DieselLessonProgressRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LessonProgressRepositoryError {
    error_mapping::map_pool_error(error, LessonProgressRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LessonProgressRepositoryError {
    error_mapping::map_diesel_error(
        error,
        LessonProgressRepositoryError::query,
        LessonProgressRepositoryError::connection,
    )
}

#[async_trait]
impl LessonProgressRepository for DieselLessonProgressRepository {
    async fn upsert(&self, progress: &LessonProgress) -> Result<(), LessonProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewLessonProgressRow {
            user_id: *progress.user_id.as_uuid(),
            lesson_id: progress.lesson_id,
            course_id: progress.course_id,
            completed: progress.completed,
            watch_time_seconds: progress.watch_time_seconds,
            updated_at: progress.updated_at,
        };

        // Completion is monotonic and watch time only accumulates upward.
        diesel::insert_into(lesson_progress::table)
            .values(&new_row)
            .on_conflict((lesson_progress::user_id, lesson_progress::lesson_id))
            .do_update()
            .set((
                lesson_progress::completed
                    .eq(lesson_progress::completed
                        .or::<_, diesel::sql_types::Bool>(new_row.completed)),
                lesson_progress::watch_time_seconds.eq(diesel::dsl::sql::<
                    diesel::sql_types::Int4,
                >(
                    "GREATEST(lesson_progress.watch_time_seconds, excluded.watch_time_seconds)",
                )),
                lesson_progress::updated_at.eq(new_row.updated_at),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn count_completed(
        &self,
        user_id: UserId,
        course_id: uuid::Uuid,
    ) -> Result<u64, LessonProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = lesson_progress::table
            .filter(lesson_progress::user_id.eq(user_id.as_uuid()))
            .filter(lesson_progress::course_id.eq(course_id))
            .filter(lesson_progress::completed.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }
}
