//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EnrollmentCounts, EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{Enrollment, UserId};

use super::error_mapping::{self, is_unique_violation};
use super::models::{EnrollmentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, enrollments};

/// Diesel-backed implementation of the `EnrollmentRepository` port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    error_mapping::map_pool_error(error, EnrollmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    error_mapping::map_diesel_error(
        error,
        EnrollmentRepositoryError::query,
        EnrollmentRepositoryError::connection,
    )
}

fn row_to_enrollment(row: EnrollmentRow) -> Result<Enrollment, EnrollmentRepositoryError> {
    let progress_percent = u8::try_from(row.progress_percent).map_err(|_| {
        EnrollmentRepositoryError::query("stored progress percentage out of range")
    })?;

    Ok(Enrollment {
        user_id: UserId::from_uuid(row.user_id),
        course_id: row.course_id,
        progress_percent,
        enrolled_at: row.enrolled_at,
        completed_at: row.completed_at,
    })
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn find(
        &self,
        user_id: UserId,
        course_id: uuid::Uuid,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EnrollmentRow> = enrollments::table
            .find((user_id.as_uuid(), course_id))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_enrollment).transpose()
    }

    async fn insert(&self, enrollment: &Enrollment) -> Result<(), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewEnrollmentRow {
            user_id: *enrollment.user_id.as_uuid(),
            course_id: enrollment.course_id,
            progress_percent: i16::from(enrollment.progress_percent),
            enrolled_at: enrollment.enrolled_at,
            completed_at: enrollment.completed_at,
        };

        // A concurrent duplicate enroll is harmless; first writer wins.
        diesel::insert_into(enrollments::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .or_else(|err| {
                if is_unique_violation(&err) {
                    Ok(())
                } else {
                    Err(map_diesel_error(err))
                }
            })
    }

    async fn update_progress(
        &self,
        user_id: UserId,
        course_id: uuid::Uuid,
        progress_percent: u8,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(enrollments::table.find((user_id.as_uuid(), course_id)))
            .set((
                enrollments::progress_percent.eq(i16::from(progress_percent)),
                enrollments::completed_at.eq(completed_at),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::user_id.eq(user_id.as_uuid()))
            .order(enrollments::enrolled_at.desc())
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_enrollment).collect()
    }

    async fn completion_counts(
        &self,
        instructor_id: Option<UserId>,
    ) -> Result<EnrollmentCounts, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, completed): (i64, i64) = match instructor_id {
            Some(instructor_id) => {
                let total: i64 = enrollments::table
                    .inner_join(courses::table)
                    .filter(courses::instructor_id.eq(instructor_id.as_uuid()))
                    .count()
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                let completed: i64 = enrollments::table
                    .inner_join(courses::table)
                    .filter(courses::instructor_id.eq(instructor_id.as_uuid()))
                    .filter(enrollments::completed_at.is_not_null())
                    .count()
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                (total, completed)
            }
            None => {
                let total: i64 = enrollments::table
                    .count()
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                let completed: i64 = enrollments::table
                    .filter(enrollments::completed_at.is_not_null())
                    .count()
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                (total, completed)
            }
        };

        Ok(EnrollmentCounts {
            total: total.unsigned_abs(),
            completed: completed.unsigned_abs(),
        })
    }
}
