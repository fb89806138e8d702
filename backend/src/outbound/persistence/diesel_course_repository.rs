//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseFilter, CourseLevel, SubscriptionTier, UserId};

use super::error_mapping;
use super::models::{CourseRow, CourseUpdate, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    error_mapping::map_pool_error(error, CourseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    error_mapping::map_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

/// Rebuild a domain course from a row, re-running the domain validation.
fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    let level: CourseLevel = row
        .level
        .parse()
        .map_err(|err| CourseRepositoryError::query(format!("stored level invalid: {err}")))?;
    let tier: SubscriptionTier = row
        .tier
        .parse()
        .map_err(|err| CourseRepositoryError::query(format!("stored tier invalid: {err}")))?;

    Course::new(CourseDraft {
        id: row.id,
        instructor_id: UserId::from_uuid(row.instructor_id),
        title: row.title,
        description: row.description,
        level,
        category: row.category,
        tier,
        published: row.published,
        created_at: row.created_at,
    })
    .map_err(|err| CourseRepositoryError::query(format!("stored course invalid: {err}")))
}

fn course_to_new_row(course: &Course) -> NewCourseRow<'_> {
    NewCourseRow {
        id: course.id(),
        instructor_id: *course.instructor_id().as_uuid(),
        title: course.title(),
        description: course.description(),
        level: course.level().as_str(),
        category: course.category(),
        tier: course.tier().as_str(),
        published: course.is_published(),
        created_at: course.created_at(),
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(courses::table)
            .values(&course_to_new_row(course))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = CourseUpdate {
            title: course.title(),
            description: course.description(),
            level: course.level().as_str(),
            category: course.category(),
            tier: course.tier().as_str(),
        };

        diesel::update(courses::table.filter(courses::id.eq(course.id())))
            .set(&update)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: uuid::Uuid) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .filter(courses::id.eq(id))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_course).transpose()
    }

    async fn list_published(
        &self,
        filter: &CourseFilter,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = courses::table
            .filter(courses::published.eq(true))
            .into_boxed();

        if let Some(category) = &filter.category {
            query = query.filter(courses::category.eq(category.clone()));
        }
        if let Some(level) = filter.level {
            query = query.filter(courses::level.eq(level.as_str()));
        }

        let rows: Vec<CourseRow> = query
            .order(courses::created_at.desc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_course).collect()
    }

    async fn list_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .filter(courses::instructor_id.eq(instructor_id.as_uuid()))
            .order(courses::created_at.desc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_course).collect()
    }

    async fn set_published(
        &self,
        id: uuid::Uuid,
        published: bool,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(courses::table.filter(courses::id.eq(id)))
            .set(courses::published.eq(published))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn count_all(&self) -> Result<u64, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = courses::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }

    async fn count_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<u64, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = courses::table
            .filter(courses::instructor_id.eq(instructor_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }
}
