//! Course authoring and catalogue services.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::course::{Course, CourseDraft, CourseFilter};
use crate::domain::lesson::{Lesson, LessonDraft};
use crate::domain::ports::{
    CourseCommand, CourseDetail, CoursePayload, CourseQuery, CourseRepository,
    CreateCourseRequest, CreateLessonRequest, LessonPayload, LessonRepository,
    UpdateCourseRequest,
};
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Repository-backed implementation of the course ports.
#[derive(Clone)]
pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
}

impl CourseService {
    /// Create a new service over the course and lesson repositories.
    pub fn new(courses: Arc<dyn CourseRepository>, lessons: Arc<dyn LessonRepository>) -> Self {
        Self { courses, lessons }
    }

    /// Fetch a course and check the caller may manage it.
    ///
    /// Missing courses are `NotFound`; courses owned by someone else are
    /// `Forbidden` unless the caller is an admin.
    async fn owned_course(
        &self,
        caller: UserId,
        is_admin: bool,
        course_id: Uuid,
    ) -> Result<Course, Error> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))?;
        if !is_admin && course.instructor_id() != caller {
            return Err(Error::forbidden("you do not own this course"));
        }
        Ok(course)
    }
}

#[async_trait]
impl CourseCommand for CourseService {
    async fn create(
        &self,
        instructor_id: UserId,
        request: CreateCourseRequest,
    ) -> Result<CoursePayload, Error> {
        let course = Course::new(CourseDraft {
            id: Uuid::new_v4(),
            instructor_id,
            title: request.title,
            description: request.description,
            level: request.level,
            category: request.category,
            tier: request.tier,
            published: false,
            created_at: Utc::now(),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.courses.insert(&course).await?;
        Ok(CoursePayload::from(course))
    }

    async fn update(
        &self,
        caller: UserId,
        is_admin: bool,
        course_id: Uuid,
        request: UpdateCourseRequest,
    ) -> Result<CoursePayload, Error> {
        let current = self.owned_course(caller, is_admin, course_id).await?;

        let updated = Course::new(CourseDraft {
            id: current.id(),
            instructor_id: current.instructor_id(),
            title: request.title.unwrap_or_else(|| current.title().to_owned()),
            description: request
                .description
                .unwrap_or_else(|| current.description().to_owned()),
            level: request.level.unwrap_or(current.level()),
            category: request
                .category
                .unwrap_or_else(|| current.category().to_owned()),
            tier: request.tier.unwrap_or(current.tier()),
            published: current.is_published(),
            created_at: current.created_at(),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.courses.update(&updated).await?;
        Ok(CoursePayload::from(updated))
    }

    async fn set_published(
        &self,
        caller: UserId,
        is_admin: bool,
        course_id: Uuid,
        published: bool,
    ) -> Result<CoursePayload, Error> {
        let course = self.owned_course(caller, is_admin, course_id).await?;

        let changed = self.courses.set_published(course_id, published).await?;
        if !changed {
            return Err(Error::not_found(format!("course {course_id} not found")));
        }

        let mut payload = CoursePayload::from(course);
        payload.published = published;
        Ok(payload)
    }

    async fn add_lesson(
        &self,
        caller: UserId,
        is_admin: bool,
        course_id: Uuid,
        request: CreateLessonRequest,
    ) -> Result<LessonPayload, Error> {
        self.owned_course(caller, is_admin, course_id).await?;

        let lesson = Lesson::new(LessonDraft {
            id: Uuid::new_v4(),
            course_id,
            position: request.position,
            title: request.title,
            kind: request.kind,
            duration_seconds: request.duration_seconds,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.lessons.insert(&lesson).await?;
        Ok(LessonPayload::from(lesson))
    }
}

#[async_trait]
impl CourseQuery for CourseService {
    async fn list_published(&self, filter: CourseFilter) -> Result<Vec<CoursePayload>, Error> {
        let courses = self.courses.list_published(&filter).await?;
        Ok(courses.into_iter().map(Into::into).collect())
    }

    async fn detail(
        &self,
        viewer: Option<(UserId, bool)>,
        course_id: Uuid,
    ) -> Result<CourseDetail, Error> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))?;

        // Unpublished courses are indistinguishable from missing ones for
        // everyone but their owner and admins.
        let visible = match viewer {
            Some((caller, is_admin)) => course.is_visible_to_owner_or_admin(caller, is_admin),
            None => course.is_published(),
        };
        if !visible {
            return Err(Error::not_found(format!("course {course_id} not found")));
        }

        let lessons = self.lessons.list_for_course(course_id).await?;
        Ok(CourseDetail {
            course: CoursePayload::from(course),
            lessons: lessons.into_iter().map(Into::into).collect(),
        })
    }

    async fn list_for_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<CoursePayload>, Error> {
        let courses = self.courses.list_by_instructor(instructor_id).await?;
        Ok(courses.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
