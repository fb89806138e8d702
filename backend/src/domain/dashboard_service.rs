//! Dashboard statistics service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CourseRepository, DashboardQuery, DashboardStats, EnrollmentRepository, ProfileRepository,
};
use crate::domain::profile::{Role, UserId};
use crate::domain::progress::rounded_percent;
use crate::domain::Error;

/// Repository-backed implementation of the dashboard port.
#[derive(Clone)]
pub struct DashboardService {
    profiles: Arc<dyn ProfileRepository>,
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl DashboardService {
    /// Create a new service over the counting repositories.
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            profiles,
            courses,
            enrollments,
        }
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn stats(&self, viewer_id: UserId, role: Role) -> Result<DashboardStats, Error> {
        let (total_users, total_courses, counts) = match role {
            Role::Admin => {
                let users = self.profiles.count_all().await?;
                let courses = self.courses.count_all().await?;
                let counts = self.enrollments.completion_counts(None).await?;
                (users, courses, counts)
            }
            Role::Instructor => {
                let courses = self.courses.count_by_instructor(viewer_id).await?;
                let counts = self.enrollments.completion_counts(Some(viewer_id)).await?;
                (0, courses, counts)
            }
            Role::Student => {
                return Err(Error::forbidden("the dashboard requires an elevated role"));
            }
        };

        Ok(DashboardStats {
            total_users,
            total_courses,
            total_enrollments: counts.total,
            completed_enrollments: counts.completed,
            completion_rate_percent: rounded_percent(counts.completed, counts.total),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        EnrollmentCounts, MockCourseRepository, MockEnrollmentRepository, MockProfileRepository,
    };
    use crate::domain::ErrorCode;

    #[rstest]
    #[tokio::test]
    async fn admin_stats_are_platform_wide() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_count_all().returning(|| Ok(120));
        let mut courses = MockCourseRepository::new();
        courses.expect_count_all().returning(|| Ok(14));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_completion_counts().returning(|scope| {
            assert!(scope.is_none());
            Ok(EnrollmentCounts {
                total: 300,
                completed: 100,
            })
        });

        let service =
            DashboardService::new(Arc::new(profiles), Arc::new(courses), Arc::new(enrollments));
        let stats = service
            .stats(UserId::random(), Role::Admin)
            .await
            .expect("admin stats");

        assert_eq!(stats.total_users, 120);
        assert_eq!(stats.total_courses, 14);
        assert_eq!(stats.completion_rate_percent, 33);
    }

    #[rstest]
    #[tokio::test]
    async fn instructor_stats_are_scoped_to_their_courses() {
        let instructor = UserId::random();

        let profiles = MockProfileRepository::new();
        let mut courses = MockCourseRepository::new();
        courses
            .expect_count_by_instructor()
            .returning(|_| Ok(3));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_completion_counts()
            .withf(move |scope| *scope == Some(instructor))
            .returning(|_| {
                Ok(EnrollmentCounts {
                    total: 10,
                    completed: 10,
                })
            });

        let service =
            DashboardService::new(Arc::new(profiles), Arc::new(courses), Arc::new(enrollments));
        let stats = service
            .stats(instructor, Role::Instructor)
            .await
            .expect("instructor stats");

        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.total_courses, 3);
        assert_eq!(stats.completion_rate_percent, 100);
    }

    #[rstest]
    #[tokio::test]
    async fn students_are_refused() {
        let service = DashboardService::new(
            Arc::new(MockProfileRepository::new()),
            Arc::new(MockCourseRepository::new()),
            Arc::new(MockEnrollmentRepository::new()),
        );

        let err = service
            .stats(UserId::random(), Role::Student)
            .await
            .expect_err("students have no dashboard");

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn an_empty_platform_has_a_zero_completion_rate() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_count_all().returning(|| Ok(0));
        let mut courses = MockCourseRepository::new();
        courses.expect_count_all().returning(|| Ok(0));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_completion_counts()
            .returning(|_| Ok(EnrollmentCounts::default()));

        let service =
            DashboardService::new(Arc::new(profiles), Arc::new(courses), Arc::new(enrollments));
        let stats = service
            .stats(UserId::random(), Role::Admin)
            .await
            .expect("empty stats");

        assert_eq!(stats.completion_rate_percent, 0);
    }
}
