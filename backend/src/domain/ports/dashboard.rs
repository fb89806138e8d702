//! Driving port for dashboard statistics.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::profile::{Role, UserId};
use crate::domain::Error;

/// Aggregate counters shown on the dashboard.
///
/// Admins see platform-wide numbers; instructors see only their own
/// courses and the enrollments in them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Registered users. Zero for instructor views.
    pub total_users: u64,
    /// Courses in scope for the viewer.
    pub total_courses: u64,
    /// Enrollments in scope for the viewer.
    pub total_enrollments: u64,
    /// Enrollments that reached 100 percent.
    pub completed_enrollments: u64,
    /// Completed over total enrollments, rounded half up.
    pub completion_rate_percent: u8,
}

/// Driving port for dashboard reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Compute the stats visible to the given viewer.
    async fn stats(&self, viewer_id: UserId, role: Role) -> Result<DashboardStats, Error>;
}

/// Fixture dashboard with all counters at zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDashboardQuery;

#[async_trait]
impl DashboardQuery for FixtureDashboardQuery {
    async fn stats(&self, _viewer_id: UserId, _role: Role) -> Result<DashboardStats, Error> {
        Ok(DashboardStats {
            total_users: 0,
            total_courses: 0,
            total_enrollments: 0,
            completed_enrollments: 0,
            completion_rate_percent: 0,
        })
    }
}
