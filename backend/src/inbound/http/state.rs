//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AuthCommand, Certification, CourseCommand, CourseQuery, DashboardQuery, EnrollmentCommand,
    EnrollmentQuery, Examination, NotificationFeed, ProfileQuery, ReminderDispatch,
    SubscriptionSync, UserAdmin,
};
use crate::domain::{Error, Profile, Role, UserId};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthCommand>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub user_admin: Arc<dyn UserAdmin>,
    pub course_command: Arc<dyn CourseCommand>,
    pub course_query: Arc<dyn CourseQuery>,
    pub enrollment_command: Arc<dyn EnrollmentCommand>,
    pub enrollment_query: Arc<dyn EnrollmentQuery>,
    pub examination: Arc<dyn Examination>,
    pub certification: Arc<dyn Certification>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub notifications: Arc<dyn NotificationFeed>,
    pub reminders: Arc<dyn ReminderDispatch>,
    pub subscription_sync: Arc<dyn SubscriptionSync>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthCommand>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub user_admin: Arc<dyn UserAdmin>,
    pub course_command: Arc<dyn CourseCommand>,
    pub course_query: Arc<dyn CourseQuery>,
    pub enrollment_command: Arc<dyn EnrollmentCommand>,
    pub enrollment_query: Arc<dyn EnrollmentQuery>,
    pub examination: Arc<dyn Examination>,
    pub certification: Arc<dyn Certification>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub notifications: Arc<dyn NotificationFeed>,
    pub reminders: Arc<dyn ReminderDispatch>,
    pub subscription_sync: Arc<dyn SubscriptionSync>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Fetch the caller's profile, or 401 when the account no longer exists.
    ///
    /// A valid session cookie can outlive its account; treating the stale
    /// cookie as unauthenticated forces a fresh login.
    pub(crate) async fn caller(&self, user_id: UserId) -> Result<Profile, Error> {
        match self.profiles.get(user_id).await {
            Ok(profile) => Ok(profile),
            Err(error) if matches!(error.code(), crate::domain::ErrorCode::NotFound) => {
                Err(Error::unauthorized("login required"))
            }
            Err(error) => Err(error),
        }
    }

    /// Require the caller to be an admin.
    pub(crate) async fn require_admin(&self, user_id: UserId) -> Result<Profile, Error> {
        let profile = self.caller(user_id).await?;
        match profile.role {
            Role::Admin => Ok(profile),
            Role::Student | Role::Instructor => {
                Err(Error::forbidden("admin access required"))
            }
        }
    }

    /// Require the caller to be an instructor or admin; returns whether the
    /// caller is an admin for ownership bypass decisions.
    pub(crate) async fn require_author(&self, user_id: UserId) -> Result<(Profile, bool), Error> {
        let profile = self.caller(user_id).await?;
        match profile.role {
            Role::Admin => Ok((profile, true)),
            Role::Instructor => Ok((profile, false)),
            Role::Student => Err(Error::forbidden("instructor access required")),
        }
    }

    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            profiles,
            user_admin,
            course_command,
            course_query,
            enrollment_command,
            enrollment_query,
            examination,
            certification,
            dashboard,
            notifications,
            reminders,
            subscription_sync,
        } = ports;
        Self {
            auth,
            profiles,
            user_admin,
            course_command,
            course_query,
            enrollment_command,
            enrollment_query,
            examination,
            certification,
            dashboard,
            notifications,
            reminders,
            subscription_sync,
        }
    }
}
