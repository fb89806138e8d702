//! Dashboard API handler.
//!
//! ```text
//! GET /api/v1/dashboard
//! ```
//!
//! Admins see platform-wide figures; instructors see figures scoped to
//! their own courses; students are turned away.

use actix_web::{get, web};

use crate::domain::ports::DashboardStats;
use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Fetch aggregate platform statistics for the caller's role.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Aggregate statistics", body = DashboardStats),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Students have no dashboard", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardStats"
)]
#[get("/dashboard")]
pub async fn dashboard_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardStats>> {
    let user_id = session.require_user_id()?;
    let profile = state.caller(user_id).await?;
    let stats = state.dashboard.stats(user_id, profile.role).await?;
    Ok(web::Json(stats))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test as actix_test, web, App};
    use chrono::Utc;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{MockDashboardQuery, MockProfileQuery};
    use crate::domain::{DisplayName, EmailAddress, Profile, Role};
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{fixture_ports, test_session_middleware};

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(crate::inbound::http::auth::login)
                    .service(dashboard_stats),
            )
    }

    #[actix_web::test]
    async fn stats_require_a_session() {
        let app = actix_test::init_service(test_app(HttpState::new(fixture_ports()))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboard")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn admin_receives_platform_figures() {
        let mut profiles = MockProfileQuery::new();
        profiles.expect_get().returning(|id| {
            Ok(Profile {
                id,
                email: EmailAddress::new("admin@example.com").expect("valid email"),
                display_name: DisplayName::new("Admin").expect("valid name"),
                role: Role::Admin,
                created_at: Utc::now(),
            })
        });
        let mut dashboard = MockDashboardQuery::new();
        dashboard
            .expect_stats()
            .withf(|_, role| *role == Role::Admin)
            .return_once(|_, _| {
                Ok(DashboardStats {
                    total_users: 10,
                    total_courses: 4,
                    total_enrollments: 25,
                    completed_enrollments: 5,
                    completion_rate_percent: 20,
                })
            });

        let mut ports = fixture_ports();
        ports.profiles = Arc::new(profiles);
        ports.dashboard = Arc::new(dashboard);
        let app = actix_test::init_service(test_app(HttpState::new(ports))).await;

        let login = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(serde_json::json!({
                    "email": "admin@example.com",
                    "password": "password",
                }))
                .to_request(),
        )
        .await;
        let cookie = login
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("stats JSON");
        assert_eq!(
            value.get("completionRatePercent").and_then(Value::as_u64),
            Some(20)
        );
    }
}
