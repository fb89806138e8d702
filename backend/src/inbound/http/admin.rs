//! Administration API handlers.
//!
//! ```text
//! GET  /api/v1/admin/users
//! PUT  /api/v1/admin/users/{userId}/role {"role":"instructor"}
//! POST /api/v1/admin/reminders/run
//! ```
//!
//! Every route requires an admin session; the role check runs before any
//! other work.

use actix_web::{get, post, put, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::ports::ReminderRunReport;
use crate::domain::{Error, Role, UserId};
use crate::inbound::http::auth::ProfilePayload;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

const USER_ID_FIELD: FieldName = FieldName::new("userId");

/// Request body for changing a user's role.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetRoleRequest {
    /// Role to assign.
    pub role: Role,
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "Users", body = [ProfilePayload]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProfilePayload>>> {
    let caller = session.require_user_id()?;
    state.require_admin(caller).await?;
    let users = state.user_admin.list_users().await?;
    Ok(web::Json(users.into_iter().map(ProfilePayload::from).collect()))
}

/// Assign a role to a user.
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{userId}/role",
    params(("userId" = uuid::Uuid, Path, description = "User identifier")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = ProfilePayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "setUserRole"
)]
#[put("/admin/users/{user_id}/role")]
pub async fn set_user_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SetRoleRequest>,
) -> ApiResult<web::Json<ProfilePayload>> {
    let caller = session.require_user_id()?;
    state.require_admin(caller).await?;
    let user_id = UserId::from_uuid(parse_uuid(&path.into_inner(), USER_ID_FIELD)?);
    let profile = state.user_admin.set_role(user_id, payload.role).await?;
    Ok(web::Json(ProfilePayload::from(profile)))
}

/// Send every due reminder email now.
///
/// Intended to be called by a scheduler; running it twice is harmless
/// because sent reminders are excluded from the due set.
#[utoipa::path(
    post,
    path = "/api/v1/admin/reminders/run",
    responses(
        (status = 200, description = "Dispatch report", body = ReminderRunReport),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "runReminders"
)]
#[post("/admin/reminders/run")]
pub async fn run_reminders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ReminderRunReport>> {
    let caller = session.require_user_id()?;
    state.require_admin(caller).await?;
    let report = state.reminders.send_due(Utc::now()).await?;
    Ok(web::Json(report))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test as actix_test, web, App};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{MockProfileQuery, MockReminderDispatch, ReminderFailure};
    use crate::domain::{DisplayName, EmailAddress, Profile};
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
                    .service(list_users)
                    .service(set_user_role)
                    .service(run_reminders),
            )
    }

    fn profile_with_role(id: UserId, role: Role) -> Profile {
        Profile {
            id,
            email: EmailAddress::new("someone@example.com").expect("valid email"),
            display_name: DisplayName::new("Someone").expect("valid name"),
            role,
            created_at: chrono::Utc::now(),
        }
    }

    fn ports_with_role(role: Role) -> crate::inbound::http::state::HttpStatePorts {
        let mut profiles = MockProfileQuery::new();
        profiles
            .expect_get()
            .returning(move |id| Ok(profile_with_role(id, role)));
        let mut ports = fixture_ports();
        ports.profiles = Arc::new(profiles);
        ports
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(serde_json::json!({
                    "email": "admin@example.com",
                    "password": "password",
                }))
                .to_request(),
        )
        .await;
        response
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn admin_routes_reject_non_admins() {
        let app =
            actix_test::init_service(test_app(HttpState::new(ports_with_role(Role::Student))))
                .await;
        let cookie = login_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/users")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn admin_can_list_users() {
        let app =
            actix_test::init_service(test_app(HttpState::new(ports_with_role(Role::Admin)))).await;
        let cookie = login_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/users")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
    }

    #[actix_web::test]
    async fn reminder_run_reports_failures() {
        let mut reminders = MockReminderDispatch::new();
        reminders.expect_send_due().return_once(|_| {
            Ok(ReminderRunReport {
                sent: 2,
                failed: vec![ReminderFailure {
                    notification_id: uuid::Uuid::new_v4(),
                    message: "mailbox unreachable".to_owned(),
                }],
            })
        });

        let mut ports = ports_with_role(Role::Admin);
        ports.reminders = Arc::new(reminders);
        let app = actix_test::init_service(test_app(HttpState::new(ports))).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/reminders/run")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("report JSON");
        assert_eq!(value.get("sent").and_then(Value::as_u64), Some(2));
        assert_eq!(
            value
                .get("failed")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(1)
        );
    }
}
