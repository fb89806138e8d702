//! Notification feed API handlers.
//!
//! ```text
//! GET  /api/v1/notifications
//! POST /api/v1/notifications/{notificationId}/read
//! ```

use actix_web::{get, post, web, HttpResponse};

use crate::domain::ports::NotificationPayload;
use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

const NOTIFICATION_ID_FIELD: FieldName = FieldName::new("notificationId");

/// List the caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Notifications", body = [NotificationPayload]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<NotificationPayload>>> {
    let user_id = session.require_user_id()?;
    let notifications = state.notifications.list(user_id).await?;
    Ok(web::Json(notifications))
}

/// Mark one of the caller's notifications as read.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{notificationId}/read",
    params(("notificationId" = uuid::Uuid, Path, description = "Notification identifier")),
    responses(
        (status = 204, description = "Marked as read"),
        (status = 400, description = "Invalid notification id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Notification not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[post("/notifications/{notification_id}/read")]
pub async fn mark_notification_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let notification_id = parse_uuid(&path.into_inner(), NOTIFICATION_ID_FIELD)?;
    state
        .notifications
        .mark_read(user_id, notification_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test as actix_test, web, App};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockNotificationFeed;
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
                    .service(list_notifications)
                    .service(mark_notification_read),
            )
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
    async fn feed_requires_a_session() {
        let app = actix_test::init_service(test_app(HttpState::new(fixture_ports()))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/notifications")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn mark_read_returns_no_content() {
        let notification_id = uuid::Uuid::new_v4();
        let mut feed = MockNotificationFeed::new();
        feed.expect_mark_read()
            .withf(move |_, id| *id == notification_id)
            .return_once(|_, _| Ok(()));

        let mut ports = fixture_ports();
        ports.notifications = Arc::new(feed);
        let app = actix_test::init_service(test_app(HttpState::new(ports))).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/notifications/{notification_id}/read"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn empty_feed_serialises_as_empty_array() {
        let app = actix_test::init_service(test_app(HttpState::new(fixture_ports()))).await;
        let cookie = login_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/notifications")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("feed JSON");
        assert_eq!(value.as_array().map(Vec::len), Some(0));
    }
}
