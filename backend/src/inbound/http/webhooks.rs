//! Payment webhook handler.
//!
//! ```text
//! POST /api/v1/webhooks/payments
//! ```
//!
//! The processor authenticates with an HMAC signature header rather than a
//! session; the signature is checked against the raw body before the JSON
//! is decoded.

use actix_web::{post, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::domain::{Error, PaymentEvent, PaymentEventEnvelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::webhook_signature::{WebhookVerifier, SIGNATURE_HEADER};
use crate::inbound::http::ApiResult;

/// Ingest a payment processor event.
#[utoipa::path(
    post,
    path = "/api/v1/webhooks/payments",
    request_body = String,
    params(
        ("Payment-Signature" = String, Header, description = "t=<ts>,v1=<hex HMAC-SHA256>")
    ),
    responses(
        (status = 204, description = "Event applied"),
        (status = 400, description = "Unknown event type or malformed body", body = Error),
        (status = 401, description = "Missing or invalid signature", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["webhooks"],
    operation_id = "paymentWebhook",
    security([])
)]
#[post("/webhooks/payments")]
pub async fn payment_webhook(
    state: web::Data<HttpState>,
    verifier: web::Data<WebhookVerifier>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let signature = request
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized("missing webhook signature"))?;
    verifier
        .verify(&body, signature)
        .map_err(|_| Error::unauthorized("invalid webhook signature"))?;

    let envelope: PaymentEventEnvelope = serde_json::from_slice(&body)
        .map_err(|err| Error::invalid_request(format!("malformed webhook body: {err}")))?;
    let event =
        PaymentEvent::from_envelope(envelope).map_err(|err| Error::invalid_request(err.to_string()))?;

    info!(event = ?event, "payment webhook received");
    state.subscription_sync.apply(event).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test as actix_test, web, App};

    use super::*;
    use crate::domain::ports::MockSubscriptionSync;
    use crate::domain::SubscriptionTier;
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::fixture_ports;
    use crate::inbound::http::webhook_signature::sign;

    const SECRET: &str = "whsec_test_secret";

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
            .app_data(web::Data::new(WebhookVerifier::new(SECRET)))
            .service(web::scope("/api/v1").service(payment_webhook))
    }

    fn subscription_body(user_id: uuid::Uuid) -> String {
        serde_json::json!({
            "type": "customer.subscription.created",
            "data": {
                "userId": user_id,
                "tier": "premium",
            },
        })
        .to_string()
    }

    #[actix_web::test]
    async fn unsigned_deliveries_are_rejected() {
        let app = actix_test::init_service(test_app(HttpState::new(fixture_ports()))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/webhooks/payments")
                .set_payload(subscription_body(uuid::Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn badly_signed_deliveries_are_rejected() {
        let app = actix_test::init_service(test_app(HttpState::new(fixture_ports()))).await;
        let body = subscription_body(uuid::Uuid::new_v4());
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/webhooks/payments")
                .insert_header((SIGNATURE_HEADER, "t=1,v1=deadbeef"))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn signed_subscription_event_is_applied() {
        let user_id = uuid::Uuid::new_v4();
        let mut sync = MockSubscriptionSync::new();
        sync.expect_apply()
            .withf(move |event| {
                matches!(
                    event,
                    PaymentEvent::SubscriptionUpserted { user_id: id, tier, .. }
                        if *id.as_uuid() == user_id && *tier == SubscriptionTier::Premium
                )
            })
            .return_once(|_| Ok(()));

        let mut ports = fixture_ports();
        ports.subscription_sync = Arc::new(sync);
        let app = actix_test::init_service(test_app(HttpState::new(ports))).await;

        let body = subscription_body(user_id);
        let header = sign(SECRET, "1614556800", body.as_bytes());
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/webhooks/payments")
                .insert_header((SIGNATURE_HEADER, header))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn unknown_event_types_are_rejected_after_verification() {
        let app = actix_test::init_service(test_app(HttpState::new(fixture_ports()))).await;
        let body = serde_json::json!({
            "type": "customer.vanished",
            "data": { "userId": uuid::Uuid::new_v4() },
        })
        .to_string();
        let header = sign(SECRET, "1614556800", body.as_bytes());
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/webhooks/payments")
                .insert_header((SIGNATURE_HEADER, header))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
