//! Certificate API handlers.
//!
//! ```text
//! POST /api/v1/courses/{courseId}/certificate
//! GET  /api/v1/certificates
//! GET  /api/v1/certificates/verify/{certificateNumber}
//! ```
//!
//! Verification is public so third parties can check a certificate number
//! without an account.

use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Certificate, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

const COURSE_ID_FIELD: FieldName = FieldName::new("courseId");

/// Serializable certificate projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePayload {
    pub id: uuid::Uuid,
    pub course_id: uuid::Uuid,
    pub certificate_number: String,
    pub issued_at: DateTime<Utc>,
}

impl From<Certificate> for CertificatePayload {
    fn from(certificate: Certificate) -> Self {
        Self {
            id: certificate.id,
            course_id: certificate.course_id,
            certificate_number: certificate.certificate_number.to_string(),
            issued_at: certificate.issued_at,
        }
    }
}

/// Issue (or re-fetch) the caller's certificate for a completed course.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{courseId}/certificate",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    responses(
        (status = 201, description = "Certificate issued", body = CertificatePayload),
        (status = 400, description = "Course not completed or exam not passed", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not enrolled", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["certificates"],
    operation_id = "issueCertificate"
)]
#[post("/courses/{course_id}/certificate")]
pub async fn issue_certificate(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let certificate = state.certification.issue(user_id, course_id).await?;
    Ok(HttpResponse::Created().json(CertificatePayload::from(certificate)))
}

/// List the caller's certificates.
#[utoipa::path(
    get,
    path = "/api/v1/certificates",
    responses(
        (status = 200, description = "Certificates", body = [CertificatePayload]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["certificates"],
    operation_id = "listCertificates"
)]
#[get("/certificates")]
pub async fn list_certificates(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CertificatePayload>>> {
    let user_id = session.require_user_id()?;
    let certificates = state.certification.list_for_user(user_id).await?;
    Ok(web::Json(
        certificates.into_iter().map(CertificatePayload::from).collect(),
    ))
}

/// Verify a certificate by its public number.
#[utoipa::path(
    get,
    path = "/api/v1/certificates/verify/{certificateNumber}",
    params(("certificateNumber" = String, Path, description = "Public certificate number")),
    responses(
        (status = 200, description = "Certificate is genuine", body = CertificatePayload),
        (status = 400, description = "Malformed certificate number", body = Error),
        (status = 404, description = "Unknown certificate number", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["certificates"],
    operation_id = "verifyCertificate",
    security([])
)]
#[get("/certificates/verify/{certificate_number}")]
pub async fn verify_certificate(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CertificatePayload>> {
    let certificate = state.certification.verify(&path.into_inner()).await?;
    Ok(web::Json(CertificatePayload::from(certificate)))
}
