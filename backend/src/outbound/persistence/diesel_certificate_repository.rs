//! PostgreSQL-backed `CertificateRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CertificateRepository, CertificateRepositoryError};
use crate::domain::{Certificate, CertificateNumber, UserId};

use super::error_mapping::{self, is_unique_violation};
use super::models::{CertificateRow, NewCertificateRow};
use super::pool::{DbPool, PoolError};
use super::schema::certificates;

/// Diesel-backed implementation of the `CertificateRepository` port.
#[derive(Clone)]
pub struct DieselCertificateRepository {
    pool: DbPool,
}

impl DieselCertificateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CertificateRepositoryError {
    error_mapping::map_pool_error(error, CertificateRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CertificateRepositoryError {
    error_mapping::map_diesel_error(
        error,
        CertificateRepositoryError::query,
        CertificateRepositoryError::connection,
    )
}

fn row_to_certificate(row: CertificateRow) -> Result<Certificate, CertificateRepositoryError> {
    let certificate_number = CertificateNumber::parse(row.certificate_number)
        .map_err(|err| CertificateRepositoryError::query(format!("stored number invalid: {err}")))?;

    Ok(Certificate {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        course_id: row.course_id,
        exam_attempt_id: row.exam_attempt_id,
        certificate_number,
        issued_at: row.issued_at,
    })
}

#[async_trait]
impl CertificateRepository for DieselCertificateRepository {
    async fn find_for_user_course(
        &self,
        user_id: UserId,
        course_id: uuid::Uuid,
    ) -> Result<Option<Certificate>, CertificateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CertificateRow> = certificates::table
            .filter(certificates::user_id.eq(user_id.as_uuid()))
            .filter(certificates::course_id.eq(course_id))
            .select(CertificateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_certificate).transpose()
    }

    async fn find_by_number(
        &self,
        number: &CertificateNumber,
    ) -> Result<Option<Certificate>, CertificateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CertificateRow> = certificates::table
            .filter(certificates::certificate_number.eq(number.as_ref()))
            .select(CertificateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_certificate).transpose()
    }

    async fn insert(&self, certificate: &Certificate) -> Result<(), CertificateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCertificateRow {
            id: certificate.id,
            user_id: *certificate.user_id.as_uuid(),
            course_id: certificate.course_id,
            exam_attempt_id: certificate.exam_attempt_id,
            certificate_number: certificate.certificate_number.as_ref(),
            issued_at: certificate.issued_at,
        };

        diesel::insert_into(certificates::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    CertificateRepositoryError::AlreadyIssued
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Certificate>, CertificateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CertificateRow> = certificates::table
            .filter(certificates::user_id.eq(user_id.as_uuid()))
            .order(certificates::issued_at.desc())
            .select(CertificateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_certificate).collect()
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<u64, CertificateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = certificates::table
            .filter(certificates::user_id.eq(user_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }
}
