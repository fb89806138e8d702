//! Shared Diesel error mapping for repository adapters.

use tracing::debug;

use super::pool::PoolError;

/// Map a pool error into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Repositories with their own semantics for unique violations should match
/// on [`diesel::result::DatabaseErrorKind::UniqueViolation`] before calling
/// this helper.
pub(crate) fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Whether a Diesel error is a unique constraint violation.
pub(crate) fn is_unique_violation(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::CourseRepositoryError;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let mapped: CourseRepositoryError = map_pool_error(
            PoolError::checkout("timed out"),
            CourseRepositoryError::connection,
        );
        assert!(matches!(mapped, CourseRepositoryError::Connection { .. }));
        assert!(mapped.to_string().contains("timed out"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let mapped: CourseRepositoryError = map_diesel_error(
            diesel::result::Error::NotFound,
            CourseRepositoryError::query,
            CourseRepositoryError::connection,
        );
        assert!(matches!(mapped, CourseRepositoryError::Query { .. }));
        assert!(mapped.to_string().contains("record not found"));
    }

    #[rstest]
    fn plain_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&diesel::result::Error::NotFound));
    }
}
