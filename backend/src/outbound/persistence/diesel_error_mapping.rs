//! Diesel and pool failures mapped onto port errors.

use tracing::debug;

use crate::domain::ports::{IdentityError, StoreError};
use crate::domain::records::UnknownVariant;

use super::pool::PoolError;

/// Map pool errors into store errors.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Unconfigured => {
            StoreError::configuration("privileged database URL is not configured")
        }
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::connection(message)
        }
    }
}

/// Map Diesel errors into store errors.
///
/// Closed connections are connection failures; everything else the driver
/// reports is a query failure.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> StoreError {
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
        DieselError::NotFound => StoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => StoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            StoreError::query("referenced record does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreError::query("record already exists")
        }
        _ => StoreError::query("database error"),
    }
}

/// Map an unrecognised stored label into a decode error.
pub(crate) fn map_unknown_variant(error: UnknownVariant) -> StoreError {
    StoreError::decode(error.to_string())
}

/// Re-express a store error for the user directory port.
pub(crate) fn store_to_identity_error(error: StoreError) -> IdentityError {
    match error {
        StoreError::Configuration { message } | StoreError::Connection { message } => {
            IdentityError::connection(message)
        }
        StoreError::Rejected { message } => IdentityError::rejected(message),
        StoreError::Query { message } | StoreError::Decode { message } => {
            IdentityError::decode(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unconfigured_pool_is_a_configuration_error() {
        assert!(matches!(
            map_pool_error(PoolError::Unconfigured),
            StoreError::Configuration { .. }
        ));
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"))]
    #[case(PoolError::build("bad url"))]
    fn pool_failures_are_connection_errors(#[case] error: PoolError) {
        assert!(matches!(map_pool_error(error), StoreError::Connection { .. }));
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map_diesel_error(diesel::result::Error::NotFound),
            StoreError::query("record not found")
        );
    }

    #[rstest]
    fn directory_sees_store_outages_as_connection_failures() {
        assert_eq!(
            store_to_identity_error(StoreError::configuration("missing url")),
            IdentityError::connection("missing url")
        );
        assert_eq!(
            store_to_identity_error(StoreError::decode("bad role")),
            IdentityError::decode("bad role")
        );
    }
}
