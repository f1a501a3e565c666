//! Translation from Diesel and pool failures to the record-store port error.

use crate::domain::ports::RecordStoreError;

use super::pool::PoolError;

/// Map a pool checkout failure to the port's connection error.
pub(super) fn map_pool_error(error: PoolError) -> RecordStoreError {
    RecordStoreError::connection(error.to_string())
}

/// Map a Diesel query failure to the port's query error.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> RecordStoreError {
    RecordStoreError::query(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(mapped, RecordStoreError::Connection { .. }));
        assert!(mapped.to_string().contains("timed out"));
    }

    #[test]
    fn diesel_errors_become_query_errors() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, RecordStoreError::Query { .. }));
    }
}
