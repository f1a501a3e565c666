//! Shared error type for record-store repository ports.

/// Failures raised by record-store repository adapters.
///
/// The workflow maps every variant to the `store_error` domain code; the
/// split exists so adapters and logs can distinguish connectivity problems
/// from query execution problems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordStoreError {
    /// A store connection could not be established or checked out.
    #[error("record store connection failed: {message}")]
    Connection { message: String },

    /// A query or mutation failed during execution.
    #[error("record store query failed: {message}")]
    Query { message: String },
}

impl RecordStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
