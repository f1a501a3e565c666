//! Domain-level error taxonomy.
//!
//! Every failure the record-access workflow can produce is one of the closed
//! set of codes below, so callers branch on kind rather than message text.
//! These errors are transport agnostic; the HTTP adapter maps them to status
//! codes and JSON envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Account login failed. Deliberately covers both an unknown or
    /// unverified NMR id and a wrong password, so callers cannot probe
    /// which check rejected them.
    InvalidCredentials,
    /// The underlying record store failed; safe to retry.
    StoreError,
    /// No patient exists for the supplied public patient id.
    PatientNotFound,
    /// The patient access password did not match.
    InvalidPatientPassword,
    /// The caller has no active assignment to the patient.
    NotAssigned,
    /// The identity provider refused to invalidate the session.
    LogoutFailed,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_credentials")]
    code: ErrorCode,
    #[schema(example = "Invalid credentials")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error. Callers supply non-empty messages; blank ones
    /// are replaced with the code's debug rendering rather than panicking.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            format!("{code:?}")
        } else {
            message
        };
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    ///
    /// The message is fixed so unverified accounts, unknown NMR ids, and
    /// wrong passwords are indistinguishable to the caller.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "invalid credentials")
    }

    /// Convenience constructor for [`ErrorCode::StoreError`].
    pub fn store_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    /// Convenience constructor for [`ErrorCode::PatientNotFound`].
    pub fn patient_not_found() -> Self {
        Self::new(ErrorCode::PatientNotFound, "patient not found")
    }

    /// Convenience constructor for [`ErrorCode::InvalidPatientPassword`].
    pub fn invalid_patient_password() -> Self {
        Self::new(
            ErrorCode::InvalidPatientPassword,
            "invalid patient access password",
        )
    }

    /// Convenience constructor for [`ErrorCode::NotAssigned`].
    pub fn not_assigned() -> Self {
        Self::new(ErrorCode::NotAssigned, "you are not assigned to this patient")
    }

    /// Convenience constructor for [`ErrorCode::LogoutFailed`].
    pub fn logout_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::LogoutFailed, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
