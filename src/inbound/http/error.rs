//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn workflow failures into consistent JSON responses and
//! status codes. Store failures are redacted so internal detail never
//! reaches the end user; authorization failures carry only their fixed
//! messages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::InvalidPatientPassword | ErrorCode::NotAssigned => StatusCode::FORBIDDEN,
        ErrorCode::PatientNotFound => StatusCode::NOT_FOUND,
        ErrorCode::LogoutFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::StoreError => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn redact_if_store_error(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::StoreError) {
        Error::store_error("temporary data store problem, please try again")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::StoreError) {
            error!(message = %self.message(), "store error surfaced to a client");
        }
        HttpResponse::build(self.status_code()).json(redact_if_store_error(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::store_error("internal error")
    }
}
