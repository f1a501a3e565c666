//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting a login, reading the doctor id
//! and identity token back, and purging everything on logout.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccessToken, DoctorId, Error, ErrorCode};

pub(crate) const DOCTOR_ID_KEY: &str = "doctor_id";
pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";

fn session_failure(action: &str, error: impl std::fmt::Display) -> Error {
    Error::store_error(format!("failed to {action} session: {error}"))
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated doctor's id and identity token.
    pub fn persist_login(&self, doctor: &DoctorId, token: &AccessToken) -> Result<(), Error> {
        self.0
            .insert(DOCTOR_ID_KEY, doctor.to_string())
            .map_err(|error| session_failure("persist", error))?;
        self.0
            .insert(ACCESS_TOKEN_KEY, token.as_str())
            .map_err(|error| session_failure("persist", error))
    }

    /// Fetch the current doctor id from the session, if present.
    pub fn doctor_id(&self) -> Result<Option<DoctorId>, Error> {
        let raw = self
            .0
            .get::<String>(DOCTOR_ID_KEY)
            .map_err(|error| session_failure("read", error))?;
        match raw {
            Some(raw) => match DoctorId::new(&raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid doctor id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Fetch the identity-provider token from the session, if present.
    pub fn access_token(&self) -> Result<Option<AccessToken>, Error> {
        let raw = self
            .0
            .get::<String>(ACCESS_TOKEN_KEY)
            .map_err(|error| session_failure("read", error))?;
        Ok(raw.and_then(AccessToken::new))
    }

    /// Require an authenticated doctor id or return `401 Unauthorized`.
    pub fn require_doctor(&self) -> Result<DoctorId, Error> {
        self.doctor_id()?
            .ok_or_else(|| Error::new(ErrorCode::InvalidCredentials, "login required"))
    }

    /// Drop every session entry, ending the cookie session.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
