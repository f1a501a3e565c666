//! Port abstraction for the hosted identity provider.
//!
//! The provider owns credential verification and session lifecycle; this
//! service never sees a password hash for doctor accounts and never designs
//! a token format of its own.

use async_trait::async_trait;

use crate::domain::auth::AccessToken;
use crate::domain::doctor::DoctorId;

/// Failures raised by identity-provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The provider rejected the supplied credentials.
    #[error("identity provider rejected the credentials")]
    Rejected,

    /// The provider could not be reached or answered unexpectedly.
    #[error("identity provider transport failed: {message}")]
    Transport { message: String },
}

impl IdentityError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// An authenticated session issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySession {
    /// Opaque token handed back for restoration and invalidation.
    pub token: AccessToken,
    /// Session subject; equals the doctor's internal id.
    pub subject: DoctorId,
}

/// Driven port over the hosted identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate an email/password pair and open a session.
    async fn sign_in(&self, email: &str, password: &str)
    -> Result<IdentitySession, IdentityError>;

    /// Resolve the subject of an existing session token.
    ///
    /// Returns `None` when the token no longer names an active session;
    /// silent expiry is not an error.
    async fn session_subject(&self, token: &AccessToken)
    -> Result<Option<DoctorId>, IdentityError>;

    /// Invalidate the session behind the token.
    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityError>;
}
