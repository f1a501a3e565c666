//! Doctor data model.
//!
//! Doctors are provisioned by an external administrative process; this
//! service only reads doctor rows and records the last successful login.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the doctor identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorValidationError {
    /// The internal identifier was not a valid UUID.
    InvalidId,
    /// The NMR id was missing or blank once trimmed.
    EmptyNmrId,
}

impl fmt::Display for DoctorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "doctor id must be a valid UUID"),
            Self::EmptyNmrId => write!(f, "NMR id must not be empty"),
        }
    }
}

impl std::error::Error for DoctorValidationError {}

/// Stable internal doctor identifier stored as a UUID.
///
/// This is also the subject the identity provider reports for an active
/// session, which is how `restore_session` ties a session back to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct DoctorId(Uuid);

impl DoctorId {
    /// Validate and construct a [`DoctorId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, DoctorValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| DoctorValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External medical-registration identifier used as the login identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct NmrId(String);

impl NmrId {
    /// Validate and construct an [`NmrId`], trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, DoctorValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DoctorValidationError::EmptyNmrId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for NmrId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NmrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<NmrId> for String {
    fn from(value: NmrId) -> Self {
        value.0
    }
}

impl TryFrom<String> for NmrId {
    type Error = DoctorValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Doctor account as stored in the record store.
///
/// ## Invariants
/// - A doctor may authenticate only while `is_verified` is true; the
///   verified gate is applied in the lookup, before any credential check.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: DoctorId,
    pub nmr_id: NmrId,
    pub full_name: String,
    pub specialization: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}
