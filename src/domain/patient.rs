//! Patient data model, including the per-patient access secret.
//!
//! Patients are provisioned by an external administrative process. The one
//! security-sensitive field is the access secret: the second factor a doctor
//! must present before any medical record for the patient is released.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors returned by the patient identifier constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientValidationError {
    /// The human-facing patient id was missing or blank once trimmed.
    EmptyPublicId,
}

impl fmt::Display for PatientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPublicId => write!(f, "patient id must not be empty"),
        }
    }
}

impl std::error::Error for PatientValidationError {}

/// Human-facing patient identifier, distinct from the internal row UUID.
///
/// ## Invariants
/// - Unique in the record store; this is the lookup key doctors use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct PatientPublicId(String);

impl PatientPublicId {
    /// Validate and construct a [`PatientPublicId`], trimming whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PatientValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PatientValidationError::EmptyPublicId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PatientPublicId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PatientPublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<PatientPublicId> for String {
    fn from(value: PatientPublicId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PatientPublicId {
    type Error = PatientValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored access secret gating per-patient record retrieval.
///
/// The stored value is compared against the caller-supplied password as-is;
/// the comparison goes through SHA-256 digests of both sides so it does not
/// short-circuit on the first differing byte.
#[derive(Clone, PartialEq, Eq)]
pub struct PatientAccessSecret(Zeroizing<String>);

impl PatientAccessSecret {
    /// Wrap the stored secret value.
    pub fn new(stored: impl Into<String>) -> Self {
        Self(Zeroizing::new(stored.into()))
    }

    /// Check a caller-supplied access password against the stored value.
    pub fn matches(&self, supplied: &str) -> bool {
        let stored = Sha256::digest(self.0.as_bytes());
        let candidate = Sha256::digest(supplied.as_bytes());
        stored == candidate
    }
}

impl fmt::Debug for PatientAccessSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PatientAccessSecret(..)")
    }
}

/// Patient as stored in the record store.
///
/// The access secret is never serialised; handlers can return the entity
/// directly without leaking the second factor.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    #[serde(rename = "patientId")]
    pub public_id: PatientPublicId,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub blood_group: Option<String>,
    pub contact_phone: Option<String>,
    pub emergency_contact: Option<String>,
    #[serde(skip)]
    pub access_secret: PatientAccessSecret,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn public_id_rejects_blank_input(#[case] raw: &str) {
        let err = PatientPublicId::new(raw).expect_err("blank ids must fail");
        assert_eq!(err, PatientValidationError::EmptyPublicId);
    }

    #[rstest]
    fn public_id_trims_surrounding_whitespace() {
        let id = PatientPublicId::new(" PAT-001 ").expect("valid patient id");
        assert_eq!(id.as_ref(), "PAT-001");
    }

    #[rstest]
    #[case("s3cret", "s3cret", true)]
    #[case("s3cret", "S3CRET", false)]
    #[case("s3cret", "", false)]
    #[case("", "", true)]
    fn access_secret_matches_exact_stored_value(
        #[case] stored: &str,
        #[case] supplied: &str,
        #[case] expected: bool,
    ) {
        let secret = PatientAccessSecret::new(stored);
        assert_eq!(secret.matches(supplied), expected);
    }

    #[rstest]
    fn access_secret_debug_does_not_print_the_value() {
        let secret = PatientAccessSecret::new("s3cret");
        assert_eq!(format!("{secret:?}"), "PatientAccessSecret(..)");
    }
}
