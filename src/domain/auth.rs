//! Authentication primitives: login credentials and the opaque session token.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::doctor::NmrId;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// NMR id was missing or blank once trimmed.
    EmptyNmrId,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNmrId => write!(f, "NMR id must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials for the account-level gate.
///
/// ## Invariants
/// - `nmr_id` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    nmr_id: NmrId,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw NMR id / password inputs.
    pub fn try_from_parts(nmr_id: &str, password: &str) -> Result<Self, LoginValidationError> {
        let nmr_id = NmrId::new(nmr_id).map_err(|_| LoginValidationError::EmptyNmrId)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            nmr_id,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// NMR id used for the verified-doctor lookup.
    pub fn nmr_id(&self) -> &NmrId {
        &self.nmr_id
    }

    /// Password forwarded to the identity provider.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Opaque session handle issued by the identity provider.
///
/// The service never inspects the token contents; it only hands the token
/// back to the identity provider for session restoration and invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a provider-issued token. Empty tokens are treated as absent
    /// upstream, so this constructor accepts any non-empty string.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(token)))
    }

    /// Raw token string for transport back to the identity provider.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyNmrId)]
    #[case("   ", "pw", LoginValidationError::EmptyNmrId)]
    #[case("NMR-1", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] nmr_id: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(nmr_id, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  NMR-2041  ", "secret")]
    #[case("NMR-77", "correct horse battery staple")]
    fn valid_credentials_trim_nmr_id(#[case] nmr_id: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(nmr_id, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.nmr_id().as_ref(), nmr_id.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn access_token_rejects_empty_strings() {
        assert!(AccessToken::new("").is_none());
        let token = AccessToken::new("opaque-token").expect("non-empty token");
        assert_eq!(token.as_str(), "opaque-token");
    }
}
