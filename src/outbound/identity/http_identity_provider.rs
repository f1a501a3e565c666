//! Reqwest-backed identity-provider adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into port types. The provider
//! speaks a GoTrue-style API: password grant on `/token`, subject lookup on
//! `/user`, invalidation on `/logout`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;
use serde_json::json;

use super::dto::{SessionUserDto, SignInResponseDto};
use crate::domain::ports::{IdentityError, IdentityProvider, IdentitySession};
use crate::domain::{AccessToken, DoctorId};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
const API_KEY_HEADER: &str = "apikey";

/// Connection settings for the hosted identity provider.
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    /// Base URL of the auth API, e.g. `https://project.example.co/auth/v1`.
    pub base_url: Url,
    /// Project API key sent with every request.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl IdentityProviderConfig {
    /// Settings with the default request timeout.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

/// Identity-provider adapter performing HTTPS requests against one endpoint.
pub struct HttpIdentityProvider {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpIdentityProvider {
    /// Build an adapter using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: IdentityProviderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityError> {
        self.base_url
            .join(path)
            .map_err(|error| IdentityError::transport(format!("invalid endpoint path: {error}")))
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityError {
    if error.is_timeout() {
        IdentityError::transport("identity provider request timed out")
    } else {
        IdentityError::transport(error.to_string())
    }
}

/// Statuses the provider uses to refuse a credential or token.
fn is_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::UNPROCESSABLE_ENTITY
    )
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, IdentityError> {
        let mut endpoint = self.endpoint("token")?;
        endpoint.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .client
            .post(endpoint)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if is_rejection(status) {
            return Err(IdentityError::Rejected);
        }
        if !status.is_success() {
            return Err(IdentityError::transport(format!(
                "unexpected status {status} from token endpoint"
            )));
        }

        let decoded: SignInResponseDto = response.json().await.map_err(map_transport_error)?;
        let token = AccessToken::new(decoded.access_token)
            .ok_or_else(|| IdentityError::transport("provider returned an empty access token"))?;
        Ok(IdentitySession {
            token,
            subject: DoctorId::from_uuid(decoded.user.id),
        })
    }

    async fn session_subject(
        &self,
        token: &AccessToken,
    ) -> Result<Option<DoctorId>, IdentityError> {
        let response = self
            .client
            .get(self.endpoint("user")?)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if is_rejection(status) || status == StatusCode::NOT_FOUND {
            // Expired or revoked token: no active session, not an error.
            return Ok(None);
        }
        if !status.is_success() {
            return Err(IdentityError::transport(format!(
                "unexpected status {status} from user endpoint"
            )));
        }

        let decoded: SessionUserDto = response.json().await.map_err(map_transport_error)?;
        Ok(Some(DoctorId::from_uuid(decoded.id)))
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityError> {
        let response = self
            .client
            .post(self.endpoint("logout")?)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(IdentityError::transport(format!(
            "unexpected status {status} from logout endpoint"
        )))
    }
}

#[cfg(test)]
mod tests {
    //! Status-mapping coverage; transport is exercised in integration
    //! environments with a live provider.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, true)]
    #[case(StatusCode::UNAUTHORIZED, true)]
    #[case(StatusCode::FORBIDDEN, true)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, true)]
    #[case(StatusCode::OK, false)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case(StatusCode::BAD_GATEWAY, false)]
    fn rejection_statuses_are_credential_failures(
        #[case] status: StatusCode,
        #[case] expected: bool,
    ) {
        assert_eq!(is_rejection(status), expected);
    }

    #[rstest]
    fn endpoints_join_against_the_base_url() {
        let config = IdentityProviderConfig::new(
            Url::parse("https://project.example.co/auth/v1/").expect("valid base"),
            "anon-key",
        );
        let provider = HttpIdentityProvider::new(config).expect("client builds");
        let endpoint = provider.endpoint("token").expect("valid endpoint");
        assert_eq!(endpoint.as_str(), "https://project.example.co/auth/v1/token");
    }
}
