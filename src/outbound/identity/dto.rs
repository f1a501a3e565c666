//! Wire types for the hosted identity provider's JSON API.

use serde::Deserialize;
use uuid::Uuid;

/// Subject block embedded in token and user responses.
#[derive(Debug, Deserialize)]
pub(super) struct SessionUserDto {
    pub id: Uuid,
}

/// Successful password-grant response.
#[derive(Debug, Deserialize)]
pub(super) struct SignInResponseDto {
    pub access_token: String,
    pub user: SessionUserDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_response_decodes_the_fields_we_use() {
        let body = r#"{
            "access_token": "opaque",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "aud": "authenticated" }
        }"#;
        let decoded: SignInResponseDto = serde_json::from_str(body).expect("valid payload");
        assert_eq!(decoded.access_token, "opaque");
        assert_eq!(
            decoded.user.id.to_string(),
            "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = r#"{ "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "email": "x@y.z" }"#;
        let decoded: SessionUserDto = serde_json::from_str(body).expect("valid payload");
        assert_eq!(
            decoded.id.to_string(),
            "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
    }
}
