//! OpenAPI documentation configuration.
//!
//! Generates the specification served by Swagger UI in debug builds. All
//! authenticated endpoints share the session cookie security scheme issued
//! by `POST /api/v1/auth/login`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Doctor, Error, ErrorCode, MedicalRecord, Patient};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::patients::{PatientHistoryResponse, RecordAccessRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "AyuSphere portal API",
        description = "Doctor authentication and two-factor patient record access."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::logout,
        crate::inbound::http::patients::list_assigned,
        crate::inbound::http::patients::access_records,
        crate::server::health::ready,
        crate::server::health::live,
    ),
    components(schemas(
        Doctor,
        Patient,
        MedicalRecord,
        Error,
        ErrorCode,
        LoginRequest,
        RecordAccessRequest,
        PatientHistoryResponse,
    )),
    tags(
        (name = "auth", description = "Doctor login and session lifecycle"),
        (name = "patients", description = "Assigned patients and record access"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
