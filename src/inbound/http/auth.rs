//! Authentication API handlers.
//!
//! ```text
//! POST /api/v1/auth/login   {"nmrId":"NMR-2041","password":"..."}
//! GET  /api/v1/auth/session
//! POST /api/v1/auth/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Doctor, Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::{ApiResult, HttpState};

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// The doctor's NMR registration id.
    pub nmr_id: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.nmr_id, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyNmrId => Error::invalid_request("NMR id must not be empty")
            .with_details(json!({ "field": "nmrId", "code": "empty_nmr_id" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate a doctor and establish a cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = Doctor,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Doctor>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let authenticated = state.access.login(&credentials).await?;
    session.persist_login(&authenticated.doctor.id, &authenticated.session.token)?;
    Ok(web::Json(authenticated.doctor))
}

/// Restore the doctor behind an existing session cookie.
///
/// Responds `204 No Content` when no usable session exists; silent expiry
/// is not an error condition on app start.
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Active session", body = Doctor),
        (status = 204, description = "No active session"),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession",
    security([])
)]
#[get("/auth/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(token) = session.access_token()? else {
        return Ok(HttpResponse::NoContent().finish());
    };
    match state.access.restore_session(&token).await? {
        Some(doctor) => Ok(HttpResponse::Ok().json(doctor)),
        None => {
            // The provider no longer recognises the token, or the doctor
            // row is gone; drop the stale cookie quietly.
            session.purge();
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

/// Invalidate the identity-provider session and purge the cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Session ended"),
        (status = 502, description = "Identity provider refused", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(token) = session.access_token()? {
        state.access.logout(&token).await?;
    }
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{
        InMemoryPorts, TEST_DOCTOR_PASSWORD, test_session_middleware,
    };

    fn test_app(
        ports: Arc<InMemoryPorts>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
                actix_web::dev::ServiceRequest,
                Config = (),
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
                InitError = (),
            >,
    > {
        let state = HttpState::new(ports.service());
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(current_session)
                    .service(logout),
            )
    }

    async fn do_login(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        nmr_id: &str,
        password: &str,
    ) -> actix_web::dev::ServiceResponse {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(&LoginRequest {
                nmr_id: nmr_id.into(),
                password: password.into(),
            })
            .to_request();
        actix_test::call_service(app, request).await
    }

    #[actix_web::test]
    async fn login_returns_the_doctor_and_sets_a_session_cookie() {
        let (ports, _) = InMemoryPorts::seeded();
        let app = actix_test::init_service(test_app(Arc::new(ports))).await;

        let response = do_login(&app, "NMR-2041", TEST_DOCTOR_PASSWORD).await;
        assert!(response.status().is_success());
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );

        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("doctor JSON");
        assert_eq!(
            value.get("fullName").and_then(Value::as_str),
            Some("Asha Rao")
        );
        assert!(value.get("full_name").is_none());
    }

    #[rstest]
    #[case("NMR-2041", "wrong-password")]
    #[case("NMR-9999", TEST_DOCTOR_PASSWORD)]
    #[actix_web::test]
    async fn login_rejections_are_uniform(#[case] nmr_id: &str, #[case] password: &str) {
        let (ports, _) = InMemoryPorts::seeded();
        let app = actix_test::init_service(test_app(Arc::new(ports))).await;

        let response = do_login(&app, nmr_id, password).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_credentials")
        );
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("invalid credentials")
        );
    }

    #[rstest]
    #[case("   ", "pw", "nmrId")]
    #[case("NMR-2041", "", "password")]
    #[actix_web::test]
    async fn login_validation_failures_are_bad_requests(
        #[case] nmr_id: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let (ports, _) = InMemoryPorts::seeded();
        let app = actix_test::init_service(test_app(Arc::new(ports))).await;

        let response = do_login(&app, nmr_id, password).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value
                .get("details")
                .and_then(|details| details.get("field"))
                .and_then(Value::as_str),
            Some(field)
        );
    }

    #[actix_web::test]
    async fn session_restore_round_trips_after_login() {
        let (ports, _) = InMemoryPorts::seeded();
        let app = actix_test::init_service(test_app(Arc::new(ports))).await;

        let login_res = do_login(&app, "NMR-2041", TEST_DOCTOR_PASSWORD).await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/auth/session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("nmrId").and_then(Value::as_str),
            Some("NMR-2041")
        );
    }

    #[actix_web::test]
    async fn session_restore_without_a_cookie_is_no_content() {
        let (ports, _) = InMemoryPorts::seeded();
        let app = actix_test::init_service(test_app(Arc::new(ports))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/auth/session")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn logout_invalidates_the_session() {
        let (ports, _) = InMemoryPorts::seeded();
        let app = actix_test::init_service(test_app(Arc::new(ports))).await;

        let login_res = do_login(&app, "NMR-2041", TEST_DOCTOR_PASSWORD).await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), actix_web::http::StatusCode::NO_CONTENT);

        // The provider dropped the token, so restoring with the old cookie
        // comes back empty.
        let restore_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/auth/session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(
            restore_res.status(),
            actix_web::http::StatusCode::NO_CONTENT
        );
    }
}
