//! Patient API handlers.
//!
//! ```text
//! GET  /api/v1/patients
//! POST /api/v1/patients/records {"patientId":"PAT-001","accessPassword":"..."}
//! ```
//!
//! Record access goes over POST so the patient access password never lands
//! in a URL or server access log.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, MedicalRecord, Patient, PatientHistory, PatientPublicId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::{ApiResult, HttpState};

/// Record-access request body for `POST /api/v1/patients/records`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAccessRequest {
    /// The human-facing patient id, not the internal row id.
    pub patient_id: String,
    /// The patient's access password (second factor).
    pub access_password: String,
}

/// Successful record access: the patient plus the ordered history.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientHistoryResponse {
    pub patient: Patient,
    /// Ordered by visit date, most recent first.
    pub records: Vec<MedicalRecord>,
}

impl From<PatientHistory> for PatientHistoryResponse {
    fn from(value: PatientHistory) -> Self {
        Self {
            patient: value.patient,
            records: value.records,
        }
    }
}

/// List the caller's actively assigned patients.
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    responses(
        (status = 200, description = "Assigned patients", body = [Patient]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["patients"],
    operation_id = "listAssignedPatients"
)]
#[get("/patients")]
pub async fn list_assigned(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Patient>>> {
    let doctor = session.require_doctor()?;
    let patients = state.access.assigned_patients(&doctor).await?;
    Ok(web::Json(patients))
}

/// Verify patient access and return the medical history.
///
/// Both gates must pass: the patient access password and the caller's
/// active assignment to the patient.
#[utoipa::path(
    post,
    path = "/api/v1/patients/records",
    request_body = RecordAccessRequest,
    responses(
        (status = 200, description = "Access granted", body = PatientHistoryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Wrong access password or not assigned", body = Error),
        (status = 404, description = "Unknown patient id", body = Error),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["patients"],
    operation_id = "accessPatientRecords"
)]
#[post("/patients/records")]
pub async fn access_records(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecordAccessRequest>,
) -> ApiResult<web::Json<PatientHistoryResponse>> {
    let doctor = session.require_doctor()?;
    let request = payload.into_inner();
    let patient_id = PatientPublicId::new(&request.patient_id).map_err(|_| {
        Error::invalid_request("patient id must not be empty")
            .with_details(json!({ "field": "patientId", "code": "empty_patient_id" }))
    })?;

    let history = state
        .access
        .verify_and_fetch_records(&doctor, &patient_id, &request.access_password)
        .await?;
    Ok(web::Json(history.into()))
}
