//! Medical record data model.
//!
//! Records are written by external clinical processes and are read-only from
//! this service's perspective.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// One clinical visit entry belonging to exactly one patient.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub recorded_by_doctor_id: Uuid,
    pub visit_date: DateTime<Utc>,
    pub diagnosis: String,
    pub symptoms: Option<String>,
    pub treatment: Option<String>,
    pub medications: Option<String>,
    pub lab_results: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
