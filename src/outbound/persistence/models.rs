//! Row types mapping Diesel query results onto domain entities.
//!
//! Row-to-domain conversion is fallible: the store could in principle hold a
//! blank identifier, and the domain constructors reject that rather than let
//! an invalid value circulate. Such a row is reported as a query error.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::{Queryable, Selectable};
use uuid::Uuid;

use crate::domain::ports::RecordStoreError;
use crate::domain::{
    Doctor, DoctorId, MedicalRecord, NmrId, Patient, PatientAccessSecret, PatientPublicId,
};

use super::schema::{doctors, medical_records, patients};

fn invalid_row(table: &str, id: Uuid, error: impl std::fmt::Display) -> RecordStoreError {
    RecordStoreError::query(format!("invalid {table} row {id}: {error}"))
}

/// Doctor row as selected from the `doctors` table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct DoctorRow {
    pub id: Uuid,
    pub nmr_id: String,
    pub full_name: String,
    pub specialization: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl DoctorRow {
    pub(super) fn into_domain(self) -> Result<Doctor, RecordStoreError> {
        let nmr_id = NmrId::new(&self.nmr_id).map_err(|e| invalid_row("doctor", self.id, e))?;
        Ok(Doctor {
            id: DoctorId::from_uuid(self.id),
            nmr_id,
            full_name: self.full_name,
            specialization: self.specialization,
            email: self.email,
            phone: self.phone,
            is_verified: self.is_verified,
            created_at: self.created_at,
            last_login: self.last_login,
        })
    }
}

/// Patient row as selected from the `patients` table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct PatientRow {
    pub id: Uuid,
    pub patient_id: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub blood_group: Option<String>,
    pub contact_phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub access_password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatientRow {
    pub(super) fn into_domain(self) -> Result<Patient, RecordStoreError> {
        let public_id =
            PatientPublicId::new(&self.patient_id).map_err(|e| invalid_row("patient", self.id, e))?;
        Ok(Patient {
            id: self.id,
            public_id,
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            blood_group: self.blood_group,
            contact_phone: self.contact_phone,
            emergency_contact: self.emergency_contact,
            access_secret: PatientAccessSecret::new(self.access_password_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Medical record row as selected from the `medical_records` table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = medical_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct MedicalRecordRow {
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

impl From<MedicalRecordRow> for MedicalRecord {
    fn from(row: MedicalRecordRow) -> Self {
        Self {
            id: row.id,
            patient_id: row.patient_id,
            recorded_by_doctor_id: row.recorded_by_doctor_id,
            visit_date: row.visit_date,
            diagnosis: row.diagnosis,
            symptoms: row.symptoms,
            treatment: row.treatment,
            medications: row.medications,
            lab_results: row.lab_results,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor_row() -> DoctorRow {
        DoctorRow {
            id: Uuid::new_v4(),
            nmr_id: "NMR-2041".into(),
            full_name: "Dr. Asha Rao".into(),
            specialization: "Cardiology".into(),
            email: "asha.rao@example.org".into(),
            phone: None,
            is_verified: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn doctor_row_converts_to_domain_entity() {
        let row = doctor_row();
        let id = row.id;
        let doctor = row.into_domain().expect("valid row");
        assert_eq!(doctor.id, DoctorId::from_uuid(id));
        assert_eq!(doctor.nmr_id.as_ref(), "NMR-2041");
    }

    #[test]
    fn doctor_row_with_blank_nmr_id_is_a_query_error() {
        let mut row = doctor_row();
        row.nmr_id = "  ".into();
        let err = row.into_domain().expect_err("blank nmr id must fail");
        assert!(matches!(err, RecordStoreError::Query { .. }));
    }

    #[test]
    fn patient_row_wraps_the_stored_secret() {
        let row = PatientRow {
            id: Uuid::new_v4(),
            patient_id: "PAT-001".into(),
            full_name: "Ravi Kumar".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1984, 6, 1).expect("valid date"),
            blood_group: Some("O+".into()),
            contact_phone: None,
            emergency_contact: None,
            access_password_hash: "stored-secret".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let patient = row.into_domain().expect("valid row");
        assert_eq!(patient.public_id.as_ref(), "PAT-001");
        assert!(patient.access_secret.matches("stored-secret"));
    }
}
