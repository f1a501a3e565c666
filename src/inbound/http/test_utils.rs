//! Shared helpers for HTTP handler tests.
//!
//! Builds the cookie-session middleware with a throwaway key and an
//! in-memory implementation of every workflow port, so handler tests can
//! exercise the full login → access flow without PostgreSQL or a hosted
//! identity provider.

use std::collections::HashMap;
use std::sync::Mutex;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    AssignmentRepository, DoctorRepository, IdentityError, IdentityProvider, IdentitySession,
    MedicalRecordRepository, PatientRepository, RecordStoreError,
};
use crate::domain::{
    AccessToken, Doctor, DoctorId, MedicalRecord, NmrId, Patient, PatientAccessSecret,
    PatientPublicId, RecordAccessService,
};

/// Session middleware with a generated key and insecure cookies for tests.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build()
}

pub(crate) const TEST_DOCTOR_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
pub(crate) const TEST_DOCTOR_PASSWORD: &str = "correct-password";
pub(crate) const TEST_PATIENT_SECRET: &str = "patient-secret";

pub(crate) fn test_doctor() -> Doctor {
    Doctor {
        id: DoctorId::new(TEST_DOCTOR_ID).expect("fixture doctor id"),
        nmr_id: NmrId::new("NMR-2041").expect("fixture NMR id"),
        full_name: "Asha Rao".into(),
        specialization: "Cardiology".into(),
        email: "asha.rao@example.org".into(),
        phone: None,
        is_verified: true,
        created_at: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
        last_login: None,
    }
}

pub(crate) fn test_patient(public_id: &str) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        public_id: PatientPublicId::new(public_id).expect("fixture patient id"),
        full_name: "Ravi Kumar".into(),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(1981, 6, 2).expect("fixture date"),
        blood_group: Some("O+".into()),
        contact_phone: None,
        emergency_contact: None,
        access_secret: PatientAccessSecret::new(TEST_PATIENT_SECRET),
        created_at: Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
    }
}

pub(crate) fn test_record(patient: Uuid, visit_date: DateTime<Utc>) -> MedicalRecord {
    MedicalRecord {
        id: Uuid::new_v4(),
        patient_id: patient,
        recorded_by_doctor_id: Uuid::parse_str(TEST_DOCTOR_ID).expect("fixture doctor uuid"),
        visit_date,
        diagnosis: "Hypertension".into(),
        symptoms: Some("headache".into()),
        treatment: None,
        medications: None,
        lab_results: None,
        notes: None,
        created_at: visit_date,
    }
}

/// In-memory stand-in for the record store and identity provider.
#[derive(Default)]
pub(crate) struct InMemoryPorts {
    pub doctors: Vec<Doctor>,
    /// Password the identity provider accepts for each email.
    pub passwords: HashMap<String, String>,
    pub patients: Vec<Patient>,
    /// (doctor, patient) pairs with an **active** assignment.
    pub assignments: Vec<(DoctorId, Uuid)>,
    pub records: Vec<MedicalRecord>,
    sessions: Mutex<HashMap<String, DoctorId>>,
}

impl InMemoryPorts {
    /// A world with one verified doctor assigned to one patient with records.
    pub(crate) fn seeded() -> (Self, Patient) {
        let doctor = test_doctor();
        let patient = test_patient("PAT-001");
        let records = vec![
            test_record(
                patient.id,
                Utc.with_ymd_and_hms(2025, 3, 2, 10, 0, 0).unwrap(),
            ),
            test_record(
                patient.id,
                Utc.with_ymd_and_hms(2024, 11, 20, 9, 0, 0).unwrap(),
            ),
        ];
        let ports = Self {
            passwords: HashMap::from([(
                doctor.email.clone(),
                TEST_DOCTOR_PASSWORD.to_owned(),
            )]),
            assignments: vec![(doctor.id, patient.id)],
            doctors: vec![doctor],
            patients: vec![patient.clone()],
            records,
            sessions: Mutex::new(HashMap::new()),
        };
        (ports, patient)
    }

    pub(crate) fn service(self: &std::sync::Arc<Self>) -> RecordAccessService {
        RecordAccessService::new(
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        )
    }
}

#[async_trait]
impl DoctorRepository for InMemoryPorts {
    async fn find_verified_by_nmr_id(
        &self,
        nmr_id: &NmrId,
    ) -> Result<Option<Doctor>, RecordStoreError> {
        Ok(self
            .doctors
            .iter()
            .find(|doctor| doctor.nmr_id == *nmr_id && doctor.is_verified)
            .cloned())
    }

    async fn find_by_id(&self, id: &DoctorId) -> Result<Option<Doctor>, RecordStoreError> {
        Ok(self.doctors.iter().find(|doctor| doctor.id == *id).cloned())
    }

    async fn record_login(
        &self,
        _id: &DoctorId,
        _at: DateTime<Utc>,
    ) -> Result<(), RecordStoreError> {
        Ok(())
    }
}

#[async_trait]
impl PatientRepository for InMemoryPorts {
    async fn find_by_public_id(
        &self,
        public_id: &PatientPublicId,
    ) -> Result<Option<Patient>, RecordStoreError> {
        Ok(self
            .patients
            .iter()
            .find(|patient| patient.public_id == *public_id)
            .cloned())
    }

    async fn list_assigned(&self, doctor: &DoctorId) -> Result<Vec<Patient>, RecordStoreError> {
        let assigned: Vec<Uuid> = self
            .assignments
            .iter()
            .filter(|(assigned_doctor, _)| assigned_doctor == doctor)
            .map(|(_, patient)| *patient)
            .collect();
        Ok(self
            .patients
            .iter()
            .filter(|patient| assigned.contains(&patient.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryPorts {
    async fn has_active(
        &self,
        doctor: &DoctorId,
        patient: Uuid,
    ) -> Result<bool, RecordStoreError> {
        Ok(self.assignments.contains(&(*doctor, patient)))
    }
}

#[async_trait]
impl MedicalRecordRepository for InMemoryPorts {
    async fn history_for(&self, patient: Uuid) -> Result<Vec<MedicalRecord>, RecordStoreError> {
        let mut history: Vec<MedicalRecord> = self
            .records
            .iter()
            .filter(|record| record.patient_id == patient)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.visit_date.cmp(&a.visit_date));
        Ok(history)
    }
}

#[async_trait]
impl IdentityProvider for InMemoryPorts {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, IdentityError> {
        let accepted = self
            .passwords
            .get(email)
            .is_some_and(|expected| expected == password);
        if !accepted {
            return Err(IdentityError::Rejected);
        }
        let doctor = self
            .doctors
            .iter()
            .find(|doctor| doctor.email == email)
            .ok_or(IdentityError::Rejected)?;
        let raw = format!("token-{}", Uuid::new_v4());
        self.sessions
            .lock()
            .expect("sessions lock")
            .insert(raw.clone(), doctor.id);
        let token = AccessToken::new(raw).ok_or(IdentityError::Rejected)?;
        Ok(IdentitySession {
            token,
            subject: doctor.id,
        })
    }

    async fn session_subject(
        &self,
        token: &AccessToken,
    ) -> Result<Option<DoctorId>, IdentityError> {
        Ok(self
            .sessions
            .lock()
            .expect("sessions lock")
            .get(token.as_str())
            .copied())
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityError> {
        self.sessions
            .lock()
            .expect("sessions lock")
            .remove(token.as_str());
        Ok(())
    }
}
