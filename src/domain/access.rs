//! The record-access workflow: the two-factor authorization core.
//!
//! Every patient-record read is gated behind two independent checks:
//! account-level authentication (NMR id + password against the identity
//! provider) and a per-patient re-authentication (the patient access
//! password) combined with an active-assignment membership check. The
//! service holds no state of its own; each operation is one sequential
//! chain of port calls with no retries.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::auth::{AccessToken, LoginCredentials};
use super::doctor::{Doctor, DoctorId};
use super::error::Error;
use super::medical_record::MedicalRecord;
use super::patient::{Patient, PatientPublicId};
use super::ports::{
    AssignmentRepository, DoctorRepository, IdentityError, IdentityProvider, IdentitySession,
    MedicalRecordRepository, PatientRepository, RecordStoreError,
};

/// Successful login result: the doctor row plus the provider session.
#[derive(Debug, Clone)]
pub struct AuthenticatedDoctor {
    pub doctor: Doctor,
    pub session: IdentitySession,
}

/// Successful record access: the patient plus the ordered history.
#[derive(Debug, Clone)]
pub struct PatientHistory {
    pub patient: Patient,
    pub records: Vec<MedicalRecord>,
}

fn map_store_error(error: RecordStoreError) -> Error {
    Error::store_error(error.to_string())
}

/// Orchestrates doctor login, session restoration, and the two-step
/// patient-record access check.
///
/// All collaborators are injected, so tests substitute deterministic
/// doubles and no global client state exists anywhere in the crate.
#[derive(Clone)]
pub struct RecordAccessService {
    doctors: Arc<dyn DoctorRepository>,
    patients: Arc<dyn PatientRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    records: Arc<dyn MedicalRecordRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl RecordAccessService {
    /// Build the workflow from its five ports.
    pub fn new(
        doctors: Arc<dyn DoctorRepository>,
        patients: Arc<dyn PatientRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        records: Arc<dyn MedicalRecordRepository>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            doctors,
            patients,
            assignments,
            records,
            identity,
        }
    }

    /// Account-level login.
    ///
    /// Sequential hard gates: verified-doctor lookup, then credential check
    /// with the identity provider. An unknown NMR id, an unverified account,
    /// and a wrong password all fail with the same `invalid_credentials`
    /// error so callers cannot tell which gate rejected them. The
    /// `last_login` write afterwards is best-effort and never fails the
    /// login.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedDoctor, Error> {
        let doctor = self
            .doctors
            .find_verified_by_nmr_id(credentials.nmr_id())
            .await
            .map_err(map_store_error)?
            .ok_or_else(Error::invalid_credentials)?;

        let session = self
            .identity
            .sign_in(&doctor.email, credentials.password())
            .await
            .map_err(|error| match error {
                IdentityError::Rejected => Error::invalid_credentials(),
                IdentityError::Transport { message } => Error::store_error(message),
            })?;

        let now = Utc::now();
        if let Err(error) = self.doctors.record_login(&doctor.id, now).await {
            // Informational timestamp only; the login already succeeded.
            warn!(doctor = %doctor.id, %error, "failed to record last login");
        }

        let doctor = Doctor {
            last_login: Some(now),
            ..doctor
        };
        Ok(AuthenticatedDoctor { doctor, session })
    }

    /// Restore the doctor behind an existing session token.
    ///
    /// `Ok(None)` covers both "no active session" and "session subject has
    /// no doctor row" (a session can outlive a revoked account); neither is
    /// an error, so app start stays quiet on silent expiry.
    pub async fn restore_session(&self, token: &AccessToken) -> Result<Option<Doctor>, Error> {
        let subject = self
            .identity
            .session_subject(token)
            .await
            .map_err(|error| Error::store_error(error.to_string()))?;

        let Some(subject) = subject else {
            return Ok(None);
        };

        self.doctors
            .find_by_id(&subject)
            .await
            .map_err(map_store_error)
    }

    /// Invalidate the session with the identity provider.
    ///
    /// Failure is reported, not swallowed; there is no other state to undo.
    pub async fn logout(&self, token: &AccessToken) -> Result<(), Error> {
        self.identity
            .sign_out(token)
            .await
            .map_err(|error| Error::logout_failed(error.to_string()))
    }

    /// The security-critical operation: release a patient's history only
    /// after the per-patient password gate and the active-assignment gate
    /// both pass, in that order.
    ///
    /// The password check runs first so an unassigned caller cannot use the
    /// assignment check to probe whether a patient id exists.
    pub async fn verify_and_fetch_records(
        &self,
        caller: &DoctorId,
        patient_id: &PatientPublicId,
        access_password: &str,
    ) -> Result<PatientHistory, Error> {
        let patient = self
            .patients
            .find_by_public_id(patient_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(Error::patient_not_found)?;

        if !patient.access_secret.matches(access_password) {
            return Err(Error::invalid_patient_password());
        }

        let assigned = self
            .assignments
            .has_active(caller, patient.id)
            .await
            .map_err(map_store_error)?;
        if !assigned {
            return Err(Error::not_assigned());
        }

        let records = self
            .records
            .history_for(patient.id)
            .await
            .map_err(map_store_error)?;

        Ok(PatientHistory { patient, records })
    }

    /// Dashboard listing: patients with an active assignment to the caller.
    pub async fn assigned_patients(&self, caller: &DoctorId) -> Result<Vec<Patient>, Error> {
        self.patients
            .list_assigned(caller)
            .await
            .map_err(map_store_error)
    }
}
