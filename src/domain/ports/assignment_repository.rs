//! Port abstraction for doctor/patient assignment checks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::doctor::DoctorId;

use super::RecordStoreError;

/// Driven port over the `doctor_patient_assignments` collection.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Whether an **active** assignment links the doctor to the patient.
    ///
    /// Assignment existence alone grants nothing; rows with
    /// `is_active = false` must answer `false`.
    async fn has_active(
        &self,
        doctor: &DoctorId,
        patient: Uuid,
    ) -> Result<bool, RecordStoreError>;
}
