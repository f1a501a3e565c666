//! Port abstraction for patient persistence.

use async_trait::async_trait;

use crate::domain::doctor::DoctorId;
use crate::domain::patient::{Patient, PatientPublicId};

use super::RecordStoreError;

/// Driven port over the `patients` collection.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Fetch a patient by the human-facing patient id.
    async fn find_by_public_id(
        &self,
        public_id: &PatientPublicId,
    ) -> Result<Option<Patient>, RecordStoreError>;

    /// List patients with an active assignment to the given doctor.
    async fn list_assigned(&self, doctor: &DoctorId) -> Result<Vec<Patient>, RecordStoreError>;
}
