//! Port abstraction for medical-record reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::medical_record::MedicalRecord;

use super::RecordStoreError;

/// Driven port over the `medical_records` collection (read-only).
#[async_trait]
pub trait MedicalRecordRepository: Send + Sync {
    /// Full history for a patient, ordered by `visit_date` descending.
    ///
    /// No pagination: the complete sequence is returned in one call.
    async fn history_for(&self, patient: Uuid) -> Result<Vec<MedicalRecord>, RecordStoreError>;
}
