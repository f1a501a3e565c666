//! Port abstraction for doctor persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::doctor::{Doctor, DoctorId, NmrId};

use super::RecordStoreError;

/// Driven port over the `doctors` collection.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Fetch a doctor by NMR id, restricted to verified accounts.
    ///
    /// Unverified doctors are filtered out here, before any credential
    /// check, so their absence is indistinguishable from an unknown id.
    async fn find_verified_by_nmr_id(
        &self,
        nmr_id: &NmrId,
    ) -> Result<Option<Doctor>, RecordStoreError>;

    /// Fetch a doctor by internal id.
    async fn find_by_id(&self, id: &DoctorId) -> Result<Option<Doctor>, RecordStoreError>;

    /// Record a successful login time.
    ///
    /// Informational only; last writer wins and callers treat failures as
    /// best-effort.
    async fn record_login(
        &self,
        id: &DoctorId,
        at: DateTime<Utc>,
    ) -> Result<(), RecordStoreError>;
}
