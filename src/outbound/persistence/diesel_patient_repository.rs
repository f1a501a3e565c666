//! Diesel-backed patient repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PatientRepository, RecordStoreError};
use crate::domain::{DoctorId, Patient, PatientPublicId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::PatientRow;
use super::pool::DbPool;
use super::schema::{doctor_patient_assignments, patients};

/// PostgreSQL adapter for the patient port.
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn find_by_public_id(
        &self,
        public_id: &PatientPublicId,
    ) -> Result<Option<Patient>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = patients::table
            .filter(patients::patient_id.eq(public_id.as_ref()))
            .select(PatientRow::as_select())
            .first::<PatientRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(PatientRow::into_domain).transpose()
    }

    async fn list_assigned(&self, doctor: &DoctorId) -> Result<Vec<Patient>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = doctor_patient_assignments::table
            .inner_join(patients::table)
            .filter(doctor_patient_assignments::doctor_id.eq(doctor.as_uuid()))
            .filter(doctor_patient_assignments::is_active.eq(true))
            .order(patients::full_name.asc())
            .select(PatientRow::as_select())
            .load::<PatientRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(PatientRow::into_domain).collect()
    }
}
