//! Diesel-backed medical-record repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::MedicalRecord;
use crate::domain::ports::{MedicalRecordRepository, RecordStoreError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::MedicalRecordRow;
use super::pool::DbPool;
use super::schema::medical_records;

/// PostgreSQL adapter for the medical-record port.
pub struct DieselMedicalRecordRepository {
    pool: DbPool,
}

impl DieselMedicalRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MedicalRecordRepository for DieselMedicalRecordRepository {
    async fn history_for(&self, patient: Uuid) -> Result<Vec<MedicalRecord>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = medical_records::table
            .filter(medical_records::patient_id.eq(patient))
            .order(medical_records::visit_date.desc())
            .select(MedicalRecordRow::as_select())
            .load::<MedicalRecordRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(MedicalRecord::from).collect())
    }
}
