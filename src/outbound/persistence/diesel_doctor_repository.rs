//! Diesel-backed doctor repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DoctorRepository, RecordStoreError};
use crate::domain::{Doctor, DoctorId, NmrId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::DoctorRow;
use super::pool::DbPool;
use super::schema::doctors;

/// PostgreSQL adapter for the doctor port.
pub struct DieselDoctorRepository {
    pool: DbPool,
}

impl DieselDoctorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorRepository for DieselDoctorRepository {
    async fn find_verified_by_nmr_id(
        &self,
        nmr_id: &NmrId,
    ) -> Result<Option<Doctor>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = doctors::table
            .filter(doctors::nmr_id.eq(nmr_id.as_ref()))
            .filter(doctors::is_verified.eq(true))
            .select(DoctorRow::as_select())
            .first::<DoctorRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(DoctorRow::into_domain).transpose()
    }

    async fn find_by_id(&self, id: &DoctorId) -> Result<Option<Doctor>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = doctors::table
            .find(id.as_uuid())
            .select(DoctorRow::as_select())
            .first::<DoctorRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(DoctorRow::into_domain).transpose()
    }

    async fn record_login(
        &self,
        id: &DoctorId,
        at: DateTime<Utc>,
    ) -> Result<(), RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(doctors::table.find(id.as_uuid()))
            .set(doctors::last_login.eq(at))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }
}
