//! Diesel-backed assignment repository.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::DoctorId;
use crate::domain::ports::{AssignmentRepository, RecordStoreError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::doctor_patient_assignments;

/// PostgreSQL adapter for the assignment port.
pub struct DieselAssignmentRepository {
    pool: DbPool,
}

impl DieselAssignmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for DieselAssignmentRepository {
    async fn has_active(
        &self,
        doctor: &DoctorId,
        patient: Uuid,
    ) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            doctor_patient_assignments::table
                .filter(doctor_patient_assignments::doctor_id.eq(doctor.as_uuid()))
                .filter(doctor_patient_assignments::patient_id.eq(patient))
                .filter(doctor_patient_assignments::is_active.eq(true)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
