//! PostgreSQL persistence adapters for the record-store ports.

mod diesel_assignment_repository;
mod diesel_doctor_repository;
mod diesel_error_mapping;
mod diesel_medical_record_repository;
mod diesel_patient_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_assignment_repository::DieselAssignmentRepository;
pub use diesel_doctor_repository::DieselDoctorRepository;
pub use diesel_medical_record_repository::DieselMedicalRecordRepository;
pub use diesel_patient_repository::DieselPatientRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
