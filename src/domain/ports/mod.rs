//! Driven ports for the record-access workflow.
//!
//! In hexagonal terms these are the seams between the domain and its
//! collaborators: the hosted identity provider and the relational record
//! store. The workflow depends only on these traits, so tests substitute
//! deterministic doubles and production wires diesel/reqwest adapters.

mod assignment_repository;
mod doctor_repository;
mod identity_provider;
mod medical_record_repository;
mod patient_repository;
mod record_store;

pub use assignment_repository::AssignmentRepository;
pub use doctor_repository::DoctorRepository;
pub use identity_provider::{IdentityError, IdentityProvider, IdentitySession};
pub use medical_record_repository::MedicalRecordRepository;
pub use patient_repository::PatientRepository;
pub use record_store::RecordStoreError;
