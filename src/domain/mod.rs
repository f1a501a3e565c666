//! Domain primitives and the record-access workflow.
//!
//! Purpose: define strongly typed entities with validated constructors, the
//! closed error taxonomy, the ports the workflow depends on, and the
//! workflow itself. Nothing in this module knows about HTTP, Diesel, or
//! reqwest.

pub mod access;
pub mod auth;
pub mod doctor;
pub mod error;
pub mod medical_record;
pub mod patient;
pub mod ports;

pub use self::access::{AuthenticatedDoctor, PatientHistory, RecordAccessService};
pub use self::auth::{AccessToken, LoginCredentials, LoginValidationError};
pub use self::doctor::{Doctor, DoctorId, DoctorValidationError, NmrId};
pub use self::error::{Error, ErrorCode};
pub use self::medical_record::MedicalRecord;
pub use self::patient::{Patient, PatientAccessSecret, PatientPublicId, PatientValidationError};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
