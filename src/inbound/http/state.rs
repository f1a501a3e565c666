//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the workflow (which itself only depends on ports) and remain
//! testable without I/O.

use std::sync::Arc;

use crate::domain::RecordAccessService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub access: Arc<RecordAccessService>,
}

impl HttpState {
    /// Bundle the record-access workflow for handler injection.
    pub fn new(access: RecordAccessService) -> Self {
        Self {
            access: Arc::new(access),
        }
    }
}
