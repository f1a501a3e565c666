//! HTTP inbound adapter: the thin presentation shell over the workflow.

pub mod auth;
pub mod error;
pub mod patients;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use state::HttpState;
