//! Outbound adapters (driven side): identity transport and persistence.

pub mod identity;
pub mod persistence;
