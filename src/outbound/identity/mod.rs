//! Hosted identity-provider adapter.

mod dto;
mod http_identity_provider;

pub use http_identity_provider::{HttpIdentityProvider, IdentityProviderConfig};
