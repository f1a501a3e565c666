//! Clinical portal backend library.
//!
//! Layered hexagonally: `domain` owns the record-access workflow and its
//! ports, `inbound` exposes the HTTP surface, `outbound` implements the
//! ports against PostgreSQL and the hosted identity provider, and `server`
//! wires everything into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
