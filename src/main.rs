//! Portal entry-point: reads settings, wires adapters, and serves HTTP.

use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use ayusphere_portal::domain::RecordAccessService;
use ayusphere_portal::outbound::identity::{HttpIdentityProvider, IdentityProviderConfig};
use ayusphere_portal::outbound::persistence::{
    DbPool, DieselAssignmentRepository, DieselDoctorRepository, DieselMedicalRecordRepository,
    DieselPatientRepository, PoolConfig,
};
use ayusphere_portal::server::health::HealthState;
use ayusphere_portal::server::{PortalSettings, ServerConfig, create_server};

fn load_session_key(settings: &PortalSettings) -> std::io::Result<Key> {
    match std::fs::read(&settings.session_key_file) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(
                    path = %settings.session_key_file.display(),
                    error = %e,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    settings.session_key_file.display()
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PortalSettings::from_env().map_err(std::io::Error::other)?;
    let key = load_session_key(&settings)?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.clone())
            .with_max_size(settings.pool_size)
            .with_connection_timeout(settings.pool_checkout_timeout()),
    )
    .await
    .map_err(std::io::Error::other)?;

    let identity = HttpIdentityProvider::new(IdentityProviderConfig::new(
        settings.identity_url.clone(),
        settings.identity_api_key.clone(),
    ))
    .map_err(std::io::Error::other)?;

    let access = Arc::new(RecordAccessService::new(
        Arc::new(DieselDoctorRepository::new(pool.clone())),
        Arc::new(DieselPatientRepository::new(pool.clone())),
        Arc::new(DieselAssignmentRepository::new(pool.clone())),
        Arc::new(DieselMedicalRecordRepository::new(pool)),
        Arc::new(identity),
    ));

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        key,
        settings.cookie_secure,
        SameSite::Lax,
        settings.bind_addr,
        access,
    );

    create_server(health_state, config)?.await
}
