//! Service entry-point: loads settings, connects the stores and serves HTTP.

mod server;

use std::env;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, StartupError, connect_user_service, create_server};
use userhub::inbound::http::health::HealthState;
use userhub::settings::AppSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    if let Err(err) = run().await {
        error!(error = %err, "startup failed");
        return Err(std::io::Error::other(err.to_string()));
    }
    Ok(())
}

async fn run() -> Result<(), StartupError> {
    let settings = AppSettings::load_from_iter(env::args_os())
        .map_err(|err| StartupError::Settings(err.to_string()))?;

    let users = connect_user_service(&settings).await?;
    let config = ServerConfig::new(settings.bind_addr(), users);
    info!(bind_addr = %config.bind_addr(), "starting HTTP server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
