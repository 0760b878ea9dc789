//! # SCIM Gateway
//!
//! Serves the SCIM 2.0 discovery endpoints until SIGINT or SIGTERM, then
//! drains in-flight requests within `SERVER_SHUTDOWN_TIMEOUT`.
//!
//! ```bash
//! SCIM_API_KEY=s3cret SERVER_PORT=8080 cargo run --bin scim-gateway
//! curl -H 'X-API-KEY: Bearer s3cret' http://localhost:8080/scim/v2/ServiceProviderConfig
//! ```
//!
//! See [`scim_gateway::config`] for every supported environment variable.
//!
//! Exits with status 1 when startup fails, the listener fails or shutdown
//! exceeds its grace period.

use scim_gateway::auth::ApiKeyAuthenticator;
use scim_gateway::server::termination_signal;
use scim_gateway::{GatewayConfig, GatewayServer, ScimOperationHandler, logging};

use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // No logger yet: the log settings are part of what failed to load.
            eprintln!("scim-gateway: [{}] {}", e.kind(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging, &config.application) {
        eprintln!("scim-gateway: [{}] {}", e.kind(), e);
        return ExitCode::FAILURE;
    }

    info!(
        "Starting {} {} ({})",
        config.application.service, config.application.version, config.application.environment
    );

    let discovery = match config.discovery.build() {
        Ok(discovery) => discovery,
        Err(e) => {
            error!("Startup failed [{}]: {}", e.kind(), e);
            logging::flush();
            return ExitCode::FAILURE;
        }
    };

    let handler = ScimOperationHandler::new(discovery, ApiKeyAuthenticator::new(&config.auth))
        .with_request_timeout(config.server.request_timeout());

    let signal = termination_signal();
    let mut server = GatewayServer::new(config.server.clone(), handler.router());
    server.listen_and_serve();

    let status = match server.shutdown(signal).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Gateway stopped [{}]: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    };

    logging::flush();
    status
}
