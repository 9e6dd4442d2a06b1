// Test Server Helpers
//
// Spawns the relay over real HTTP using actix-test, wired to a gateway URL.

use std::sync::Arc;

use actix_web::{web, App};
use daraja_relay::config::DarajaConfig;
use daraja_relay::middleware::{ErrorLogger, RequestId};
use daraja_relay::modules;
use daraja_relay::{DarajaClient, PaymentGateway};
use tracing_actix_web::TracingLogger;

use super::fake_gateway::TestServer;
use super::test_data::daraja_config;

/// Spawn the relay with the production route and middleware setup
///
/// # Behavior
/// - Builds a `DarajaClient` from `config`
/// - Starts actix-web on a random available port
/// - Server stops automatically when TestServer drops
pub fn spawn_relay_with_config(config: DarajaConfig) -> TestServer {
    let client = DarajaClient::new(config).expect("Failed to build gateway client");
    let gateway: Arc<dyn PaymentGateway> = Arc::new(client);
    let gateway = web::Data::from(gateway);

    actix_test::start(move || {
        App::new()
            .wrap(ErrorLogger)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(gateway.clone())
            .configure(modules::configure)
    })
}

/// Spawn the relay against `gateway_base_url` with default test credentials
pub fn spawn_relay(gateway_base_url: &str) -> TestServer {
    spawn_relay_with_config(daraja_config(gateway_base_url))
}
