use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use daraja_relay::config::Config;
use daraja_relay::middleware::{ErrorLogger, RequestId};
use daraja_relay::modules;
use daraja_relay::{DarajaClient, PaymentGateway};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daraja_relay=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Daraja Relay");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Gateway: {}", config.daraja.base_url);
    tracing::info!(
        shortcode = %config.daraja.shortcode,
        transaction_type = %config.daraja.transaction_type,
        cache_tokens = config.daraja.cache_tokens,
        "Merchant configured"
    );

    let client = DarajaClient::new(config.daraja.clone()).expect("Failed to build gateway client");
    let gateway: Arc<dyn PaymentGateway> = Arc::new(client);
    tracing::info!(gateway = gateway.name(), "Payment gateway ready");
    let gateway = web::Data::from(gateway);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorLogger)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(gateway.clone())
            .configure(modules::configure)
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
