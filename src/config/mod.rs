use crate::core::Result;
use std::env;

pub mod daraja;
pub mod server;

pub use daraja::DarajaConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub daraja: DarajaConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(&|key: &str| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_source<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            app: AppConfig {
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            },
            server: ServerConfig::from_source(lookup)?,
            daraja: DarajaConfig::from_source(lookup)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(crate::core::AppError::configuration(
                "PORT must be greater than 0",
            ));
        }

        self.daraja.validate()
    }
}
