use crate::core::{AppError, Result};
use crate::modules::payments::models::TransactionType;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://sandbox.safaricom.co.ke";
pub const DEFAULT_ACCOUNT_REFERENCE: &str = "Test123";
pub const DEFAULT_TRANSACTION_DESC: &str = "Payment for services";

/// Merchant credentials and request defaults for the Daraja gateway.
///
/// Built once at startup and handed to the gateway client; never mutated.
#[derive(Clone)]
pub struct DarajaConfig {
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub shortcode: String,
    pub passkey: String,
    pub callback_url: String,
    pub transaction_type: TransactionType,
    pub account_reference: String,
    pub transaction_desc: String,
    /// Whole-request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
    pub cache_tokens: bool,
}

impl DarajaConfig {
    pub fn from_source<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| AppError::configuration(format!("{} not set", key)))
        };

        let transaction_type = match lookup("TRANSACTION_TYPE") {
            Some(raw) => raw.parse()?,
            None => TransactionType::default(),
        };

        let timeout = match lookup("DARAJA_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| AppError::configuration("Invalid DARAJA_TIMEOUT_SECS"))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let cache_tokens = lookup("DARAJA_CACHE_TOKENS")
            .unwrap_or_else(|| "false".to_string())
            .parse()
            .map_err(|_| AppError::configuration("Invalid DARAJA_CACHE_TOKENS"))?;

        Ok(DarajaConfig {
            base_url: lookup("BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            consumer_key: required("CONSUMER_KEY")?,
            consumer_secret: required("CONSUMER_SECRET")?,
            shortcode: required("SHORT_CODE")?,
            passkey: required("PASSKEY")?,
            callback_url: required("CALLBACK_URL")?,
            transaction_type,
            account_reference: lookup("ACCOUNT_REFERENCE")
                .unwrap_or_else(|| DEFAULT_ACCOUNT_REFERENCE.to_string()),
            transaction_desc: lookup("TRANSACTION_DESC")
                .unwrap_or_else(|| DEFAULT_TRANSACTION_DESC.to_string()),
            timeout,
            cache_tokens,
        })
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("CONSUMER_KEY", &self.consumer_key),
            ("CONSUMER_SECRET", &self.consumer_secret),
            ("PASSKEY", &self.passkey),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::configuration(format!("{} must not be empty", name)));
            }
        }

        if self.shortcode.is_empty() || !self.shortcode.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::configuration("SHORT_CODE must be numeric"));
        }

        for (name, value) in [("BASE_URL", &self.base_url), ("CALLBACK_URL", &self.callback_url)] {
            if !(value.starts_with("https://") || value.starts_with("http://")) {
                return Err(AppError::configuration(format!(
                    "{} must be an http(s) URL",
                    name
                )));
            }
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(AppError::configuration(
                "DARAJA_TIMEOUT_SECS must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Build the shared HTTP client used for every gateway call
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(AppError::from)
    }
}

impl fmt::Debug for DarajaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DarajaConfig")
            .field("base_url", &self.base_url)
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("shortcode", &self.shortcode)
            .field("passkey", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .field("transaction_type", &self.transaction_type)
            .field("account_reference", &self.account_reference)
            .field("transaction_desc", &self.transaction_desc)
            .field("timeout", &self.timeout)
            .field("cache_tokens", &self.cache_tokens)
            .finish()
    }
}
