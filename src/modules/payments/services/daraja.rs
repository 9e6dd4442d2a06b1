use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::*;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use tracing::{error, info, warn};

use super::gateway_trait::PaymentGateway;
use super::token_cache::TokenCache;
use crate::config::DarajaConfig;
use crate::core::{now_gateway_timestamp, AppError, GatewayStage, Result};
use crate::modules::payments::models::{
    AccessTokenResponse, Amount, Msisdn, StkPushRequest,
};

pub const TOKEN_PATH: &str = "/oauth/v1/generate?grant_type=client_credentials";
pub const STK_PUSH_PATH: &str = "/mpesa/stkpush/v1/processrequest";

/// `Authorization` value for the client-credentials token request
pub fn basic_credential(consumer_key: &str, consumer_secret: &str) -> String {
    let encoded = BASE64_STANDARD.encode(format!("{}:{}", consumer_key, consumer_secret));
    format!("Basic {}", encoded)
}

/// STK push password: `base64(shortcode + passkey + timestamp)`
pub fn stk_password(shortcode: &str, passkey: &str, timestamp: &str) -> String {
    BASE64_STANDARD.encode(format!("{}{}{}", shortcode, passkey, timestamp))
}

/// Safaricom Daraja (M-Pesa) client
///
/// Implements PaymentGateway for the Lipa Na M-Pesa Online (STK push) API.
/// API Documentation: https://developer.safaricom.co.ke/APIs/MpesaExpressSimulate
pub struct DarajaClient {
    client: Client,
    config: DarajaConfig,
    token_cache: Option<TokenCache>,
}

impl DarajaClient {
    /// Create a new Daraja client with its own HTTP client
    pub fn new(config: DarajaConfig) -> Result<Self> {
        let client = config.build_http_client()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a Daraja client on top of an existing HTTP client
    pub fn with_client(config: DarajaConfig, client: Client) -> Self {
        let token_cache = config.cache_tokens.then(TokenCache::new);
        Self {
            client,
            config,
            token_cache,
        }
    }

    /// Obtain a bearer token, from the cache when caching is enabled
    pub async fn access_token(&self) -> Result<String> {
        match &self.token_cache {
            Some(cache) => cache.get_or_fetch(|| self.fetch_access_token()).await,
            None => self.fetch_access_token().await.map(|(token, _)| token),
        }
    }

    async fn fetch_access_token(&self) -> Result<(String, Duration)> {
        let url = format!("{}{}", self.config.base_url, TOKEN_PATH);

        let response = self
            .client
            .get(&url)
            .header(
                AUTHORIZATION,
                basic_credential(&self.config.consumer_key, &self.config.consumer_secret),
            )
            .send()
            .await
            .map_err(|e| {
                error!(stage = %GatewayStage::Token, error = %e, "Gateway unreachable");
                AppError::Transport(e)
            })?;

        let response = ensure_success(response, GatewayStage::Token).await?;
        let body = response.bytes().await?;

        let parsed: AccessTokenResponse = serde_json::from_slice(&body)
            .map_err(|e| AppError::malformed(format!("token response is not JSON: {}", e)))?;

        let lifetime = Duration::from_secs(parsed.expires_in_secs());
        let token = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::malformed("token response has no access_token"))?;

        info!(
            expires_in_secs = lifetime.as_secs(),
            "Access token obtained"
        );

        Ok((token, lifetime))
    }

    /// Build the signed STK push payload for the given timestamp
    pub fn build_stk_push_request(
        &self,
        phone: Msisdn,
        amount: Amount,
        timestamp: String,
    ) -> StkPushRequest {
        let config = &self.config;
        StkPushRequest {
            business_short_code: config.shortcode.clone(),
            password: stk_password(&config.shortcode, &config.passkey, &timestamp),
            timestamp,
            transaction_type: config.transaction_type,
            amount,
            party_a: phone,
            party_b: config.shortcode.clone(),
            phone_number: phone,
            call_back_url: config.callback_url.clone(),
            account_reference: config.account_reference.clone(),
            transaction_desc: config.transaction_desc.clone(),
        }
    }

    /// Fetch a token, then send the STK push. The gateway body is returned verbatim.
    pub async fn initiate_stk_push(
        &self,
        phone: Msisdn,
        amount: Amount,
    ) -> Result<serde_json::Value> {
        let token = self.access_token().await?;

        let payload = self.build_stk_push_request(phone, amount, now_gateway_timestamp());
        let url = format!("{}{}", self.config.base_url, STK_PUSH_PATH);

        info!(
            phone = %phone,
            amount = %amount,
            timestamp = %payload.timestamp,
            "Sending STK push"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(stage = %GatewayStage::StkPush, error = %e, "Gateway unreachable");
                AppError::Transport(e)
            })?;

        let response = match ensure_success(response, GatewayStage::StkPush).await {
            Ok(response) => response,
            Err(e) => {
                // A revoked token must not be served again from the cache
                if let (Some(cache), AppError::Upstream { status, .. }) = (&self.token_cache, &e) {
                    if *status == reqwest::StatusCode::UNAUTHORIZED {
                        cache.invalidate().await;
                    }
                }
                return Err(e);
            }
        };

        let body = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::malformed(format!("STK push response is not JSON: {}", e)))?;

        info!(
            checkout_request_id = value
                .get("CheckoutRequestID")
                .and_then(|v| v.as_str())
                .unwrap_or("-"),
            response_code = value
                .get("ResponseCode")
                .and_then(|v| v.as_str())
                .unwrap_or("-"),
            "STK push accepted"
        );

        Ok(value)
    }
}

/// Turn a non-2xx response into `AppError::Upstream`, logging the body
async fn ensure_success(response: Response, stage: GatewayStage) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(stage = %stage, status = %status, body = %body, "Gateway returned error status");

    Err(AppError::Upstream { stage, status })
}

#[async_trait]
impl PaymentGateway for DarajaClient {
    async fn initiate_stk_push(
        &self,
        phone: Msisdn,
        amount: Amount,
    ) -> Result<serde_json::Value> {
        DarajaClient::initiate_stk_push(self, phone, amount).await
    }

    fn name(&self) -> &str {
        "daraja"
    }
}
