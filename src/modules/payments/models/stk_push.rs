use crate::core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::pay_request::{Amount, Msisdn};

/// Daraja transaction types supported by STK push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionType {
    /// Paybill shortcode
    #[default]
    CustomerPayBillOnline,
    /// Till number (buy goods)
    CustomerBuyGoodsOnline,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CustomerPayBillOnline => "CustomerPayBillOnline",
            TransactionType::CustomerBuyGoodsOnline => "CustomerBuyGoodsOnline",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CustomerPayBillOnline" => Ok(TransactionType::CustomerPayBillOnline),
            "CustomerBuyGoodsOnline" => Ok(TransactionType::CustomerBuyGoodsOnline),
            other => Err(AppError::configuration(format!(
                "Unsupported TRANSACTION_TYPE: {}",
                other
            ))),
        }
    }
}

/// Body of `POST /mpesa/stkpush/v1/processrequest`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkPushRequest {
    pub business_short_code: String,
    pub password: String,
    pub timestamp: String,
    pub transaction_type: TransactionType,
    pub amount: Amount,
    pub party_a: Msisdn,
    pub party_b: String,
    pub phone_number: Msisdn,
    #[serde(rename = "CallBackURL")]
    pub call_back_url: String,
    pub account_reference: String,
    pub transaction_desc: String,
}

/// Body of `GET /oauth/v1/generate`
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: Option<String>,
    /// Seconds; Daraja sends this as a string
    #[serde(default)]
    pub expires_in: Option<serde_json::Value>,
}

impl AccessTokenResponse {
    pub const DEFAULT_EXPIRES_IN_SECS: u64 = 3599;
    /// Longer lifetimes are clamped to one day
    pub const MAX_EXPIRES_IN_SECS: u64 = 86_400;

    pub fn expires_in_secs(&self) -> u64 {
        let secs = match &self.expires_in {
            Some(serde_json::Value::Number(n)) => n.as_u64(),
            Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        secs.unwrap_or(Self::DEFAULT_EXPIRES_IN_SECS)
            .min(Self::MAX_EXPIRES_IN_SECS)
    }
}
