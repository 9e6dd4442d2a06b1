use serde::{Deserialize, Serialize};
use std::fmt;

/// Inbound body of `POST /api/pay`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PayRequest {
    pub phone: Msisdn,
    pub amount: Amount,
}

/// Subscriber phone number in international form without `+` or leading zero,
/// e.g. `254708374149`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMsisdn", into = "u64")]
pub struct Msisdn(u64);

/// Accepted wire forms of a phone number
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawMsisdn {
    Number(u64),
    Text(String),
}

impl Msisdn {
    const MIN_DIGITS: usize = 9;
    const MAX_DIGITS: usize = 15;

    pub fn new(value: u64) -> Result<Self, String> {
        let digits = value.to_string().len();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits) {
            return Err(format!(
                "phone must have between {} and {} digits",
                Self::MIN_DIGITS,
                Self::MAX_DIGITS
            ));
        }
        Ok(Msisdn(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<RawMsisdn> for Msisdn {
    type Error = String;

    fn try_from(raw: RawMsisdn) -> Result<Self, Self::Error> {
        match raw {
            RawMsisdn::Number(value) => Msisdn::new(value),
            RawMsisdn::Text(text) => {
                let text = text.trim();
                let digits = text.strip_prefix('+').unwrap_or(text);
                if digits.starts_with('0') {
                    return Err("phone must be in international format without a leading zero"
                        .to_string());
                }
                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err("phone must contain only digits".to_string());
                }
                let value = digits
                    .parse()
                    .map_err(|_| "phone must have at most 15 digits".to_string())?;
                Msisdn::new(value)
            }
        }
    }
}

impl From<Msisdn> for u64 {
    fn from(msisdn: Msisdn) -> Self {
        msisdn.0
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payment amount in whole currency units; the gateway rejects fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAmount", into = "u64")]
pub struct Amount(u64);

/// Accepted wire forms of an amount
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Whole(u64),
    Fractional(f64),
}

impl Amount {
    pub fn new(value: u64) -> Result<Self, String> {
        if value == 0 {
            return Err("amount must be greater than 0".to_string());
        }
        Ok(Amount(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<RawAmount> for Amount {
    type Error = String;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        match raw {
            RawAmount::Whole(value) => Amount::new(value),
            RawAmount::Fractional(value) => {
                if value <= 0.0 {
                    return Err("amount must be greater than 0".to_string());
                }
                if value.fract() != 0.0 || value > u64::MAX as f64 {
                    return Err("amount must be a whole number".to_string());
                }
                Amount::new(value as u64)
            }
        }
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
