use crate::core::Result;
use crate::modules::payments::models::{Amount, Msisdn};
use async_trait::async_trait;

/// Payment gateway able to prompt a subscriber's handset for payment
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start an STK push and return the gateway's response body untouched
    async fn initiate_stk_push(&self, phone: Msisdn, amount: Amount)
        -> Result<serde_json::Value>;

    /// Get gateway name
    fn name(&self) -> &str;
}
