pub mod daraja;
pub mod gateway_trait;
pub mod token_cache;

pub use daraja::{basic_credential, stk_password, DarajaClient};
pub use gateway_trait::PaymentGateway;
pub use token_cache::TokenCache;
