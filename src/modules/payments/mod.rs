pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{Amount, Msisdn, PayRequest, StkPushRequest, TransactionType};
pub use services::{DarajaClient, PaymentGateway, TokenCache};
