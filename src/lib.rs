//! Daraja Relay Library
//!
//! HTTP relay that turns `POST /api/pay` into an M-Pesa STK push: it obtains
//! an OAuth access token from the Daraja gateway, signs the payment request
//! and returns the gateway's answer.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::payments;
pub use modules::payments::{DarajaClient, PaymentGateway};
