pub mod pay_request;
pub mod stk_push;

pub use pay_request::{Amount, Msisdn, PayRequest};
pub use stk_push::{AccessTokenResponse, StkPushRequest, TransactionType};
