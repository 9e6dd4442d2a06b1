pub mod error;
pub mod timestamp;

pub use error::{AppError, GatewayStage, Result};
pub use timestamp::{gateway_timestamp, now_gateway_timestamp};
