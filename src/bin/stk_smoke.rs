//! One-off STK push against the configured gateway.
//!
//! Reads the same environment as the server and prints the gateway response.

use anyhow::Context;
use clap::Parser;
use daraja_relay::config::Config;
use daraja_relay::payments::{Amount, Msisdn};
use daraja_relay::DarajaClient;

#[derive(Parser, Debug)]
#[command(name = "stk-smoke", about = "Send a single STK push through the Daraja gateway")]
struct Cli {
    /// Phone number in international format, e.g. 254708374149
    #[arg(long, default_value_t = 254708374149)]
    phone: u64,

    /// Whole amount to request
    #[arg(long, default_value_t = 1)]
    amount: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daraja_relay=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let phone = Msisdn::new(cli.phone).map_err(anyhow::Error::msg)?;
    let amount = Amount::new(cli.amount).map_err(anyhow::Error::msg)?;

    let config = Config::from_env().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    let client = DarajaClient::new(config.daraja).context("building gateway client")?;
    let response = client
        .initiate_stk_push(phone, amount)
        .await
        .context("STK push failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
