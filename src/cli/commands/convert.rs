//! Currency conversion command implementation.

use anyhow::{Context, Result};
use riskdesk_calc::tools;
use riskdesk_config::AppConfig;
use riskdesk_feeds::TwelveDataClient;
use tracing::info;

use super::{amount_or_zero, twelve_data_config};
use crate::cli::output::money;
use crate::cli::ConvertArgs;

pub async fn run(args: ConvertArgs, config: &AppConfig) -> Result<()> {
    let from = args.from.trim().to_uppercase();
    let to = args.to.trim().to_uppercase();
    let amount = amount_or_zero(Some(&args.amount));

    let client = TwelveDataClient::new(twelve_data_config(config))
        .context("Failed to create Twelve Data client")?;
    let rate = client
        .exchange_rate(&from, &to)
        .await
        .with_context(|| format!("Failed to fetch {}/{} exchange rate", from, to))?;

    info!(pair = %format!("{}/{}", from, to), %rate, "Fetched exchange rate");

    println!(
        "{} {} = {} {} (rate {})",
        money(amount),
        from,
        money(tools::convert(amount, rate)),
        to,
        rate.normalize()
    );
    Ok(())
}
