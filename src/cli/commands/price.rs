//! Live price command implementation.

use anyhow::Result;
use futures::future::join_all;
use riskdesk_config::AppConfig;
use tracing::info;

use super::price_service;
use crate::cli::output::quote_line;
use crate::cli::PriceArgs;

pub async fn run(args: PriceArgs, config: &AppConfig) -> Result<()> {
    let class = args.asset_class;
    let symbols: Vec<String> = if args.symbols.is_empty() {
        vec![class.default_symbol().to_string()]
    } else {
        args.symbols.iter().map(|s| s.trim().to_uppercase()).collect()
    };

    info!(asset_class = %class, count = symbols.len(), "Fetching prices");

    let service = price_service(config)?;
    let quotes = join_all(
        symbols
            .iter()
            .map(|symbol| service.fetch_price(symbol, class)),
    )
    .await;

    let mut missing = 0;
    for (symbol, quote) in symbols.iter().zip(&quotes) {
        match quote {
            Some(quote) if args.json => println!("{}", serde_json::to_string(quote)?),
            Some(quote) => println!("{}", quote_line(quote)),
            None => {
                missing += 1;
                if !args.json {
                    println!("{} ({}) unavailable", symbol, class);
                }
            }
        }
    }

    if missing == symbols.len() {
        anyhow::bail!("No live price available for {}", symbols.join(", "));
    }
    Ok(())
}
