//! Watch command implementation.

use anyhow::Result;
use riskdesk_calc::RiskCalculator;
use riskdesk_config::AppConfig;
use riskdesk_data::{LivePrice, LivePriceTracker};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::price_service;
use super::size::{build_input, print_result, size};
use crate::cli::output::quote_line;
use crate::cli::WatchArgs;

pub async fn run(args: WatchArgs, config: &AppConfig) -> Result<()> {
    let input = build_input(&args.size);
    let refresh = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.tracker.refresh_interval());

    let service = price_service(config)?;
    let tracker = LivePriceTracker::new(service.clone(), config.tracker.debounce());
    let mut updates = tracker.subscribe();
    let mut calculator = RiskCalculator::new(config.calculator.degenerate_stop);

    let shutdown = shutdown_on_ctrl_c();
    let mut ticker = tokio::time::interval(refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        symbol = %input.symbol,
        asset_class = %input.asset_class,
        refresh_secs = refresh.as_secs(),
        degenerate_stop = ?calculator.policy(),
        "Watching live price"
    );

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                // Force a refetch once the previous quote has been shown
                service.cache().invalidate(input.asset_class, &input.symbol);
                tracker.select(input.symbol.clone(), input.asset_class);
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                match state {
                    LivePrice::Live(quote) => {
                        println!("{}", quote_line(&quote));
                        // Each refresh re-derives the entry from the newest price
                        let mut current = input.clone();
                        let result = size(&mut calculator, &mut current, Some(&quote));
                        print_result(&current, &result, args.size.json)?;
                    }
                    LivePrice::Unavailable { symbol, .. } => {
                        warn!(%symbol, "Live price unavailable");
                    }
                    LivePrice::Loading { .. } | LivePrice::Idle => {}
                }
            }
        }
    }

    tracker.clear();
    info!("Stopped watching");
    Ok(())
}

fn shutdown_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, shutting down");
                trigger.cancel();
            }
            Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });
    token
}
