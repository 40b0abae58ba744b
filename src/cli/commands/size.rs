//! Position size command implementation.

use anyhow::Result;
use riskdesk_calc::{RiskCalculator, RiskInput, RiskResult, SizingLeg};
use riskdesk_config::AppConfig;
use riskdesk_core::types::Quote;
use tracing::{info, warn};

use super::{amount, price_service};
use crate::cli::output::risk_summary;
use crate::cli::SizeArgs;

pub async fn run(args: SizeArgs, config: &AppConfig) -> Result<()> {
    let mut input = build_input(&args);

    let quote = if args.offline {
        None
    } else {
        let service = price_service(config)?;
        service.fetch_price(&input.symbol, input.asset_class).await
    };

    match &quote {
        Some(quote) => info!(symbol = %quote.symbol, price = %quote.price, "Using live price"),
        None if !args.offline => {
            warn!(symbol = %input.symbol, "No live price, sizing from entered values only")
        }
        None => {}
    }

    let mut calculator = RiskCalculator::new(config.calculator.degenerate_stop);
    let result = size(&mut calculator, &mut input, quote.as_ref());
    print_result(&input, &result, args.json)
}

/// Turn command-line arguments into calculator input.
pub fn build_input(args: &SizeArgs) -> RiskInput {
    let class = args.asset_class;
    let symbol = args
        .symbol
        .as_deref()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| class.default_symbol().to_string());

    let entry_price = amount(args.entry.as_deref());
    let leg = if class.uses_pips() {
        SizingLeg::Pips {
            stop_loss_pips: amount(args.pips.as_deref()),
            entry_price,
        }
    } else {
        SizingLeg::Distance {
            entry_price,
            stop_loss_price: amount(args.stop.as_deref()),
        }
    };

    RiskInput {
        account_balance: amount(args.balance.as_deref()),
        risk_percent: amount(args.risk.as_deref()),
        asset_class: class,
        symbol,
        leg,
    }
}

/// Prefill the entry from the quote where the leg prices by distance, then
/// recompute.
pub fn size(
    calculator: &mut RiskCalculator,
    input: &mut RiskInput,
    quote: Option<&Quote>,
) -> RiskResult {
    if let (Some(quote), SizingLeg::Distance { .. }) = (quote, &input.leg) {
        input.prefill_entry(quote);
    }
    calculator.update(input, quote).clone()
}

pub fn print_result(input: &RiskInput, result: &RiskResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", risk_summary(input.asset_class, &input.symbol, result));
    }
    Ok(())
}
