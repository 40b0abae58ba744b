//! Terminal formatting.

use riskdesk_calc::RiskResult;
use riskdesk_core::types::{AssetClass, Quote};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to two decimals for display.
pub fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Quote line, e.g. `BTC (Crypto) 64000.00 +1.25% 24h`.
pub fn quote_line(quote: &Quote) -> String {
    let mut line = format!(
        "{} ({}) {}",
        quote.symbol,
        quote.asset_class,
        quote.price.normalize()
    );
    if let Some(change) = quote.change_24h {
        let change = change.round_dp(2);
        let sign = if change >= Decimal::ZERO { "+" } else { "" };
        line.push_str(&format!(" {}{}% 24h", sign, change));
    }
    line
}

/// Multi-line position summary.
pub fn risk_summary(asset_class: AssetClass, symbol: &str, result: &RiskResult) -> String {
    let mut lines = vec![
        format!("{} {}", asset_class, symbol),
        format!("  Amount at risk:   ${}", money(result.amount_at_risk)),
    ];

    let unit = match asset_class {
        AssetClass::Forex => "units",
        AssetClass::Crypto => "coins",
        AssetClass::Stocks => "shares",
    };
    lines.push(format!(
        "  Position size:    {} {}",
        money(result.position_size_units),
        unit
    ));

    if let (Some(standard), Some(mini), Some(micro)) =
        (result.standard_lots, result.mini_lots, result.micro_lots)
    {
        lines.push(format!("  Standard lots:    {}", money(standard)));
        lines.push(format!("  Mini lots:        {}", money(mini)));
        lines.push(format!("  Micro lots:       {}", money(micro)));
    }
    if let Some(pip_value) = result.pip_value_per_lot {
        lines.push(format!("  Pip value / lot:  ${}", money(pip_value)));
    }
    lines.push(format!(
        "  Position value:   ${}",
        money(result.total_position_value)
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_rounds_half_up() {
        assert_eq!(money(dec!(2.345)), "2.35");
        assert_eq!(money(dec!(10)), "10.00");
        assert_eq!(money(dec!(0.004)), "0.00");
    }

    #[test]
    fn test_quote_line_with_change() {
        let quote = Quote {
            symbol: "BTC".to_string(),
            asset_class: AssetClass::Crypto,
            price: dec!(64000.50),
            change_24h: Some(dec!(1.254)),
            fetched_at: Utc::now(),
        };
        assert_eq!(quote_line(&quote), "BTC (Crypto) 64000.5 +1.25% 24h");
    }

    #[test]
    fn test_forex_summary_lists_lots() {
        let result = RiskResult {
            amount_at_risk: dec!(100),
            position_size_units: dec!(50000),
            standard_lots: Some(dec!(0.5)),
            mini_lots: Some(dec!(5)),
            micro_lots: Some(dec!(50)),
            total_position_value: dec!(54250),
            pip_value_per_lot: Some(dec!(10)),
            pip_size: Some(dec!(0.0001)),
        };
        let summary = risk_summary(AssetClass::Forex, "EUR/USD", &result);
        assert!(summary.contains("Amount at risk:   $100.00"));
        assert!(summary.contains("Standard lots:    0.50"));
        assert!(summary.contains("Pip value / lot:  $10.00"));
    }

    #[test]
    fn test_stock_summary_has_no_lots() {
        let result = RiskResult {
            amount_at_risk: dec!(200),
            position_size_units: dec!(40),
            total_position_value: dec!(7600),
            ..RiskResult::default()
        };
        let summary = risk_summary(AssetClass::Stocks, "AAPL", &result);
        assert!(summary.contains("40.00 shares"));
        assert!(!summary.contains("lots"));
    }
}
