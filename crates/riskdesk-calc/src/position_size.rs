//! Position sizing from a fixed fraction of the account at risk.

use riskdesk_core::types::{AssetClass, Quote};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::forex::{pip_size, pip_value_per_standard_lot, STANDARD_LOT_UNITS};

/// How the stop-loss is expressed for an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SizingLeg {
    /// Forex: stop distance in pips. `entry_price` overrides the live rate
    /// used for valuation and USD-based pip values.
    Pips {
        stop_loss_pips: Option<Decimal>,
        entry_price: Option<Decimal>,
    },
    /// Crypto and stocks: stop distance derived from two prices.
    Distance {
        entry_price: Option<Decimal>,
        stop_loss_price: Option<Decimal>,
    },
}

/// Calculator input. Numeric fields are optional so that half-filled forms
/// can be represented; anything missing makes the result not computable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    /// Account balance in USD
    pub account_balance: Option<Decimal>,
    /// Percent of the balance risked on this trade
    pub risk_percent: Option<Decimal>,
    pub asset_class: AssetClass,
    pub symbol: String,
    pub leg: SizingLeg,
}

impl RiskInput {
    /// Forex input with a stop in pips.
    pub fn forex(
        symbol: impl Into<String>,
        account_balance: Decimal,
        risk_percent: Decimal,
        stop_loss_pips: Decimal,
    ) -> Self {
        Self {
            account_balance: Some(account_balance),
            risk_percent: Some(risk_percent),
            asset_class: AssetClass::Forex,
            symbol: symbol.into(),
            leg: SizingLeg::Pips {
                stop_loss_pips: Some(stop_loss_pips),
                entry_price: None,
            },
        }
    }

    /// Crypto or stock input with entry and stop-loss prices.
    pub fn priced(
        asset_class: AssetClass,
        symbol: impl Into<String>,
        account_balance: Decimal,
        risk_percent: Decimal,
        entry_price: Decimal,
        stop_loss_price: Decimal,
    ) -> Self {
        Self {
            account_balance: Some(account_balance),
            risk_percent: Some(risk_percent),
            asset_class,
            symbol: symbol.into(),
            leg: SizingLeg::Distance {
                entry_price: Some(entry_price),
                stop_loss_price: Some(stop_loss_price),
            },
        }
    }

    /// Set the user-entered entry price.
    pub fn with_entry_price(mut self, price: Decimal) -> Self {
        match &mut self.leg {
            SizingLeg::Pips { entry_price, .. } | SizingLeg::Distance { entry_price, .. } => {
                *entry_price = Some(price);
            }
        }
        self
    }

    /// Whether the leg variant matches the asset class.
    pub fn is_consistent(&self) -> bool {
        matches!(
            (&self.leg, self.asset_class.uses_pips()),
            (SizingLeg::Pips { .. }, true) | (SizingLeg::Distance { .. }, false)
        )
    }

    /// Fill the entry price from a live quote unless the user already set one.
    pub fn prefill_entry(&mut self, quote: &Quote) {
        if !quote_matches(self, quote) {
            return;
        }
        match &mut self.leg {
            SizingLeg::Pips { entry_price, .. } | SizingLeg::Distance { entry_price, .. } => {
                if entry_price.is_none() {
                    *entry_price = Some(quote.price);
                }
            }
        }
    }
}

/// Calculator output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Dollars lost if the stop is hit
    pub amount_at_risk: Decimal,
    /// Position size in units (currency units, coins or shares)
    pub position_size_units: Decimal,
    pub standard_lots: Option<Decimal>,
    pub mini_lots: Option<Decimal>,
    pub micro_lots: Option<Decimal>,
    /// Notional value of the position in USD
    pub total_position_value: Decimal,
    /// Pip value per standard lot used for forex sizing
    pub pip_value_per_lot: Option<Decimal>,
    /// Pip size of the forex pair
    pub pip_size: Option<Decimal>,
}

impl RiskResult {
    /// All-zero result.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Zero sizing that still reports the amount at risk.
    pub fn risk_only(amount_at_risk: Decimal) -> Self {
        Self {
            amount_at_risk,
            ..Self::default()
        }
    }
}

/// Outcome of a single calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sizing {
    /// Balance or risk percent missing: the result resets to zero.
    Empty,
    /// Amount at risk is known but the stop is missing or has zero distance.
    Degenerate { amount_at_risk: Decimal },
    /// Fully sized position.
    Sized(RiskResult),
}

impl Sizing {
    /// Sized result, if any.
    pub fn result(&self) -> Option<&RiskResult> {
        match self {
            Sizing::Sized(result) => Some(result),
            _ => None,
        }
    }

    /// Amount at risk, zero when the input was empty.
    pub fn amount_at_risk(&self) -> Decimal {
        match self {
            Sizing::Empty => Decimal::ZERO,
            Sizing::Degenerate { amount_at_risk } => *amount_at_risk,
            Sizing::Sized(result) => result.amount_at_risk,
        }
    }
}

/// `balance × risk% / 100`, zero on overflow.
pub fn amount_at_risk(account_balance: Decimal, risk_percent: Decimal) -> Decimal {
    account_balance
        .checked_mul(risk_percent / dec!(100))
        .unwrap_or(Decimal::ZERO)
}

/// Size a position.
///
/// `quote` is the most recent live price, if any. It is ignored when it
/// belongs to a different symbol or asset class than the input.
pub fn calculate(input: &RiskInput, quote: Option<&Quote>) -> Sizing {
    let (balance, risk) = match (positive(input.account_balance), positive(input.risk_percent)) {
        (Some(balance), Some(risk)) => (balance, risk),
        _ => return Sizing::Empty,
    };

    let Some(risk_amount) = balance.checked_mul(risk / dec!(100)) else {
        debug!(symbol = %input.symbol, "Amount at risk overflowed");
        return Sizing::Empty;
    };

    if !input.is_consistent() {
        debug!(
            symbol = %input.symbol,
            asset_class = %input.asset_class,
            "Sizing leg does not match asset class"
        );
        return Sizing::Degenerate {
            amount_at_risk: risk_amount,
        };
    }

    let live_price = quote
        .filter(|q| quote_matches(input, q))
        .map(|q| q.price);

    let sized = match &input.leg {
        SizingLeg::Pips {
            stop_loss_pips,
            entry_price,
        } => size_forex(
            &input.symbol,
            risk_amount,
            *stop_loss_pips,
            positive(*entry_price).or(positive(live_price)),
        ),
        SizingLeg::Distance {
            entry_price,
            stop_loss_price,
        } => size_by_distance(risk_amount, *entry_price, *stop_loss_price),
    };

    match sized {
        Some(result) => Sizing::Sized(result),
        None => Sizing::Degenerate {
            amount_at_risk: risk_amount,
        },
    }
}

fn size_forex(
    symbol: &str,
    amount_at_risk: Decimal,
    stop_loss_pips: Option<Decimal>,
    valuation_price: Option<Decimal>,
) -> Option<RiskResult> {
    let pips = positive(stop_loss_pips)?;
    let pip_value = pip_value_per_standard_lot(symbol, valuation_price)?;

    let lots = amount_at_risk.checked_div(pips.checked_mul(pip_value)?)?;
    let units = lots.checked_mul(STANDARD_LOT_UNITS)?;

    // Units of a USD-based pair are already USD
    let total_value = if symbol.starts_with("USD") {
        units
    } else {
        units.checked_mul(valuation_price.unwrap_or(Decimal::ZERO))?
    };

    Some(RiskResult {
        amount_at_risk,
        position_size_units: units,
        standard_lots: Some(lots),
        mini_lots: Some(lots.checked_mul(dec!(10))?),
        micro_lots: Some(lots.checked_mul(dec!(100))?),
        total_position_value: total_value,
        pip_value_per_lot: Some(pip_value),
        pip_size: Some(pip_size(symbol)),
    })
}

fn size_by_distance(
    amount_at_risk: Decimal,
    entry_price: Option<Decimal>,
    stop_loss_price: Option<Decimal>,
) -> Option<RiskResult> {
    let entry = positive(entry_price)?;
    let stop = stop_loss_price.filter(|p| *p >= Decimal::ZERO)?;

    let distance = (entry - stop).abs();
    if distance.is_zero() {
        return None;
    }

    let units = amount_at_risk.checked_div(distance)?;

    Some(RiskResult {
        amount_at_risk,
        position_size_units: units,
        total_position_value: units.checked_mul(entry)?,
        ..RiskResult::default()
    })
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

fn quote_matches(input: &RiskInput, quote: &Quote) -> bool {
    quote.symbol == input.symbol && quote.asset_class == input.asset_class
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use riskdesk_core::types::PriceTick;

    fn quote(symbol: &str, asset_class: AssetClass, price: Decimal) -> Quote {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        Quote::from_tick(symbol, asset_class, PriceTick::new(price), at)
    }

    fn sized(input: &RiskInput, quote: Option<&Quote>) -> RiskResult {
        match calculate(input, quote) {
            Sizing::Sized(result) => result,
            other => panic!("expected a sized result, got {:?}", other),
        }
    }

    #[test]
    fn test_amount_at_risk_is_exact() {
        for (balance, risk, expected) in [
            (dec!(10000), dec!(1), dec!(100)),
            (dec!(2500), dec!(0.5), dec!(12.5)),
            (dec!(123456.78), dec!(2.25), dec!(2777.77755)),
            (dec!(0), dec!(3), dec!(0)),
        ] {
            assert_eq!(amount_at_risk(balance, risk), expected);
        }
    }

    #[test]
    fn test_forex_usd_quoted_pair() {
        // 1% of 10000 = 100 at risk over 10 pips at $10/pip
        let input = RiskInput::forex("EUR/USD", dec!(10000), dec!(1), dec!(10));
        let result = sized(&input, None);

        assert_eq!(result.amount_at_risk, dec!(100));
        assert_eq!(result.pip_value_per_lot, Some(dec!(10)));
        assert_eq!(result.standard_lots, Some(dec!(1)));
        assert_eq!(result.position_size_units, dec!(100000));
        assert_eq!(result.mini_lots, Some(dec!(10)));
        assert_eq!(result.micro_lots, Some(dec!(100)));
        assert_eq!(result.pip_size, Some(dec!(0.0001)));
        // No price known: value cannot be computed
        assert_eq!(result.total_position_value, dec!(0));
    }

    #[test]
    fn test_forex_value_uses_live_price() {
        let input = RiskInput::forex("EUR/USD", dec!(10000), dec!(1), dec!(10));
        let live = quote("EUR/USD", AssetClass::Forex, dec!(1.1));
        let result = sized(&input, Some(&live));

        assert_eq!(result.total_position_value, dec!(110000));
    }

    #[test]
    fn test_forex_entry_overrides_live_price() {
        let input =
            RiskInput::forex("EUR/USD", dec!(10000), dec!(1), dec!(10)).with_entry_price(dec!(1.2));
        let live = quote("EUR/USD", AssetClass::Forex, dec!(1.1));
        let result = sized(&input, Some(&live));

        assert_eq!(result.total_position_value, dec!(120000));
    }

    #[test]
    fn test_forex_usdjpy_with_live_price() {
        // 200 at risk, 20 pips, pip value 1000/150
        let input = RiskInput::forex("USD/JPY", dec!(20000), dec!(1), dec!(20));
        let live = quote("USD/JPY", AssetClass::Forex, dec!(150));
        let result = sized(&input, Some(&live));

        let pip_value = result.pip_value_per_lot.unwrap();
        assert!((pip_value - dec!(6.667)).abs() < dec!(0.001));

        let lots = result.standard_lots.unwrap();
        assert!((lots - dec!(1.5)).abs() < dec!(0.000001));
        // USD base: units are already USD
        assert_eq!(result.total_position_value, result.position_size_units);
        assert_eq!(result.pip_size, Some(dec!(0.01)));
    }

    #[test]
    fn test_forex_ignores_quote_for_other_symbol() {
        let input = RiskInput::forex("USD/JPY", dec!(20000), dec!(1), dec!(20));
        let stale = quote("EUR/USD", AssetClass::Forex, dec!(1.1));
        let with_stale = sized(&input, Some(&stale));
        let without = sized(&input, None);

        assert_eq!(with_stale, without);
        assert_eq!(with_stale.pip_value_per_lot, Some(dec!(1000) / dec!(150)));
    }

    #[test]
    fn test_forex_tiny_entry_price_is_degenerate() {
        let tiny = dec!(0.0000000000000000000000000001);
        for symbol in ["USD/JPY", "USD/CHF"] {
            let input = RiskInput::forex(symbol, dec!(10000), dec!(1), dec!(20))
                .with_entry_price(tiny);
            assert_eq!(
                calculate(&input, None),
                Sizing::Degenerate {
                    amount_at_risk: dec!(100)
                }
            );
        }
    }

    #[test]
    fn test_forex_zero_pips_is_degenerate() {
        let input = RiskInput::forex("EUR/USD", dec!(10000), dec!(1), dec!(0));
        assert_eq!(
            calculate(&input, None),
            Sizing::Degenerate {
                amount_at_risk: dec!(100)
            }
        );
    }

    #[test]
    fn test_crypto_distance_sizing() {
        let input = RiskInput::priced(
            AssetClass::Crypto,
            "BTC",
            dec!(10000),
            dec!(1),
            dec!(50000),
            dec!(49000),
        );
        let result = sized(&input, None);

        assert_eq!(result.amount_at_risk, dec!(100));
        assert_eq!(result.position_size_units, dec!(0.1));
        assert_eq!(result.total_position_value, dec!(5000));
        assert_eq!(result.standard_lots, None);
        assert_eq!(result.mini_lots, None);
        assert_eq!(result.micro_lots, None);
    }

    #[test]
    fn test_short_side_stop_uses_absolute_distance() {
        let input = RiskInput::priced(
            AssetClass::Stocks,
            "AAPL",
            dec!(5000),
            dec!(2),
            dec!(100),
            dec!(105),
        );
        let result = sized(&input, None);

        assert_eq!(result.position_size_units, dec!(20));
        assert_eq!(result.total_position_value, dec!(2000));
    }

    #[test]
    fn test_zero_stop_price_is_allowed() {
        let input =
            RiskInput::priced(AssetClass::Stocks, "TSLA", dec!(1000), dec!(10), dec!(50), dec!(0));
        let result = sized(&input, None);

        assert_eq!(result.position_size_units, dec!(2));
    }

    #[test]
    fn test_equal_entry_and_stop_is_degenerate() {
        let input = RiskInput::priced(
            AssetClass::Crypto,
            "ETH",
            dec!(10000),
            dec!(1),
            dec!(3000),
            dec!(3000),
        );
        assert_eq!(
            calculate(&input, None),
            Sizing::Degenerate {
                amount_at_risk: dec!(100)
            }
        );
    }

    #[test]
    fn test_missing_balance_or_risk_is_empty() {
        let mut input = RiskInput::forex("EUR/USD", dec!(10000), dec!(1), dec!(10));
        input.account_balance = None;
        assert_eq!(calculate(&input, None), Sizing::Empty);

        let mut input = RiskInput::forex("EUR/USD", dec!(10000), dec!(1), dec!(10));
        input.risk_percent = Some(dec!(0));
        assert_eq!(calculate(&input, None), Sizing::Empty);
        assert_eq!(calculate(&input, None).amount_at_risk(), dec!(0));
    }

    #[test]
    fn test_mismatched_leg_is_degenerate() {
        let mut input = RiskInput::forex("BTC", dec!(10000), dec!(1), dec!(10));
        input.asset_class = AssetClass::Crypto;
        assert!(!input.is_consistent());
        assert!(matches!(calculate(&input, None), Sizing::Degenerate { .. }));
    }

    #[test]
    fn test_prefill_entry_from_quote() {
        let mut input = RiskInput {
            account_balance: Some(dec!(10000)),
            risk_percent: Some(dec!(1)),
            asset_class: AssetClass::Crypto,
            symbol: "SOL".to_string(),
            leg: SizingLeg::Distance {
                entry_price: None,
                stop_loss_price: Some(dec!(90)),
            },
        };
        input.prefill_entry(&quote("BTC", AssetClass::Crypto, dec!(60000)));
        assert!(matches!(calculate(&input, None), Sizing::Degenerate { .. }));

        input.prefill_entry(&quote("SOL", AssetClass::Crypto, dec!(100)));
        let result = sized(&input, None);
        assert_eq!(result.position_size_units, dec!(10));

        // A user-entered price is not overwritten
        input.prefill_entry(&quote("SOL", AssetClass::Crypto, dec!(120)));
        assert_eq!(sized(&input, None).position_size_units, dec!(10));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let input = RiskInput::forex("USD/CHF", dec!(25000), dec!(1.5), dec!(30));
        let live = quote("USD/CHF", AssetClass::Forex, dec!(0.8825));

        let first = sized(&input, Some(&live));
        let second = sized(&input, Some(&live));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
