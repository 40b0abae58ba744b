//! Closed-form trading calculators.
//!
//! Invalid inputs produce zero rather than an error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "Long"),
            Direction::Short => write!(f, "Short"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(Direction::Long),
            "short" | "sell" => Ok(Direction::Short),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// Value of one pip in the account currency: `(pip / rate) × units`.
pub fn pip_value(exchange_rate: Decimal, units: Decimal, pip_size: Decimal) -> Decimal {
    if exchange_rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    pip_size
        .checked_div(exchange_rate)
        .and_then(|per_unit| per_unit.checked_mul(units))
        .unwrap_or(Decimal::ZERO)
}

/// Margin required to open `units` at `price` with `leverage`:1.
pub fn required_margin(price: Decimal, units: Decimal, leverage: Decimal) -> Decimal {
    if leverage <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    units
        .checked_mul(price)
        .and_then(|notional| notional.checked_div(leverage))
        .unwrap_or(Decimal::ZERO)
}

/// Profit or loss of a closed trade.
pub fn profit(open: Decimal, close: Decimal, units: Decimal, direction: Direction) -> Decimal {
    if units <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let move_per_unit = match direction {
        Direction::Long => close.checked_sub(open),
        Direction::Short => open.checked_sub(close),
    };
    move_per_unit
        .and_then(|m| m.checked_mul(units))
        .unwrap_or(Decimal::ZERO)
}

/// Result of compounding a fixed gain over several periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compounding {
    pub final_balance: Decimal,
    pub total_profit: Decimal,
}

/// Compound `principal` by `gain_percent` per period.
///
/// Stops early once the balance can no longer change (zero gain or a zero
/// balance); overflow yields the zero result.
pub fn compound(principal: Decimal, gain_percent: Decimal, periods: u32) -> Compounding {
    if periods == 0 {
        return Compounding::default();
    }

    let Some(factor) = (gain_percent / dec!(100)).checked_add(dec!(1)) else {
        return Compounding::default();
    };
    let mut balance = principal;
    if factor != dec!(1) {
        for _ in 0..periods {
            if balance.is_zero() {
                break;
            }
            match balance.checked_mul(factor) {
                Some(next) => balance = next,
                None => return Compounding::default(),
            }
        }
    }

    match balance.checked_sub(principal) {
        Some(total_profit) => Compounding {
            final_balance: balance,
            total_profit,
        },
        None => Compounding::default(),
    }
}

/// Peak-to-trough decline in percent.
pub fn drawdown_percent(peak: Decimal, trough: Decimal) -> Decimal {
    if peak <= Decimal::ZERO || trough >= peak {
        return Decimal::ZERO;
    }
    peak.checked_sub(trough)
        .and_then(|decline| decline.checked_div(peak))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(Decimal::ZERO)
}

/// Convert `amount` at `rate`.
pub fn convert(amount: Decimal, rate: Decimal) -> Decimal {
    amount.checked_mul(rate).unwrap_or(Decimal::ZERO)
}
