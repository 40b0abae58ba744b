//! Forex pip economics.
//!
//! Pip values are approximated from the shape of the pair symbol rather than
//! looked up from live cross rates. USD-quoted pairs and USD/JPY are exact for
//! a USD account; other crosses fall back to fixed values.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Units in one standard lot.
pub const STANDARD_LOT_UNITS: Decimal = dec!(100000);

/// Pip value of one standard lot of a USD-quoted pair, in USD.
pub const USD_QUOTED_PIP_VALUE: Decimal = dec!(10);

/// USD/JPY rate assumed for JPY crosses when no price is available.
pub const FALLBACK_USDJPY_RATE: Decimal = dec!(150);

const JPY_PIP_SIZE: Decimal = dec!(0.01);
const DEFAULT_PIP_SIZE: Decimal = dec!(0.0001);

/// Smallest standard price increment for the pair.
pub fn pip_size(symbol: &str) -> Decimal {
    if symbol.contains("JPY") {
        JPY_PIP_SIZE
    } else {
        DEFAULT_PIP_SIZE
    }
}

/// Approximate USD value of one pip on one standard lot.
///
/// `price` is the pair's current rate (entry override or live), used only
/// for USD/JPY and USD-based pairs. `None` when the price is so small that
/// the value overflows.
pub fn pip_value_per_standard_lot(symbol: &str, price: Option<Decimal>) -> Option<Decimal> {
    let price = price.filter(|p| *p > Decimal::ZERO);

    if symbol.ends_with("USD") {
        Some(USD_QUOTED_PIP_VALUE)
    } else if symbol.contains("JPY") {
        // 1000 JPY per pip on a standard lot, converted to USD
        match price {
            Some(p) if symbol == "USD/JPY" => dec!(1000).checked_div(p),
            _ => dec!(1000).checked_div(FALLBACK_USDJPY_RATE),
        }
    } else if symbol.starts_with("USD") {
        match price {
            Some(p) => USD_QUOTED_PIP_VALUE.checked_div(p),
            None => Some(USD_QUOTED_PIP_VALUE),
        }
    } else {
        // Non-USD, non-JPY crosses: not modelled
        Some(USD_QUOTED_PIP_VALUE)
    }
}

/// Stop-loss price `pips` below `current` (long side).
pub fn stop_price_from_pips(current: Decimal, pips: Decimal, symbol: &str) -> Option<Decimal> {
    current.checked_sub(pips.checked_mul(pip_size(symbol))?)
}

/// Whole pips between `current` and a stop-loss price.
pub fn pips_from_stop_price(
    current: Decimal,
    stop_price: Decimal,
    symbol: &str,
) -> Option<Decimal> {
    let distance = current.checked_sub(stop_price)?.abs();
    Some(
        distance
            .checked_div(pip_size(symbol))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pip_size() {
        assert_eq!(pip_size("EUR/USD"), dec!(0.0001));
        assert_eq!(pip_size("USD/JPY"), dec!(0.01));
        assert_eq!(pip_size("GBP/JPY"), dec!(0.01));
    }

    #[test]
    fn test_pip_value_usd_quoted() {
        assert_eq!(pip_value_per_standard_lot("EUR/USD", None), Some(dec!(10)));
        assert_eq!(pip_value_per_standard_lot("XAU/USD", Some(dec!(2300))), Some(dec!(10)));
    }

    #[test]
    fn test_pip_value_usdjpy_uses_price() {
        let value = pip_value_per_standard_lot("USD/JPY", Some(dec!(125)));
        assert_eq!(value, Some(dec!(8)));
    }

    #[test]
    fn test_pip_value_jpy_cross_uses_fallback() {
        let fallback = dec!(1000) / dec!(150);
        assert_eq!(pip_value_per_standard_lot("EUR/JPY", Some(dec!(160))), Some(fallback));
        assert_eq!(pip_value_per_standard_lot("USD/JPY", None), Some(fallback));
    }

    #[test]
    fn test_pip_value_usd_base() {
        assert_eq!(pip_value_per_standard_lot("USD/CHF", Some(dec!(0.8))), Some(dec!(12.5)));
        assert_eq!(pip_value_per_standard_lot("USD/CAD", None), Some(dec!(10)));
    }

    #[test]
    fn test_pip_value_other_cross_defaults() {
        assert_eq!(pip_value_per_standard_lot("EUR/GBP", Some(dec!(0.85))), Some(dec!(10)));
    }

    #[test]
    fn test_stop_price_and_pips() {
        let stop = stop_price_from_pips(dec!(1.1000), dec!(25), "EUR/USD").unwrap();
        assert_eq!(stop, dec!(1.0975));
        assert_eq!(pips_from_stop_price(dec!(1.1000), stop, "EUR/USD"), Some(dec!(25)));

        let stop = stop_price_from_pips(dec!(150.00), dec!(40), "USD/JPY").unwrap();
        assert_eq!(stop, dec!(149.60));
        assert_eq!(
            pips_from_stop_price(dec!(150.00), dec!(149.596), "USD/JPY"),
            Some(dec!(40))
        );
        assert_eq!(
            pips_from_stop_price(dec!(1.1000), dec!(1.09995), "EUR/USD"),
            Some(dec!(1))
        );
    }

    #[test]
    fn test_tiny_price_overflows_to_none() {
        let tiny = dec!(0.0000000000000000000000000001);
        assert_eq!(pip_value_per_standard_lot("USD/JPY", Some(tiny)), None);
        assert_eq!(pip_value_per_standard_lot("USD/CHF", Some(tiny)), None);
        assert_eq!(pip_value_per_standard_lot("EUR/USD", Some(tiny)), Some(dec!(10)));
    }

    #[test]
    fn test_stop_translation_overflow_is_none() {
        assert_eq!(stop_price_from_pips(Decimal::MIN, Decimal::MAX, "EUR/USD"), None);
        assert_eq!(pips_from_stop_price(Decimal::MAX, Decimal::MIN, "EUR/USD"), None);
    }
}
