//! Position sizing and trading calculators.
//!
//! Provides the risk-based position sizer, forex pip economics, and the
//! closed-form pip, margin, profit, compounding and drawdown calculators.

mod calculator;
pub mod forex;
mod parse;
mod position_size;
pub mod tools;

pub use calculator::{DegenerateStopPolicy, RiskCalculator};
pub use parse::parse_amount;
pub use position_size::{amount_at_risk, calculate, RiskInput, RiskResult, Sizing, SizingLeg};
pub use tools::{Compounding, Direction};
