//! Stateful calculator session.
//!
//! Keeps the last displayed result so that a degenerate stop (zero pips or
//! zero distance) can be resolved by an explicit policy.

use riskdesk_core::types::{AssetClass, Quote};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::position_size::{calculate, RiskInput, RiskResult, Sizing};

/// What to show when the stop-loss leaves nothing to size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateStopPolicy {
    /// Zero the sizing fields, keep the refreshed amount at risk.
    #[default]
    Reset,
    /// Keep the previous sizing fields of the same instrument, refresh the
    /// amount at risk.
    HoldLast,
}

/// Calculator that recomputes on every input change.
#[derive(Debug, Clone, Default)]
pub struct RiskCalculator {
    policy: DegenerateStopPolicy,
    last: RiskResult,
    // Instrument `last` was sized for; sizing is never held across instruments
    sized_for: Option<(AssetClass, String)>,
}

impl RiskCalculator {
    /// Create a new calculator session.
    pub fn new(policy: DegenerateStopPolicy) -> Self {
        Self {
            policy,
            last: RiskResult::zero(),
            sized_for: None,
        }
    }

    /// Policy in effect.
    pub fn policy(&self) -> DegenerateStopPolicy {
        self.policy
    }

    /// Recompute from the current input and latest quote.
    pub fn update(&mut self, input: &RiskInput, quote: Option<&Quote>) -> &RiskResult {
        match calculate(input, quote) {
            Sizing::Empty => {
                self.last = RiskResult::zero();
                self.sized_for = None;
            }
            Sizing::Sized(result) => {
                self.last = result;
                self.sized_for = Some((input.asset_class, input.symbol.clone()));
            }
            Sizing::Degenerate { amount_at_risk } => {
                debug!(symbol = %input.symbol, policy = ?self.policy, "Stop-loss not usable");
                if self.policy == DegenerateStopPolicy::HoldLast && self.holds(input) {
                    self.last.amount_at_risk = amount_at_risk;
                } else {
                    self.last = RiskResult::risk_only(amount_at_risk);
                    self.sized_for = None;
                }
            }
        }
        &self.last
    }

    fn holds(&self, input: &RiskInput) -> bool {
        self.sized_for
            .as_ref()
            .is_some_and(|(class, symbol)| *class == input.asset_class && *symbol == input.symbol)
    }
}
