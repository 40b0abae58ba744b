//! Core traits.

mod clock;
mod quote_provider;

pub use clock::{Clock, ManualClock, SystemClock};
pub use quote_provider::QuoteProvider;
