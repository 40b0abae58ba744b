//! Core data types.

mod asset;
mod quote;

pub use asset::AssetClass;
pub use quote::{PriceTick, Quote};
