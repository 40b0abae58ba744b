//! Core types and traits for riskdesk.
//!
//! This crate provides the foundational building blocks including:
//! - Asset classes and the built-in instrument catalog
//! - Live quotes as returned by upstream price providers
//! - Traits for quote providers and clocks

pub mod error;
pub mod traits;
pub mod types;

pub use error::{QuoteError, RiskdeskError};
pub use traits::*;
pub use types::*;
