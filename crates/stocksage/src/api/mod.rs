//! Market data acquisition
//!
//! Calculations never fetch data themselves; the orchestrator asks a
//! [`MarketData`] implementation for a [`PriceSeries`] and hands the closes
//! to the indicator functions.

pub mod yahoo;

pub use yahoo::{MarketData, PricePoint, PriceSeries, YahooFinanceClient};
