//! Calculations, charting, and the function registry

pub mod chart;
pub mod registry;
pub mod technical;

pub use chart::{ChartRenderer, PriceChart};
pub use registry::StockFunction;
pub use technical::MacdValue;
