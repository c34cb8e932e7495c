//! Conversational stock indicators
//!
//! `stocksage` answers questions such as "what's Apple's RSI?" by letting a
//! chat-completion model pick one of a fixed set of functions, computing the
//! value locally from a year of daily closes, and handing the value back to
//! the model for a natural-language answer.
//!
//! - [`api`]: market data acquisition (Yahoo Finance)
//! - [`tools`]: indicator math, chart rendering, and the function registry
//! - [`bot`]: the conversation state and the per-turn orchestrator
//! - [`config`]: runtime configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use stocksage::{Conversation, PriceChart, SageConfig, StockBot, YahooFinanceClient};
//! use stocksage_llm::providers::OpenAIProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SageConfig::builder().with_env().build()?;
//!     let bot = StockBot::new(
//!         Arc::new(OpenAIProvider::with_config(config.openai_config())?),
//!         Arc::new(YahooFinanceClient::new(config.lookback_days)),
//!         Arc::new(PriceChart::new(&config.chart_path)),
//!         &config,
//!     );
//!
//!     let mut conversation = Conversation::new();
//!     let reply = bot.handle_turn(&mut conversation, "What's Apple's current price?").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod tools;

// Re-export main types for convenience
pub use api::{MarketData, PricePoint, PriceSeries, YahooFinanceClient};
pub use bot::{Conversation, Reply, StockBot};
pub use config::SageConfig;
pub use error::{Result, StockError};
pub use tools::{ChartRenderer, PriceChart, StockFunction};
