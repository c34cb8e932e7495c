//! The functions advertised to the model
//!
//! [`StockFunction`] is the closed set of operations the model may request.
//! Decoding goes through serde, so each variant's argument shape is checked
//! when the call is parsed rather than at dispatch time.

use crate::error::{Result, StockError};
use crate::tools::technical::MAX_WINDOW;
use serde::{Deserialize, Deserializer, de};
use serde_json::{Value, json};
use stocksage_llm::FunctionDefinition;
use stocksage_llm::functions::schema;

const TICKER_DESCRIPTION: &str =
    "the stock ticker symbol for a company (aapl for apple). note : fb is renamed to meta.";

/// An operation the model asked for, with decoded arguments
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum StockFunction {
    /// Latest close
    GetStockPrice {
        #[serde(deserialize_with = "de_ticker")]
        ticker: String,
    },
    /// Simple moving average over `window` closes
    CalculateSma {
        #[serde(deserialize_with = "de_ticker")]
        ticker: String,
        #[serde(deserialize_with = "de_window")]
        window: usize,
    },
    /// Exponential moving average with span `window`
    CalculateEma {
        #[serde(deserialize_with = "de_ticker")]
        ticker: String,
        #[serde(deserialize_with = "de_window")]
        window: usize,
    },
    /// 14-period RSI
    CalculateRsi {
        #[serde(deserialize_with = "de_ticker")]
        ticker: String,
    },
    /// MACD(12, 26, 9)
    CalculateMacd {
        #[serde(deserialize_with = "de_ticker")]
        ticker: String,
    },
    /// One-year price chart
    PlotStockPrice {
        #[serde(deserialize_with = "de_ticker")]
        ticker: String,
    },
}

impl StockFunction {
    /// Wire names of every function, in advertising order
    pub const NAMES: [&'static str; 6] = [
        "get_stock_price",
        "calculate_sma",
        "calculate_ema",
        "calculate_rsi",
        "calculate_macd",
        "plot_stock_price",
    ];

    /// Decode the model's function-call decision
    ///
    /// `arguments` is the JSON text the model produced. Arguments the
    /// function does not declare are ignored.
    pub fn from_call(name: &str, arguments: &str) -> Result<Self> {
        if !Self::NAMES.contains(&name) {
            return Err(StockError::UnknownFunction(name.to_string()));
        }

        let invalid = |reason: String| StockError::InvalidArguments {
            function: name.to_string(),
            reason,
        };

        let arguments: Value = serde_json::from_str(arguments).map_err(|e| invalid(e.to_string()))?;
        serde_json::from_value(json!({ "name": name, "arguments": arguments }))
            .map_err(|e| invalid(e.to_string()))
    }

    /// Wire name of this function
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetStockPrice { .. } => "get_stock_price",
            Self::CalculateSma { .. } => "calculate_sma",
            Self::CalculateEma { .. } => "calculate_ema",
            Self::CalculateRsi { .. } => "calculate_rsi",
            Self::CalculateMacd { .. } => "calculate_macd",
            Self::PlotStockPrice { .. } => "plot_stock_price",
        }
    }

    /// Ticker the function operates on, normalized to upper case
    pub fn ticker(&self) -> &str {
        match self {
            Self::GetStockPrice { ticker }
            | Self::CalculateSma { ticker, .. }
            | Self::CalculateEma { ticker, .. }
            | Self::CalculateRsi { ticker }
            | Self::CalculateMacd { ticker }
            | Self::PlotStockPrice { ticker } => ticker,
        }
    }

    /// Schemas for every function, sent with the first completion of a turn
    pub fn definitions() -> Vec<FunctionDefinition> {
        let ticker_only = || schema::object(json!({ "ticker": schema::string(TICKER_DESCRIPTION) }), &["ticker"]);
        let with_window = |what: &str| {
            schema::object(
                json!({
                    "ticker": schema::string(TICKER_DESCRIPTION),
                    "window": schema::integer(&format!("the timeframe to consider when calculating {what}")),
                }),
                &["ticker", "window"],
            )
        };

        vec![
            FunctionDefinition::new(
                "get_stock_price",
                "gets the latest stock price given the ticker symbol of a company.",
                ticker_only(),
            ),
            FunctionDefinition::new(
                "calculate_sma",
                "calculate the simple moving average for a given stock ticker and a window.",
                with_window("sma"),
            ),
            FunctionDefinition::new(
                "calculate_ema",
                "calculate the exponential moving average for a given stock ticker and a window.",
                with_window("the ema"),
            ),
            FunctionDefinition::new(
                "calculate_rsi",
                "calculate the rsi for a given stock ticker.",
                ticker_only(),
            ),
            FunctionDefinition::new(
                "calculate_macd",
                "calculate the macd for a given stock ticker.",
                ticker_only(),
            ),
            FunctionDefinition::new(
                "plot_stock_price",
                "plot the stock price for the last year given the ticker symbol of a company.",
                ticker_only(),
            ),
        ]
    }
}

fn de_ticker<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(de::Error::custom("ticker must not be empty"));
    }
    Ok(ticker)
}

/// Accepts `20`, `20.0` or `"20"`, up to [`MAX_WINDOW`]
fn de_window<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<usize, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let window = match &value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= MAX_WINDOW as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    window
        .and_then(|w| usize::try_from(w).ok())
        .filter(|w| *w <= MAX_WINDOW)
        .ok_or_else(|| {
            de::Error::custom(format!(
                "window must be an integer between 0 and {MAX_WINDOW}, got {value}"
            ))
        })
}
