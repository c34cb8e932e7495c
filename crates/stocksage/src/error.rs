//! Error types for stocksage operations

use stocksage_llm::LLMError;
use stocksage_utils::CredentialError;
use thiserror::Error;

/// Errors raised while handling a turn or starting up
#[derive(Debug, Error)]
pub enum StockError {
    /// Completion API failure
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    /// The model asked for a function we do not advertise
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// The model's arguments could not be decoded for the function
    #[error("Invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },

    /// An argument decoded fine but is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Series too short for the requested calculation
    #[error("Not enough data: need {needed} closes, have {available}")]
    InsufficientData { needed: usize, available: usize },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Technical indicator calculation error
    #[error("Technical indicator error: {0}")]
    IndicatorError(String),

    /// Chart drawing failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// The model replied with neither text nor a function call
    #[error("The model returned an empty reply")]
    EmptyReply,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// API credential could not be loaded
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Result type alias for stocksage operations
pub type Result<T> = std::result::Result<T, StockError>;
