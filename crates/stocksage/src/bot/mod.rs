//! Conversation orchestration
//!
//! One call to [`StockBot::handle_turn`] processes one line of user input:
//!
//! 1. Append the user message and ask the model, advertising every
//!    [`StockFunction`].
//! 2. If the model answers in text, record and return it.
//! 3. If it asks for a function, decode the call, fetch the price history
//!    and run the function. A chart is returned as-is. Any other result is
//!    appended as a `function` message and the model is asked again, without
//!    functions, for the final answer.
//!
//! Errors abort the turn. Messages appended before the failure stay in the
//! history.

pub mod conversation;

use crate::api::MarketData;
use crate::config::SageConfig;
use crate::error::{Result, StockError};
use crate::tools::technical::{self, format_value};
use crate::tools::{ChartRenderer, StockFunction};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use stocksage_llm::{CompletionRequest, FunctionCallMode, LLMProvider, Message};
use tracing::{debug, info, instrument};

pub use conversation::Conversation;

/// What a turn produced for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Blank input; nothing was sent
    Empty,
    /// Natural-language answer
    Text(String),
    /// Chart image written to `path`
    Chart { ticker: String, path: PathBuf },
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Chart { path, .. } => write!(f, "chart saved to {}", path.display()),
        }
    }
}

/// Stock question answering over a function-calling model
pub struct StockBot {
    provider: Arc<dyn LLMProvider>,
    market: Arc<dyn MarketData>,
    chart: Arc<dyn ChartRenderer>,
    model: String,
    temperature: Option<f32>,
}

impl StockBot {
    /// Create a bot from its collaborators
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        market: Arc<dyn MarketData>,
        chart: Arc<dyn ChartRenderer>,
        config: &SageConfig,
    ) -> Self {
        Self {
            provider,
            market,
            chart,
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// Model used for completions
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Process one line of user input against `conversation`
    #[instrument(skip(self, conversation, input), fields(history = conversation.len()))]
    pub async fn handle_turn(&self, conversation: &mut Conversation, input: &str) -> Result<Reply> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Reply::Empty);
        }

        conversation.push(Message::user(input));

        let request = CompletionRequest::builder(&self.model)
            .messages(conversation.messages().to_vec())
            .functions(StockFunction::definitions(), FunctionCallMode::Auto)
            .temperature(self.temperature)
            .build();
        let response = self.provider.complete(request).await?;
        debug!(stop_reason = ?response.stop_reason, tokens = response.usage.total(), "First completion");

        let message = response.message;
        let Some(call) = message.function_call.as_ref() else {
            let text = reply_text(&message)?;
            conversation.push(Message::assistant(text.clone()));
            return Ok(Reply::Text(text));
        };

        let function = StockFunction::from_call(&call.name, &call.arguments)?;
        info!(function = function.name(), ticker = function.ticker(), "Dispatching function call");

        let series = self.market.daily_history(function.ticker()).await?;
        let closes = series.closes();

        let result = match &function {
            StockFunction::PlotStockPrice { ticker } => {
                let path = self.chart.render(&series)?;
                return Ok(Reply::Chart {
                    ticker: ticker.clone(),
                    path,
                });
            }
            StockFunction::GetStockPrice { .. } => format_value(technical::latest_close(&closes)?),
            StockFunction::CalculateSma { window, .. } => format_value(technical::sma(&closes, *window)?),
            StockFunction::CalculateEma { window, .. } => format_value(technical::ema(&closes, *window)?),
            StockFunction::CalculateRsi { .. } => format_value(technical::rsi(&closes)?),
            StockFunction::CalculateMacd { .. } => technical::macd(&closes)?.to_string(),
        };
        debug!(function = function.name(), %result, "Function result");

        conversation.push(message);
        conversation.push(Message::function_result(function.name(), result));

        let follow_up = CompletionRequest::builder(&self.model)
            .messages(conversation.messages().to_vec())
            .temperature(self.temperature)
            .build();
        let response = self.provider.complete(follow_up).await?;
        debug!(stop_reason = ?response.stop_reason, tokens = response.usage.total(), "Follow-up completion");

        let text = reply_text(&response.message)?;
        conversation.push(Message::assistant(text.clone()));
        Ok(Reply::Text(text))
    }
}

fn reply_text(message: &Message) -> Result<String> {
    message
        .text()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .ok_or(StockError::EmptyReply)
}
