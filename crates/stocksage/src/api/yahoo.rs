//! Yahoo Finance API client

use crate::error::{Result, StockError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

/// One daily close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub close: f64,
}

/// Daily closes for one symbol, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series; points are sorted by date
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    /// Close prices in date order
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent point
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Source of daily close history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the trailing daily history for `symbol`
    ///
    /// Every call goes to the provider; nothing is cached. An empty result
    /// is reported as [`StockError::DataUnavailable`].
    async fn daily_history(&self, symbol: &str) -> Result<PriceSeries>;
}

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    lookback_days: i64,
}

impl YahooFinanceClient {
    /// Create a client that fetches `lookback_days` of history per call
    pub fn new(lookback_days: i64) -> Self {
        Self { lookback_days }
    }

    /// Get historical daily quotes between two instants
    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| StockError::YahooFinanceError(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| StockError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        quotes
            .iter()
            .map(|q| quote_point(q.timestamp as i64, q.close))
            .collect()
    }
}

fn quote_point(timestamp: i64, close: f64) -> Result<PricePoint> {
    let date = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        StockError::YahooFinanceError(format!("Quote timestamp out of range: {timestamp}"))
    })?;
    Ok(PricePoint { date, close })
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LOOKBACK_DAYS)
    }
}

#[async_trait]
impl MarketData for YahooFinanceClient {
    #[instrument(skip(self), fields(lookback_days = self.lookback_days))]
    async fn daily_history(&self, symbol: &str) -> Result<PriceSeries> {
        let end = Utc::now();
        let start = end - chrono::Duration::days(self.lookback_days);

        let points = self.get_historical_quotes(symbol, start, end).await?;
        if points.is_empty() {
            return Err(StockError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "No historical data available".to_string(),
            });
        }

        debug!(points = points.len(), "Fetched daily history");
        Ok(PriceSeries::new(symbol, points))
    }
}
