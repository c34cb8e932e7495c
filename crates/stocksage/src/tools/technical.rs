//! Technical indicators over a close-price series
//!
//! Every function takes the closes oldest-first and returns the value for the
//! most recent day. None of them fetch data.

use crate::error::{Result, StockError};
use std::fmt;
use ta::{
    Next,
    indicators::{
        ExponentialMovingAverage, MovingAverageConvergenceDivergence, SimpleMovingAverage,
    },
};

/// Largest moving-average window accepted
pub const MAX_WINDOW: usize = 10_000;
/// RSI lookback
pub const RSI_PERIOD: usize = 14;
/// MACD fast EMA span
pub const MACD_FAST: usize = 12;
/// MACD slow EMA span
pub const MACD_SLOW: usize = 26;
/// MACD signal EMA span
pub const MACD_SIGNAL: usize = 9;

/// Latest MACD reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl fmt::Display for MacdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.macd, self.signal, self.histogram)
    }
}

/// Most recent close
pub fn latest_close(closes: &[f64]) -> Result<f64> {
    closes.last().copied().ok_or(StockError::InsufficientData {
        needed: 1,
        available: 0,
    })
}

/// Simple moving average of the last `window` closes
pub fn sma(closes: &[f64], window: usize) -> Result<f64> {
    check_window("SMA", window)?;
    if window > closes.len() {
        return Err(StockError::InsufficientData {
            needed: window,
            available: closes.len(),
        });
    }

    let mut sma = SimpleMovingAverage::new(window)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;

    let mut latest = 0.0;
    for &close in &closes[closes.len() - window..] {
        latest = sma.next(close);
    }
    Ok(latest)
}

/// Exponential moving average with span `window`
///
/// Smoothing factor is `2 / (window + 1)`, seeded with the first close.
pub fn ema(closes: &[f64], window: usize) -> Result<f64> {
    check_window("EMA", window)?;

    let mut ema = ExponentialMovingAverage::new(window)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;

    let mut latest = None;
    for &close in closes {
        latest = Some(ema.next(close));
    }

    latest.ok_or(StockError::InsufficientData {
        needed: 1,
        available: 0,
    })
}

fn check_window(indicator: &str, window: usize) -> Result<()> {
    if window == 0 || window > MAX_WINDOW {
        return Err(StockError::InvalidArgument(format!(
            "{indicator} window must be between 1 and {MAX_WINDOW}, got {window}"
        )));
    }
    Ok(())
}

/// 14-period relative strength index
///
/// Gains and losses are smoothed with alpha `1/14` (centre of mass 13), which
/// is an EMA of span 27. A series with no losses reads 100; a flat series
/// reads 50.
pub fn rsi(closes: &[f64]) -> Result<f64> {
    if closes.len() < 2 {
        return Err(StockError::InsufficientData {
            needed: 2,
            available: closes.len(),
        });
    }

    let span = 2 * (RSI_PERIOD - 1) + 1;
    let mut avg_gain = ExponentialMovingAverage::new(span)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;
    let mut avg_loss = ExponentialMovingAverage::new(span)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;

    let (mut gain, mut loss) = (0.0, 0.0);
    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        gain = avg_gain.next(delta.max(0.0));
        loss = avg_loss.next((-delta).max(0.0));
    }

    Ok(rsi_from_averages(gain, loss))
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// MACD(12, 26, 9): line, signal and histogram for the latest close
pub fn macd(closes: &[f64]) -> Result<MacdValue> {
    let mut indicator = MovingAverageConvergenceDivergence::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;

    let mut latest = None;
    for &close in closes {
        let out = indicator.next(close);
        latest = Some(MacdValue {
            macd: out.macd,
            signal: out.signal,
            histogram: out.histogram,
        });
    }

    latest.ok_or(StockError::InsufficientData {
        needed: 1,
        available: 0,
    })
}

/// Render an indicator value the way it is handed back to the model
pub fn format_value(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn closes() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64, 46.21, 46.25, 45.71, 46.45,
            45.78, 45.35, 44.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ]
    }

    /// Straightforward recursive EMA used as the reference
    fn reference_ema(values: &[f64], alpha: f64) -> Vec<f64> {
        let mut out = Vec::with_capacity(values.len());
        let mut current = values[0];
        out.push(current);
        for &v in &values[1..] {
            current = alpha * v + (1.0 - alpha) * current;
            out.push(current);
        }
        out
    }

    #[test]
    fn test_latest_close() {
        assert_eq!(latest_close(&[1.0, 2.0, 3.5]).unwrap(), 3.5);
        assert!(matches!(
            latest_close(&[]),
            Err(StockError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_sma_is_mean_of_tail() {
        let data = closes();
        let expected = data[data.len() - 5..].iter().sum::<f64>() / 5.0;
        assert!((sma(&data, 5).unwrap() - expected).abs() < EPS);
        assert!((sma(&data, data.len()).unwrap() - data.iter().sum::<f64>() / data.len() as f64).abs() < EPS);
        assert_eq!(sma(&[2.0], 1).unwrap(), 2.0);
    }

    #[test]
    fn test_sma_window_bounds() {
        let data = closes();
        assert!(matches!(sma(&data, 0), Err(StockError::InvalidArgument(_))));
        assert!(matches!(
            sma(&data, data.len() + 1),
            Err(StockError::InsufficientData { needed, available })
                if needed == data.len() + 1 && available == data.len()
        ));
    }

    #[test]
    fn test_ema_matches_recursive_formula() {
        let data = closes();
        for window in [1, 5, 10, 20] {
            let alpha = 2.0 / (window as f64 + 1.0);
            let expected = *reference_ema(&data, alpha).last().unwrap();
            assert!((ema(&data, window).unwrap() - expected).abs() < EPS, "window {window}");
        }
    }

    #[test]
    fn test_ema_edge_cases() {
        assert!(matches!(ema(&[1.0], 0), Err(StockError::InvalidArgument(_))));
        assert!(matches!(ema(&[], 3), Err(StockError::InsufficientData { .. })));
        assert_eq!(ema(&[7.0], 30).unwrap(), 7.0);
    }

    #[test]
    fn test_huge_windows_are_rejected() {
        let data = closes();
        for window in [MAX_WINDOW + 1, usize::MAX] {
            assert!(matches!(ema(&data, window), Err(StockError::InvalidArgument(_))));
            assert!(matches!(sma(&data, window), Err(StockError::InvalidArgument(_))));
        }
        assert!(ema(&data, MAX_WINDOW).is_ok());
    }

    #[test]
    fn test_rsi_matches_reference() {
        let data = closes();
        let deltas: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();
        let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
        let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();
        let alpha = 1.0 / RSI_PERIOD as f64;
        let g = *reference_ema(&gains, alpha).last().unwrap();
        let l = *reference_ema(&losses, alpha).last().unwrap();
        let expected = 100.0 - 100.0 / (1.0 + g / l);

        let value = rsi(&data).unwrap();
        assert!((value - expected).abs() < 1e-6);
        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn test_rsi_bounds() {
        let rising: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i)).collect();
        assert_eq!(rsi(&rising).unwrap(), 100.0);

        let falling: Vec<f64> = (0..40).map(|i| 100.0 - f64::from(i)).collect();
        assert!(rsi(&falling).unwrap().abs() < EPS);

        let flat = vec![50.0; 20];
        assert_eq!(rsi(&flat).unwrap(), 50.0);

        let zigzag: Vec<f64> = (0..60)
            .map(|i| if i % 2 == 0 { 10.0 } else { 10.5 + f64::from(i) * 0.01 })
            .collect();
        let value = rsi(&zigzag).unwrap();
        assert!(value > 0.0 && value < 100.0);
    }

    #[test]
    fn test_rsi_approaches_100_as_losses_vanish() {
        // One early loss followed by a run of gains; the loss decays away
        let with_gains = |run: i32| {
            let mut data = vec![100.0, 99.0];
            data.extend((1..=run).map(|i| 99.0 + f64::from(i)));
            rsi(&data).unwrap()
        };

        let short = with_gains(10);
        let long = with_gains(120);
        assert!(short < long);
        assert!(long < 100.0);
        assert!(long > 99.0);
    }

    #[test]
    fn test_rsi_needs_two_closes() {
        assert!(matches!(
            rsi(&[1.0]),
            Err(StockError::InsufficientData { needed: 2, available: 1 })
        ));
    }

    #[test]
    fn test_macd_histogram_identity() {
        let data = closes();
        let value = macd(&data).unwrap();
        assert_eq!(value.histogram, value.macd - value.signal);

        let fast = *reference_ema(&data, 2.0 / 13.0).last().unwrap();
        let slow = *reference_ema(&data, 2.0 / 27.0).last().unwrap();
        assert!((value.macd - (fast - slow)).abs() < EPS);
    }

    #[test]
    fn test_macd_signal_is_ema_of_line() {
        let data = closes();
        let fast = reference_ema(&data, 2.0 / 13.0);
        let slow = reference_ema(&data, 2.0 / 27.0);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = *reference_ema(&line, 2.0 / 10.0).last().unwrap();

        assert!((macd(&data).unwrap().signal - signal).abs() < EPS);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_value(189.5), "189.5");
        let value = MacdValue {
            macd: 1.5,
            signal: 1.0,
            histogram: 0.5,
        };
        assert_eq!(value.to_string(), "1.5, 1, 0.5");
    }
}
