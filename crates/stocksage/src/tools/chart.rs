//! Price chart rendering

use crate::api::PriceSeries;
use crate::error::{Result, StockError};
use chrono::{DateTime, Utc};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Draws a price series into an image file
pub trait ChartRenderer: Send + Sync {
    /// Render `series` and return the path of the written image
    fn render(&self, series: &PriceSeries) -> Result<PathBuf>;
}

/// Line chart of daily closes written to a fixed PNG path
///
/// The file is overwritten on every call.
#[derive(Debug, Clone)]
pub struct PriceChart {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PriceChart {
    /// Chart writing to `path` at 1000x500 pixels
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            width: 1000,
            height: 500,
        }
    }

    /// Set the image size in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Caption drawn above the chart
pub fn chart_title(symbol: &str) -> String {
    format!("{symbol} stock price over last year")
}

impl ChartRenderer for PriceChart {
    fn render(&self, series: &PriceSeries) -> Result<PathBuf> {
        let points = &series.points;
        if points.len() < 2 {
            return Err(StockError::Chart(format!(
                "need at least 2 closes to draw {}, have {}",
                series.symbol,
                points.len()
            )));
        }

        {
            let root = BitMapBackend::new(&self.path, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| StockError::Chart(format!("Failed to fill canvas: {e}")))?;

            let min_price = points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
            let max_price = points.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max);

            // Pad the price range so the line does not touch the frame
            let padding = (max_price - min_price).max(1e-8) * 0.05;
            let y_range = (min_price - padding).max(0.0)..max_price + padding;
            let x_range = points[0].date..points[points.len() - 1].date;

            let mut chart = ChartBuilder::on(&root)
                .caption(chart_title(&series.symbol), ("sans-serif", 30).into_font())
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(x_range, y_range)
                .map_err(|e| StockError::Chart(format!("Failed to build chart: {e}")))?;

            chart
                .configure_mesh()
                .x_desc("date")
                .y_desc("stock price")
                .x_label_formatter(&|d: &DateTime<Utc>| d.format("%Y-%m").to_string())
                .draw()
                .map_err(|e| StockError::Chart(format!("Failed to draw mesh: {e}")))?;

            chart
                .draw_series(LineSeries::new(points.iter().map(|p| (p.date, p.close)), &BLUE))
                .map_err(|e| StockError::Chart(format!("Failed to draw line: {e}")))?;

            root.present()
                .map_err(|e| StockError::Chart(format!("Failed to render chart: {e}")))?;
        }

        info!(symbol = %series.symbol, path = %self.path.display(), "Chart written");
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PricePoint;
    use chrono::{Duration, TimeZone, Utc};

    fn series(len: usize) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let points = (0..len)
            .map(|i| PricePoint {
                date: start + Duration::days(i as i64),
                close: 150.0 + (i as f64).sin() * 5.0,
            })
            .collect();
        PriceSeries::new("AAPL", points)
    }

    #[test]
    fn test_title() {
        assert_eq!(chart_title("MSFT"), "MSFT stock price over last year");
    }

    #[test]
    fn test_too_few_points() {
        let dir = tempfile::tempdir().unwrap();
        let chart = PriceChart::new(dir.path().join("stock.png"));

        assert!(matches!(chart.render(&series(1)), Err(StockError::Chart(_))));
        assert!(!chart.path().exists());
    }

    #[test]
    fn test_unwritable_path_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("stock.png");
        let chart = PriceChart::new(&target).with_size(200, 100);

        assert!(matches!(chart.render(&series(30)), Err(StockError::Chart(_))));
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    #[ignore] // Needs system fonts for the caption and labels
    fn test_render_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let chart = PriceChart::new(dir.path().join("stock.png")).with_size(400, 200);

        let first = chart.render(&series(30)).unwrap();
        let size_first = std::fs::metadata(&first).unwrap().len();
        let second = chart.render(&series(60)).unwrap();

        assert_eq!(first, second);
        assert!(size_first > 0);
        assert!(std::fs::metadata(&second).unwrap().len() > 0);
    }
}
