// Trend Projector: ordinary least squares on a 0-based monthly time index,
// extrapolated a fixed horizon forward. Strictly a straight line; no
// seasonality, confidence bounds, or outlier handling.
use chrono::Months;
use shared::models::{ForecastPoint, PeriodSales, SalesForecast};
use thiserror::Error;

/// Fixed extrapolation horizon in months.
pub const FORECAST_STEPS: usize = 3;

/// Minimum observed periods before a line is fitted.
pub const MIN_PERIODS: usize = 3;

/// Soft precondition failure: the forecast widget is hidden with this
/// message, nothing else fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Sales forecast needs at least {MIN_PERIODS} observed periods; found {found}")]
pub struct InsufficientHistory {
    pub found: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fits sale ≈ slope·t + intercept over the series re-indexed to
    /// t = 0, 1, 2, ... The series is expected in ascending time order, as
    /// produced by the period aggregation.
    pub fn fit(series: &[PeriodSales]) -> Result<LinearTrend, InsufficientHistory> {
        if series.len() < MIN_PERIODS {
            return Err(InsufficientHistory {
                found: series.len(),
            });
        }

        let n = series.len() as f64;
        let mut sum_t = 0.0;
        let mut sum_y = 0.0;
        let mut sum_ty = 0.0;
        let mut sum_tt = 0.0;
        for (t, point) in series.iter().enumerate() {
            let t = t as f64;
            sum_t += t;
            sum_y += point.sales;
            sum_ty += t * point.sales;
            sum_tt += t * t;
        }

        // The time index is 0..n-1 with n >= 3, so the denominator is
        // strictly positive.
        let slope = (n * sum_ty - sum_t * sum_y) / (n * sum_tt - sum_t * sum_t);
        let intercept = (sum_y - slope * sum_t) / n;
        Ok(LinearTrend { slope, intercept })
    }

    pub fn predict(&self, t: usize) -> f64 {
        self.slope * t as f64 + self.intercept
    }
}

/// Fits the trend and extrapolates `FORECAST_STEPS` months past the last
/// observed period.
pub fn project(series: &[PeriodSales]) -> Result<SalesForecast, InsufficientHistory> {
    let trend = LinearTrend::fit(series)?;
    let last = &series[series.len() - 1];

    let points = (1..=FORECAST_STEPS)
        .map(|step| ForecastPoint {
            period: last.period + Months::new(step as u32),
            predicted_sales: trend.predict(series.len() - 1 + step),
        })
        .collect();

    Ok(SalesForecast {
        slope: trend.slope,
        intercept: trend.intercept,
        points,
    })
}
