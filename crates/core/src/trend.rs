//! Ordinary least-squares trend line over a filtered series.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::join::MergedRow;

/// Day number with 0001-01-01 as day 1.
#[must_use]
pub fn date_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

/// `result = intercept + slope * ordinal`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub intercept: f64,
    /// Change in result per day.
    pub slope: f64,
    /// Set when fewer than two distinct dates were available.
    pub degenerate: bool,
}

impl TrendLine {
    #[must_use]
    pub fn predict(&self, date: NaiveDate) -> f64 {
        self.intercept + self.slope * date_ordinal(date) as f64
    }
}

/// One chart point: the observed value and the trend value on that date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
}

/// Fit `result` on `[1, ordinal]`.
///
/// Returns `None` for an empty series. With a single distinct date the fit
/// is under-determined and the line is flat at the mean.
#[must_use]
pub fn fit_trend(rows: &[MergedRow]) -> Option<TrendLine> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len() as f64;
    let x_mean = rows.iter().map(|r| date_ordinal(r.date) as f64).sum::<f64>() / n;
    let y_mean = rows.iter().map(|r| r.result).sum::<f64>() / n;

    // Centred sums keep precision with ordinals around 7e5.
    let (sxx, sxy) = rows.iter().fold((0.0_f64, 0.0_f64), |(sxx, sxy), r| {
        let dx = date_ordinal(r.date) as f64 - x_mean;
        (sxx + dx * dx, sxy + dx * (r.result - y_mean))
    });

    if sxx == 0.0 {
        return Some(TrendLine { intercept: y_mean, slope: 0.0, degenerate: true });
    }
    let slope = sxy / sxx;
    Some(TrendLine { intercept: y_mean - slope * x_mean, slope, degenerate: false })
}

/// Fit the series and pair every row with its predicted value.
///
/// Output has the same length and order as `rows`.
#[must_use]
pub fn trend_points(rows: &[MergedRow]) -> Vec<TrendPoint> {
    let Some(line) = fit_trend(rows) else {
        return Vec::new();
    };
    rows.iter()
        .map(|r| TrendPoint { date: r.date, actual: r.result, predicted: line.predict(r.date) })
        .collect()
}
