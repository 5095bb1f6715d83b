//! Least-squares trend line for time series overlays.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TrendError {
    /// Fewer than two points, or every point shares the same x
    #[error("insufficient variance for trend fit ({points} points)")]
    InsufficientVariance { points: usize },
}

/// y = slope * x + intercept
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares from the sums of x, y, xy and x².
///
/// x values are shifted by the first x before summing so that millisecond
/// timestamps do not lose precision in x²; the intercept is translated back.
pub fn fit_linear_trend(points: &[(f64, f64)]) -> Result<TrendLine, TrendError> {
    let n = points.len();
    let Some(&(origin, _)) = points.first() else {
        return Err(TrendError::InsufficientVariance { points: 0 });
    };

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in points {
        let x = x - origin;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let n_f = n as f64;
    let denominator = n_f * sum_x2 - sum_x * sum_x;
    if n < 2 || !denominator.is_finite() || denominator <= 0.0 {
        return Err(TrendError::InsufficientVariance { points: n });
    }
    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    let shifted_intercept = (sum_y - slope * sum_x) / n_f;
    Ok(TrendLine {
        slope,
        intercept: shifted_intercept - slope * origin,
    })
}

/// Milliseconds since the Unix epoch, the x axis of every time series.
pub fn timestamp_millis(timestamp: NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp_millis() as f64
}
