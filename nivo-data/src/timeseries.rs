use crate::buckets::Bucket;
use crate::trend::{fit_linear_trend, timestamp_millis, TrendError, TrendLine};
use chrono::{NaiveDateTime, NaiveTime};
use nivo_core::Observation;
use serde::Serialize;

/// A valid snow reading at its full observation time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimePoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Chronological series of valid snow heights for one station.
pub fn station_time_series(observations: &[Observation], station_id: &str) -> Vec<TimePoint> {
    let mut series: Vec<TimePoint> = observations
        .iter()
        .filter(|obs| obs.station_id == station_id)
        .filter_map(|obs| {
            Some(TimePoint {
                timestamp: obs.timestamp,
                value: obs.snow_height.value()?,
            })
        })
        .collect();
    series.sort_by_key(|p| p.timestamp);
    series
}

pub fn series_trend(series: &[TimePoint]) -> Result<TrendLine, TrendError> {
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|p| (timestamp_millis(p.timestamp), p.value))
        .collect();
    fit_linear_trend(&points)
}

/// Trend over bucket values, each placed at midnight of its start date.
pub fn bucket_trend(buckets: &[Bucket]) -> Result<TrendLine, TrendError> {
    let points: Vec<(f64, f64)> = buckets
        .iter()
        .map(|b| (timestamp_millis(b.start.and_time(NaiveTime::default())), b.value))
        .collect();
    fit_linear_trend(&points)
}
