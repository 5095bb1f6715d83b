//! Calendar bucketing of an altitude-filtered observation sequence.

use crate::reduce::{Accumulator, ReductionMode};
use chrono::{Datelike, Duration, NaiveDate};
use nivo_core::Observation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar granularity of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl Precision {
    /// Next precision in the day -> week -> month -> year cycle.
    pub fn next(self) -> Precision {
        match self {
            Precision::Day => Precision::Week,
            Precision::Week => Precision::Month,
            Precision::Month => Precision::Year,
            Precision::Year => Precision::Day,
        }
    }

    /// First day of the bucket containing `date`. Weeks start on Sunday.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Precision::Day => date,
            Precision::Week => {
                date - Duration::days(date.weekday().num_days_from_sunday() as i64)
            }
            Precision::Month => date.with_day(1).unwrap_or(date),
            Precision::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }
}

/// One non-empty calendar bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Bucket {
    pub start: NaiveDate,
    pub value: f64,
    /// Number of valid readings reduced into `value`
    pub count: usize,
}

/// Group valid snow readings into calendar buckets and reduce each bucket.
///
/// Buckets come back in chronological order. Buckets without a valid reading
/// are omitted, so consecutive buckets are not necessarily adjacent.
pub fn bucket_by_time_precision(
    observations: &[Observation],
    precision: Precision,
    mode: ReductionMode,
) -> Vec<Bucket> {
    let mut buckets: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for obs in observations {
        if let Some(snow) = obs.snow_height.value() {
            buckets
                .entry(precision.bucket_start(obs.date()))
                .or_default()
                .push(snow);
        }
    }
    buckets
        .into_iter()
        .filter_map(|(start, acc)| {
            Some(Bucket {
                start,
                value: acc.reduce(mode)?,
                count: acc.count(),
            })
        })
        .collect()
}
