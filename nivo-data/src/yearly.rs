//! Per-year, per-station reduction of snow heights.
//!
//! The year key is the calendar year of the observation (the first four
//! digits of the nivo `date` column). A (year, station) pair exists in the
//! output only when the station is known and has at least one valid snow
//! reading that year; missing or unparseable readings never default to zero.

use crate::reduce::{Accumulator, ReductionMode};
use nivo_core::{Observation, StationCatalog};
use serde::Serialize;
use std::collections::BTreeMap;

/// Year -> station ID -> reduced snow height.
pub type YearlyValues = BTreeMap<i32, BTreeMap<String, f64>>;

/// Summary statistics for one station in one year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearlyStationStat {
    pub year: i32,
    pub station_id: String,
    /// Highest valid snow height (m)
    pub snow_max: f64,
    /// Mean of valid snow heights (m)
    pub snow_mean: f64,
    /// Mean of valid temperatures (K), None if the year had none
    pub temp_mean: Option<f64>,
}

#[derive(Default)]
struct PairAccumulator {
    snow: Accumulator,
    temperature: Accumulator,
}

fn accumulate_pairs<'a>(
    stations: &StationCatalog,
    observations: &'a [Observation],
) -> BTreeMap<i32, BTreeMap<&'a str, PairAccumulator>> {
    let mut pairs: BTreeMap<i32, BTreeMap<&'a str, PairAccumulator>> = BTreeMap::new();
    for obs in observations {
        if !stations.contains(&obs.station_id) {
            continue;
        }
        let pair = pairs
            .entry(obs.year())
            .or_default()
            .entry(obs.station_id.as_str())
            .or_default();
        if let Some(snow) = obs.snow_height.value() {
            pair.snow.push(snow);
        }
        if let Some(t) = obs.temperature.value() {
            pair.temperature.push(t);
        }
    }
    // a pair only exists through its snow readings
    for per_station in pairs.values_mut() {
        per_station.retain(|_, pair| pair.snow.count() > 0);
    }
    pairs.retain(|_, per_station| !per_station.is_empty());
    pairs
}

/// Reduce snow heights per (year, station) with the given mode.
pub fn aggregate_yearly(
    stations: &StationCatalog,
    observations: &[Observation],
    mode: ReductionMode,
) -> YearlyValues {
    let result: YearlyValues = accumulate_pairs(stations, observations)
        .into_iter()
        .map(|(year, per_station)| {
            let values = per_station
                .into_iter()
                .filter_map(|(id, pair)| Some((id.to_string(), pair.snow.reduce(mode)?)))
                .collect();
            (year, values)
        })
        .collect();
    log::debug!(
        "yearly: {:?} aggregation over {} observations produced {} years",
        mode,
        observations.len(),
        result.len()
    );
    result
}

/// Full yearly statistics, ordered by year then by station file order.
pub fn summarize_yearly(
    stations: &StationCatalog,
    observations: &[Observation],
) -> Vec<YearlyStationStat> {
    let mut stats = Vec::new();
    for (year, per_station) in accumulate_pairs(stations, observations) {
        let mut rows: Vec<YearlyStationStat> = per_station
            .into_iter()
            .filter_map(|(id, pair)| {
                Some(YearlyStationStat {
                    year,
                    station_id: id.to_string(),
                    snow_max: pair.snow.max()?,
                    snow_mean: pair.snow.mean()?,
                    temp_mean: pair.temperature.mean(),
                })
            })
            .collect();
        rows.sort_by_key(|row| stations.position(&row.station_id));
        stats.extend(rows);
    }
    stats
}
