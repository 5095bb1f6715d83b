//! Late-winter window statistics behind the snow and temperature heatmaps.

use crate::reduce::Accumulator;
use crate::units::kelvin_to_celsius;
use nivo_core::{Observation, StationCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// February and March.
pub const SEASONAL_MONTHS: [u32; 2] = [2, 3];

/// Mean snow height (m) and mean temperature (K) of one station in one window.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SeasonalStat {
    pub snow_mean: f64,
    pub temp_mean: f64,
}

/// Year -> station ID -> window statistics.
pub type SeasonalValues = BTreeMap<i32, BTreeMap<String, SeasonalStat>>;

/// Average snow and temperature per (year, station) over the given months.
///
/// Only readings where both snow height and temperature are valid are used,
/// and a station/year without any such reading is left out rather than
/// reported as zero snow or zero Kelvin.
pub fn aggregate_seasonal_window(
    observations: &[Observation],
    stations: &StationCatalog,
    months: &[u32],
) -> SeasonalValues {
    let mut pairs: BTreeMap<i32, BTreeMap<&str, (Accumulator, Accumulator)>> = BTreeMap::new();
    for obs in observations {
        if !months.contains(&obs.month()) || !stations.contains(&obs.station_id) {
            continue;
        }
        let (Some(snow), Some(temp)) = (obs.snow_height.value(), obs.temperature.value()) else {
            continue;
        };
        let (snow_acc, temp_acc) = pairs
            .entry(obs.year())
            .or_default()
            .entry(obs.station_id.as_str())
            .or_default();
        snow_acc.push(snow);
        temp_acc.push(temp);
    }

    pairs
        .into_iter()
        .map(|(year, per_station)| {
            let stats = per_station
                .into_iter()
                .filter_map(|(id, (snow, temp))| {
                    Some((
                        id.to_string(),
                        SeasonalStat {
                            snow_mean: snow.mean()?,
                            temp_mean: temp.mean()?,
                        },
                    ))
                })
                .collect();
            (year, stats)
        })
        .collect()
}

/// Which statistic a heatmap shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalField {
    #[default]
    Snow,
    /// Reported in degrees Celsius
    Temperature,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonalRow {
    pub station_id: String,
    pub name: String,
    pub altitude: f64,
    /// One cell per entry of [`SeasonalGrid::years`]; None where the window had no data
    pub values: Vec<Option<f64>>,
}

/// Station x year matrix, highest station first.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonalGrid {
    pub field: SeasonalField,
    pub years: Vec<i32>,
    pub rows: Vec<SeasonalRow>,
}

pub fn seasonal_grid(
    seasonal: &SeasonalValues,
    stations: &StationCatalog,
    field: SeasonalField,
) -> SeasonalGrid {
    let years: Vec<i32> = seasonal.keys().copied().collect();
    let mut ordered: Vec<_> = stations.iter().collect();
    ordered.sort_by(|a, b| b.altitude.total_cmp(&a.altitude));

    let rows = ordered
        .into_iter()
        .map(|station| SeasonalRow {
            station_id: station.id.clone(),
            name: station.name.clone(),
            altitude: station.altitude,
            values: seasonal
                .values()
                .map(|per_station| {
                    per_station.get(&station.id).map(|stat| match field {
                        SeasonalField::Snow => stat.snow_mean,
                        SeasonalField::Temperature => kelvin_to_celsius(stat.temp_mean),
                    })
                })
                .collect(),
        })
        .collect();

    SeasonalGrid { field, years, rows }
}
