//! Reshaping yearly values into the per-year point lists charts consume.

use crate::yearly::YearlyValues;
use nivo_core::StationCatalog;
use serde::Serialize;
use std::collections::BTreeMap;

/// Display multiplier applied to snow heights before charting (m -> cm).
pub const DEFAULT_SCALE_FACTOR: f64 = 100.0;

/// One station's value for one year, in presentation form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Reduced snow height multiplied by the scale factor
    pub value: f64,
    pub id: String,
    pub name: String,
}

/// Project every known station through each year's values.
///
/// Stations without a value default to 0, values are multiplied by
/// `scale_factor`, zero results are dropped and the rest are sorted by
/// ascending altitude. The sort is stable, so stations at the same altitude
/// keep their file order; stacked renderers depend on that column order.
pub fn reshape_for_display(
    yearly: &YearlyValues,
    stations: &StationCatalog,
    scale_factor: f64,
) -> BTreeMap<i32, Vec<ChartPoint>> {
    yearly
        .iter()
        .map(|(year, values)| {
            let mut points: Vec<ChartPoint> = stations
                .iter()
                .map(|station| ChartPoint {
                    latitude: station.latitude,
                    longitude: station.longitude,
                    altitude: station.altitude,
                    value: values.get(&station.id).copied().unwrap_or(0.0) * scale_factor,
                    id: station.id.clone(),
                    name: station.name.clone(),
                })
                .filter(|point| point.value != 0.0)
                .collect();
            points.sort_by(|a, b| a.altitude.total_cmp(&b.altitude));
            (*year, points)
        })
        .collect()
}
