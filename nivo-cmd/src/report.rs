//! Serializable results of each subcommand, built from a loaded dataset.

use nivo_core::{Dataset, StationInfo};
use nivo_data::{
    compute, framed_region_points, series_trend, slider_range, station_time_series, ChartData,
    Dimension, ReductionMode, Region, Selection, SliderRange, SpatialPoint, TimePoint, TrendLine,
};
use nivo_db::models::{AltitudeRange, StationSummary, YearRange};
use nivo_db::Database;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CatalogReport {
    pub stations: Vec<StationSummary>,
    pub altitude_range: Option<AltitudeRange>,
    pub year_range: Option<YearRange>,
    pub year_slider: Option<SliderRange>,
    pub altitude_slider: Option<SliderRange>,
}

pub fn catalog_report(dataset: &Dataset) -> anyhow::Result<CatalogReport> {
    let db = Database::new()?;
    db.load_dataset(dataset)?;
    Ok(CatalogReport {
        stations: db.query_stations()?,
        altitude_range: db.query_altitude_range()?,
        year_range: db.query_year_range()?,
        year_slider: slider_range(Dimension::Year, dataset.stations()),
        altitude_slider: slider_range(Dimension::Altitude, dataset.stations()),
    })
}

#[derive(Debug, Serialize)]
pub struct StationReport {
    pub station: StationInfo,
    pub series: Vec<TimePoint>,
    pub trend: Option<TrendLine>,
}

pub fn station_report(dataset: &Dataset, station_id: &str) -> anyhow::Result<StationReport> {
    let Some(station) = dataset.stations().get(station_id) else {
        anyhow::bail!("unknown station '{}'", station_id);
    };
    let series = station_time_series(dataset.observations(), station_id);
    let trend = match series_trend(&series) {
        Ok(line) => Some(line),
        Err(e) => {
            log::warn!("report: no trend for station {}: {}", station_id, e);
            None
        }
    };
    Ok(StationReport {
        station: station.clone(),
        series,
        trend,
    })
}

#[derive(Debug, Serialize)]
pub struct RegionPoints {
    pub region: Region,
    pub points: Vec<SpatialPoint>,
}

/// Framed map points for one region, or for both when `region` is None.
pub fn map_report(
    dataset: &Dataset,
    year: i32,
    mode: ReductionMode,
    region: Option<Region>,
) -> Vec<RegionPoints> {
    // Map cells show snow in meters
    let selection = Selection::year(year).with_mode(mode).with_scale_factor(1.0);
    let points = match compute(dataset, &selection) {
        ChartData::Stacked { points } => points,
        ChartData::Series { .. } => Vec::new(),
    };
    let regions = match region {
        Some(region) => vec![region],
        None => vec![Region::Alps, Region::Pyrenees],
    };
    regions
        .into_iter()
        .map(|region| RegionPoints {
            region,
            points: framed_region_points(&points, region),
        })
        .collect()
}
