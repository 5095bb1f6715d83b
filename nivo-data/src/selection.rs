//! One immutable chart configuration and the pure computation it drives.
//!
//! Every change of slider, mode or precision builds a new [`Selection`] and
//! recomputes from the full dataset; nothing is cached between calls.

use crate::buckets::{bucket_by_time_precision, Bucket, Precision};
use crate::display::{reshape_for_display, ChartPoint, DEFAULT_SCALE_FACTOR};
use crate::proximity::{filter_by_proximity, ALTITUDE_TOLERANCE};
use crate::reduce::ReductionMode;
use crate::timeseries::bucket_trend;
use crate::trend::TrendLine;
use crate::yearly::aggregate_yearly;
use nivo_core::{Dataset, StationCatalog};
use serde::{Deserialize, Serialize};

pub const YEAR_SLIDER_MIN: i32 = 1996;
pub const YEAR_SLIDER_MAX: i32 = 2024;
/// Altitude slider step (m).
pub const ALTITUDE_SLIDER_STEP: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    Year,
    Altitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub dimension: Dimension,
    /// Selected year, or target altitude in meters
    pub value: f64,
    pub mode: ReductionMode,
    /// Only used in altitude mode
    pub precision: Precision,
    pub scale_factor: f64,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            dimension: Dimension::Year,
            value: 2020.0,
            mode: ReductionMode::Max,
            precision: Precision::Month,
            scale_factor: DEFAULT_SCALE_FACTOR,
        }
    }
}

impl Selection {
    pub fn year(year: i32) -> Selection {
        Selection {
            dimension: Dimension::Year,
            value: year as f64,
            ..Selection::default()
        }
    }

    pub fn altitude(altitude: f64) -> Selection {
        Selection {
            dimension: Dimension::Altitude,
            value: altitude,
            ..Selection::default()
        }
    }

    pub fn with_mode(self, mode: ReductionMode) -> Selection {
        Selection { mode, ..self }
    }

    pub fn with_precision(self, precision: Precision) -> Selection {
        Selection { precision, ..self }
    }

    pub fn with_scale_factor(self, scale_factor: f64) -> Selection {
        Selection {
            scale_factor,
            ..self
        }
    }

    /// Slider label: the year, or the altitude window as "lo - hi".
    pub fn readout(&self) -> String {
        match self.dimension {
            Dimension::Year => format!("{}", self.value.round() as i32),
            Dimension::Altitude => format!(
                "{:.0} - {:.0}",
                self.value - ALTITUDE_TOLERANCE,
                self.value + ALTITUDE_TOLERANCE
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Slider bounds for a dimension. None in altitude mode when there are no stations.
pub fn slider_range(dimension: Dimension, stations: &StationCatalog) -> Option<SliderRange> {
    match dimension {
        Dimension::Year => Some(SliderRange {
            min: YEAR_SLIDER_MIN as f64,
            max: YEAR_SLIDER_MAX as f64,
            step: 1.0,
        }),
        Dimension::Altitude => stations.altitude_range().map(|(min, max)| SliderRange {
            min,
            max,
            step: ALTITUDE_SLIDER_STEP,
        }),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartData {
    /// Year mode: one point per station with snow that year
    Stacked { points: Vec<ChartPoint> },
    /// Altitude mode: bucketed series with an optional trend overlay
    Series {
        buckets: Vec<Bucket>,
        trend: Option<TrendLine>,
    },
}

pub fn compute(dataset: &Dataset, selection: &Selection) -> ChartData {
    let stations = dataset.stations();
    match selection.dimension {
        Dimension::Year => {
            let year = selection.value.round() as i32;
            let yearly = aggregate_yearly(stations, dataset.observations(), selection.mode);
            let points = reshape_for_display(&yearly, stations, selection.scale_factor)
                .remove(&year)
                .unwrap_or_default();
            ChartData::Stacked { points }
        }
        Dimension::Altitude => {
            let nearby = filter_by_proximity(
                dataset.observations(),
                stations,
                selection.value,
                ALTITUDE_TOLERANCE,
            );
            let buckets = bucket_by_time_precision(&nearby, selection.precision, selection.mode);
            let trend = match bucket_trend(&buckets) {
                Ok(line) => Some(line),
                Err(e) => {
                    log::warn!("selection: no trend for {}: {}", selection.readout(), e);
                    None
                }
            };
            ChartData::Series { buckets, trend }
        }
    }
}
