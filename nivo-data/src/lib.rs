//! Aggregation of nivo snow observations.
//!
//! This crate turns parsed station and observation tables into the yearly
//! summaries, seasonal heatmap grids, altitude time series and map point sets
//! that charts consume. Every function is pure and recomputes from the full
//! tables.

pub mod buckets;
pub mod display;
pub mod proximity;
pub mod reduce;
pub mod seasonal;
pub mod selection;
pub mod spatial;
pub mod timeseries;
pub mod trend;
pub mod yearly;

/// Temperature unit conversion
pub mod units {
    /// 0 °C in Kelvin
    pub const KELVIN_OFFSET: f64 = 273.15;

    pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
        kelvin - KELVIN_OFFSET
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_kelvin_to_celsius() {
            assert_eq!(kelvin_to_celsius(273.15), 0.0);
            assert!((kelvin_to_celsius(263.15) + 10.0).abs() < 1e-9);
        }
    }
}

pub use buckets::{bucket_by_time_precision, Bucket, Precision};
pub use display::{reshape_for_display, ChartPoint, DEFAULT_SCALE_FACTOR};
pub use proximity::{filter_by_proximity, ALTITUDE_TOLERANCE};
pub use reduce::{Accumulator, ReductionMode};
pub use seasonal::{
    aggregate_seasonal_window, seasonal_grid, SeasonalField, SeasonalGrid, SeasonalRow,
    SeasonalStat, SeasonalValues, SEASONAL_MONTHS,
};
pub use selection::{compute, slider_range, ChartData, Dimension, Selection, SliderRange};
pub use spatial::{framed_region_points, Region, SpatialPoint};
pub use timeseries::{bucket_trend, series_trend, station_time_series, TimePoint};
pub use trend::{fit_linear_trend, TrendError, TrendLine};
pub use yearly::{aggregate_yearly, summarize_yearly, YearlyStationStat, YearlyValues};
