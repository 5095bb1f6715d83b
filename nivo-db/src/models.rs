//! Query result structs. All derive `Serialize` for JSON output.

use serde::Serialize;

/// Station metadata for selection lists and chart labels.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationSummary {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters
    pub altitude: f64,
    /// Readings with a valid snow height.
    pub snow_readings: i64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct AltitudeRange {
    pub min: f64,
    pub max: f64,
}

/// First and last calendar year with an observation at a known station.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}
