//! Per-massif point sets for the Voronoi snow map.
//!
//! Each massif is framed by four padded corner points at low altitude with
//! no snow, so the outer Voronoi cells close off at the map border.

use crate::display::ChartPoint;
use serde::{Deserialize, Serialize};

/// Stations east of this longitude belong to the Alps.
pub const ALPS_MIN_LONGITUDE: f64 = 5.0;
/// Stations west of this longitude belong to the Pyrenees.
pub const PYRENEES_MAX_LONGITUDE: f64 = 2.5;

pub const LONGITUDE_PADDING: f64 = 0.38;
pub const LATITUDE_PADDING: f64 = 0.13;
/// Altitude (m) given to frame corners.
pub const FRAME_ALTITUDE: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Alps,
    Pyrenees,
}

impl Region {
    /// Massif of a station by longitude; stations in between belong to neither.
    pub fn of(longitude: f64) -> Option<Region> {
        if longitude > ALPS_MIN_LONGITUDE {
            Some(Region::Alps)
        } else if longitude < PYRENEES_MAX_LONGITUDE {
            Some(Region::Pyrenees)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpatialPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
    pub value: f64,
    /// None for frame corners
    pub name: Option<String>,
}

/// Points of one region followed by its sw, se, nw and ne frame corners.
///
/// An empty region yields an empty vector.
pub fn framed_region_points(points: &[ChartPoint], region: Region) -> Vec<SpatialPoint> {
    let mut framed: Vec<SpatialPoint> = points
        .iter()
        .filter(|p| Region::of(p.longitude) == Some(region))
        .map(|p| SpatialPoint {
            longitude: p.longitude,
            latitude: p.latitude,
            altitude: p.altitude,
            value: p.value,
            name: Some(p.name.clone()),
        })
        .collect();
    if framed.is_empty() {
        return framed;
    }

    let (mut west, mut east) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut south, mut north) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in &framed {
        west = west.min(p.longitude);
        east = east.max(p.longitude);
        south = south.min(p.latitude);
        north = north.max(p.latitude);
    }
    let corner = |longitude: f64, latitude: f64| SpatialPoint {
        longitude,
        latitude,
        altitude: FRAME_ALTITUDE,
        value: 0.0,
        name: None,
    };
    framed.extend([
        corner(west - LONGITUDE_PADDING, south - LATITUDE_PADDING),
        corner(east + LONGITUDE_PADDING, south - LATITUDE_PADDING),
        corner(west - LONGITUDE_PADDING, north + LATITUDE_PADDING),
        corner(east + LONGITUDE_PADDING, north + LATITUDE_PADDING),
    ]);
    framed
}
