use crate::error::{NivoError, Result};
use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Header names of the station metadata (info) table.
pub const ID_COLUMN: &str = "ID";
pub const NAME_COLUMN: &str = "Nom";
pub const LATITUDE_COLUMN: &str = "Latitude";
pub const LONGITUDE_COLUMN: &str = "Longitude";
pub const ALTITUDE_COLUMN: &str = "Altitude";

/// Represents a weather station of the info table.
///
/// Stations are loaded once and never mutated; the `id` matches the
/// `numer_sta` column of the nivo observation table.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StationInfo {
    /// Station identifier (e.g., "74056405")
    pub id: String,
    /// Human-readable name of the station
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Altitude in metres
    pub altitude: f64,
}

impl StationInfo {
    /// Parse a CSV string of station metadata into a vector of StationInfo.
    ///
    /// Expected header columns: `ID, Nom, Latitude, Longitude, Altitude`
    /// (in any order). Rows with an empty ID or a non-numeric coordinate or
    /// altitude are skipped.
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<StationInfo>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        let headers = rdr.headers()?.clone();
        let columns = StationColumns::locate(&headers)?;

        let mut station_list: Vec<StationInfo> = Vec::new();
        let mut skipped = 0u32;
        for row in rdr.records() {
            let record = row?;
            match columns.station(&record) {
                Some(station) => station_list.push(station),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("station loader: skipped {} malformed rows", skipped);
        }
        info!("station loader: parsed {} stations", station_list.len());
        Ok(station_list)
    }
}

struct StationColumns {
    id: usize,
    name: usize,
    latitude: usize,
    longitude: usize,
    altitude: usize,
}

impl StationColumns {
    fn locate(headers: &StringRecord) -> Result<StationColumns> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(NivoError::MissingColumn {
                    table: "info",
                    column,
                })
        };
        Ok(StationColumns {
            id: find(ID_COLUMN)?,
            name: find(NAME_COLUMN)?,
            latitude: find(LATITUDE_COLUMN)?,
            longitude: find(LONGITUDE_COLUMN)?,
            altitude: find(ALTITUDE_COLUMN)?,
        })
    }

    fn station(&self, record: &StringRecord) -> Option<StationInfo> {
        let number = |idx: usize| record.get(idx)?.trim().parse::<f64>().ok();
        let id = record.get(self.id)?.trim();
        if id.is_empty() {
            return None;
        }
        Some(StationInfo {
            id: id.to_string(),
            name: record.get(self.name).unwrap_or("").trim().to_string(),
            latitude: number(self.latitude)?,
            longitude: number(self.longitude)?,
            altitude: number(self.altitude)?,
        })
    }
}

/// All stations of the info table, in file order, indexed by ID.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<StationInfo>,
    index: HashMap<String, usize>,
}

impl StationCatalog {
    /// Build a catalog. A repeated ID keeps its first row.
    pub fn new(stations: Vec<StationInfo>) -> StationCatalog {
        let mut catalog = StationCatalog::default();
        for station in stations {
            if catalog.index.contains_key(&station.id) {
                warn!("station catalog: duplicate station ID {}", station.id);
                continue;
            }
            catalog
                .index
                .insert(station.id.clone(), catalog.stations.len());
            catalog.stations.push(station);
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&StationInfo> {
        self.index.get(id).map(|&i| &self.stations[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn altitude_of(&self, id: &str) -> Option<f64> {
        self.get(id).map(|s| s.altitude)
    }

    /// Position of the station in file order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationInfo> {
        self.stations.iter()
    }

    pub fn as_slice(&self) -> &[StationInfo] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Lowest and highest station altitude, or None for an empty catalog.
    pub fn altitude_range(&self) -> Option<(f64, f64)> {
        let mut it = self.stations.iter().map(|s| s.altitude);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a))))
    }
}

impl<'a> IntoIterator for &'a StationCatalog {
    type Item = &'a StationInfo;
    type IntoIter = std::slice::Iter<'a, StationInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
