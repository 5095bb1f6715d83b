//! In-memory SQLite catalogue of nivo stations and observations.
//!
//! The catalogue mirrors a loaded [`nivo_core::Dataset`] and answers the
//! listing questions a station picker or slider needs: which stations exist
//! and the altitude and year spans.
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//! - `stations` - station metadata
//! - `observations` - readings, NULL where a measurement was missing

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database. Clones share the same connection.
///
/// # Example
///
/// ```rust
/// use nivo_core::Dataset;
/// use nivo_db::Database;
///
/// let dataset = Dataset::from_csv(
///     "ID,Nom,Latitude,Longitude,Altitude\n74056405,CHAMONIX,45.92,6.87,1035\n",
///     "numer_sta,date,ht_neige,t\n74056405,20190210,0.80,265.35\n",
/// )
/// .unwrap();
/// let db = Database::new().unwrap();
/// db.load_dataset(&dataset).unwrap();
/// let stations = db.query_stations().unwrap();
/// assert_eq!(stations.len(), 1);
/// assert_eq!(stations[0].snow_readings, 1);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create an empty in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nivo_core::StationInfo;

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        let stations = StationInfo::parse_station_csv(
            "ID,Nom,Latitude,Longitude,Altitude\n65388401,BAREGES,42.90,0.06,1250\n",
        )
        .unwrap();
        db.load_stations(&stations).unwrap();
        assert_eq!(
            db2.query_stations().unwrap().len(),
            1,
            "Clone should see same data via shared Rc"
        );
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_stations().unwrap().is_empty());
    }
}
