//! SQL schema for the in-memory catalogue.

/// Returns the full SQL schema as a single batch string.
///
/// - `stations` - station metadata from the info table
/// - `observations` - one row per nivo reading; a missing or invalid
///   measurement is stored as NULL
///
/// `date` is stored as `YYYY-MM-DD HH:MM:SS` so that text order is time order.
/// Observations carry no key: repeated readings are kept as separate rows.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS stations (
        station_id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        altitude REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_stations_name ON stations(name);

    CREATE TABLE IF NOT EXISTS observations (
        station_id TEXT NOT NULL,
        date TEXT NOT NULL,
        year INTEGER NOT NULL,
        snow_height REAL,
        temperature REAL
    );
    CREATE INDEX IF NOT EXISTS idx_obs_station ON observations(station_id);
    CREATE INDEX IF NOT EXISTS idx_obs_year ON observations(year);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn count_objects(conn: &Connection, kind: &str, name: &str) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn schema_creates_tables_and_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");

        for table in ["stations", "observations"] {
            assert_eq!(count_objects(&conn, "table", table), 1, "Table '{}' should exist", table);
        }
        for idx in ["idx_stations_name", "idx_obs_station", "idx_obs_year"] {
            assert_eq!(count_objects(&conn, "index", idx), 1, "Index '{}' should exist", idx);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
