//! Typed catalogue queries.
//!
//! Only stations present in the info table are reported; observations of
//! unknown stations stay in the table but never surface in a result.

use crate::models::{AltitudeRange, StationSummary, YearRange};
use crate::Database;

impl Database {
    /// All stations ordered by name, with their count of valid snow readings.
    pub fn query_stations(&self) -> anyhow::Result<Vec<StationSummary>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT s.station_id, s.name, s.latitude, s.longitude, s.altitude,
                    COUNT(o.snow_height)
             FROM stations s
             LEFT JOIN observations o ON o.station_id = s.station_id
             GROUP BY s.station_id
             ORDER BY s.name, s.station_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StationSummary {
                    station_id: row.get(0)?,
                    name: row.get(1)?,
                    latitude: row.get(2)?,
                    longitude: row.get(3)?,
                    altitude: row.get(4)?,
                    snow_readings: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_stations returned {} records", rows.len());
        Ok(rows)
    }

    /// Lowest and highest station altitude; None when no station is loaded.
    pub fn query_altitude_range(&self) -> anyhow::Result<Option<AltitudeRange>> {
        let conn = self.conn.borrow();
        let (min, max): (Option<f64>, Option<f64>) = conn.query_row(
            "SELECT MIN(altitude), MAX(altitude) FROM stations",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(min.zip(max).map(|(min, max)| AltitudeRange { min, max }))
    }

    /// Years spanned by observations of known stations.
    pub fn query_year_range(&self) -> anyhow::Result<Option<YearRange>> {
        let conn = self.conn.borrow();
        let (first, last): (Option<i32>, Option<i32>) = conn.query_row(
            "SELECT MIN(o.year), MAX(o.year)
             FROM observations o
             INNER JOIN stations s ON o.station_id = s.station_id",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(first.zip(last).map(|(first, last)| YearRange { first, last }))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{AltitudeRange, YearRange};
    use crate::Database;
    use nivo_core::Dataset;

    fn fixture_db() -> Database {
        let dataset = Dataset::from_csv(
            include_str!("../../fixtures/info.csv"),
            include_str!("../../fixtures/nivo.csv"),
        )
        .unwrap();
        let db = Database::new().unwrap();
        db.load_dataset(&dataset).unwrap();
        db
    }

    #[test]
    fn stations_are_ordered_by_name() {
        let stations = fixture_db().query_stations().unwrap();
        let names: Vec<&str> = stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ASCOU",
                "BAREGES",
                "CHAMONIX",
                "CHAMROUSSE",
                "FONT-ROMEU",
                "ORCIERES",
                "VAL D'ISERE"
            ]
        );
        let chamonix = &stations[2];
        assert_eq!(chamonix.station_id, "74056405");
        assert_eq!(chamonix.altitude, 1035.0);
        assert_eq!(chamonix.snow_readings, 6);
        // one of VAL D'ISERE's readings is missing
        assert_eq!(stations[6].snow_readings, 4);
    }

    #[test]
    fn altitude_and_year_ranges() {
        let db = fixture_db();
        assert_eq!(
            db.query_altitude_range().unwrap(),
            Some(AltitudeRange {
                min: 1000.0,
                max: 1850.0
            })
        );
        assert_eq!(
            db.query_year_range().unwrap(),
            Some(YearRange {
                first: 2019,
                last: 2020
            })
        );
    }

    #[test]
    fn ranges_of_empty_database_are_none() {
        let db = Database::new().unwrap();
        assert_eq!(db.query_altitude_range().unwrap(), None);
        assert_eq!(db.query_year_range().unwrap(), None);
    }

    #[test]
    fn snow_readings_match_the_dataset() {
        let dataset = Dataset::from_csv(
            include_str!("../../fixtures/info.csv"),
            "\
numer_sta,date,ht_neige,t
74056405,20200115060010,0.40,265.15
74056405,20200115060050,0.45,265.15
74056405,20200116060000,mq,265.15
",
        )
        .unwrap();
        let db = Database::new().unwrap();
        db.load_dataset(&dataset).unwrap();
        let chamonix = db
            .query_stations()
            .unwrap()
            .into_iter()
            .find(|s| s.station_id == "74056405")
            .unwrap();
        let valid_in_dataset = dataset
            .observations()
            .iter()
            .filter(|o| o.snow_height.value().is_some())
            .count() as i64;
        assert_eq!(chamonix.snow_readings, 2);
        assert_eq!(chamonix.snow_readings, valid_in_dataset);
    }
}
