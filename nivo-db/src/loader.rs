//! Populating the catalogue from parsed tables.
//!
//! Rows are inserted inside one transaction per table. Every observation
//! becomes its own row, so the table holds exactly what the dataset holds.

use crate::Database;
use nivo_core::{Dataset, Observation, StationInfo};
use rusqlite::params;

/// Storage format of the `date` column.
pub(crate) const DATE_COLUMN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Database {
    pub fn load_stations(&self, stations: &[StationInfo]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO stations (station_id, name, latitude, longitude, altitude)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for s in stations {
                stmt.execute(params![s.id, s.name, s.latitude, s.longitude, s.altitude])?;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} stations", stations.len());
        Ok(())
    }

    /// Missing and invalid measurements become NULL.
    pub fn load_observations(&self, observations: &[Observation]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO observations
                 (station_id, date, year, snow_height, temperature)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for obs in observations {
                stmt.execute(params![
                    obs.station_id,
                    obs.timestamp.format(DATE_COLUMN_FORMAT).to_string(),
                    obs.year(),
                    obs.snow_height.value(),
                    obs.temperature.value(),
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} observations", observations.len());
        Ok(())
    }

    /// Load both tables of a dataset.
    pub fn load_dataset(&self, dataset: &Dataset) -> anyhow::Result<()> {
        self.load_stations(dataset.stations().as_slice())?;
        self.load_observations(dataset.observations())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use nivo_core::{Observation, StationInfo};

    fn count(db: &Database, sql: &str) -> i64 {
        db.conn.borrow().query_row(sql, [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn load_stations_replaces_on_conflict() {
        let db = Database::new().unwrap();
        let stations = StationInfo::parse_station_csv(
            "ID,Nom,Latitude,Longitude,Altitude\n74056405,CHAMONIX,45.92,6.87,1035\n",
        )
        .unwrap();
        db.load_stations(&stations).unwrap();
        let renamed = StationInfo::parse_station_csv(
            "ID,Nom,Latitude,Longitude,Altitude\n74056405,CHAMONIX-MONT-BLANC,45.92,6.87,1042\n",
        )
        .unwrap();
        db.load_stations(&renamed).unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM stations"), 1);
        let (name, altitude): (String, f64) = db
            .conn
            .borrow()
            .query_row(
                "SELECT name, altitude FROM stations WHERE station_id = '74056405'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(name, "CHAMONIX-MONT-BLANC");
        assert_eq!(altitude, 1042.0);
    }

    #[test]
    fn load_observations_stores_missing_as_null() {
        let db = Database::new().unwrap();
        let observations = Observation::parse_observation_csv(
            "\
numer_sta,date,ht_neige,t
74056405,201902100600,0.80,mq
74056405,201902110600,mq,265.15
74056405,201902120600,-3,265.15
",
        )
        .unwrap();
        db.load_observations(&observations).unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM observations"), 3);
        assert_eq!(
            count(&db, "SELECT COUNT(*) FROM observations WHERE snow_height IS NULL"),
            2
        );
        assert_eq!(
            count(&db, "SELECT COUNT(*) FROM observations WHERE temperature IS NULL"),
            1
        );
        let date: String = db
            .conn
            .borrow()
            .query_row(
                "SELECT date FROM observations WHERE snow_height IS NOT NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(date, "2019-02-10 06:00:00");
    }

    #[test]
    fn load_observations_keeps_readings_in_the_same_minute() {
        let db = Database::new().unwrap();
        let observations = Observation::parse_observation_csv(
            "\
numer_sta,date,ht_neige,t
74056405,20200115060010,0.40,265.15
74056405,20200115060050,0.45,265.15
74056405,20200115060050,0.45,265.15
",
        )
        .unwrap();
        db.load_observations(&observations).unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM observations"), 3);
        assert_eq!(
            count(
                &db,
                "SELECT COUNT(*) FROM observations WHERE date = '2020-01-15 06:00:10'"
            ),
            1
        );
    }

    #[test]
    fn load_dataset_from_fixtures() {
        let dataset = nivo_core::Dataset::from_csv(
            include_str!("../../fixtures/info.csv"),
            include_str!("../../fixtures/nivo.csv"),
        )
        .unwrap();
        let db = Database::new().unwrap();
        db.load_dataset(&dataset).unwrap();
        assert_eq!(count(&db, "SELECT COUNT(*) FROM stations"), 7);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM observations"), 21);
    }
}
