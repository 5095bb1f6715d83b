use crate::error::{NivoError, Result};
use crate::measurement::Measurement;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};
use serde::Serialize;

/// Date format of the leading part of the nivo `date` column: "YYYYMMDD"
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Header names of the nivo observation table.
pub const STATION_COLUMN: &str = "numer_sta";
pub const DATE_COLUMN: &str = "date";
pub const SNOW_HEIGHT_COLUMN: &str = "ht_neige";
pub const TEMPERATURE_COLUMN: &str = "t";

/// A single row of the nivo table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub station_id: String,
    pub timestamp: NaiveDateTime,
    /// Snow height in metres
    pub snow_height: Measurement,
    /// Air temperature in Kelvin
    pub temperature: Measurement,
}

impl Observation {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Calendar year, i.e. the first four digits of the `date` column.
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Calendar month, 1 through 12.
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    /// Parse a nivo CSV string into Observations.
    ///
    /// Expected header columns: `numer_sta, date, ht_neige, t` (any order,
    /// other columns ignored). Rows with an empty station or an unparseable
    /// date are skipped; sentinel and non-numeric readings are kept as
    /// [`Measurement::Missing`] / [`Measurement::Invalid`].
    pub fn parse_observation_csv(csv_object: &str) -> Result<Vec<Observation>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        let headers = rdr.headers()?.clone();
        let columns = ObservationColumns::locate(&headers)?;

        let mut observations = Vec::new();
        let mut skipped = 0u32;
        for row in rdr.records() {
            let record = row?;
            match columns.observation(&record) {
                Some(obs) => observations.push(obs),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(
                "observation loader: skipped {} rows with no station or date",
                skipped
            );
        }
        info!(
            "observation loader: parsed {} observations",
            observations.len()
        );
        Ok(observations)
    }
}

/// Parse a nivo date: `YYYYMMDD` optionally followed by `HH`, `HHMM` or `HHMMSS`.
pub fn parse_nivo_date(raw: &str) -> Result<NaiveDateTime> {
    let s = raw.trim();
    let well_formed =
        s.len() >= 8 && s.len() <= 14 && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(NivoError::DateParse(raw.to_string()));
    }
    let date = NaiveDate::parse_from_str(&s[..8], DATE_FORMAT)
        .map_err(|e| NivoError::DateParse(format!("{}: {}", raw, e)))?;
    let part = |range: std::ops::Range<usize>| -> u32 {
        s.get(range).and_then(|p| p.parse().ok()).unwrap_or(0)
    };
    date.and_hms_opt(part(8..10), part(10..12), part(12..14))
        .ok_or_else(|| NivoError::DateParse(raw.to_string()))
}

struct ObservationColumns {
    station: usize,
    date: usize,
    snow_height: usize,
    temperature: usize,
}

impl ObservationColumns {
    fn locate(headers: &StringRecord) -> Result<ObservationColumns> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(NivoError::MissingColumn {
                    table: "nivo",
                    column,
                })
        };
        Ok(ObservationColumns {
            station: find(STATION_COLUMN)?,
            date: find(DATE_COLUMN)?,
            snow_height: find(SNOW_HEIGHT_COLUMN)?,
            temperature: find(TEMPERATURE_COLUMN)?,
        })
    }

    fn observation(&self, record: &StringRecord) -> Option<Observation> {
        let station_id = record.get(self.station)?.trim();
        if station_id.is_empty() {
            return None;
        }
        let timestamp = parse_nivo_date(record.get(self.date)?).ok()?;
        Some(Observation {
            station_id: station_id.to_string(),
            timestamp,
            snow_height: Measurement::parse_snow_height(
                record.get(self.snow_height).unwrap_or(""),
            ),
            temperature: Measurement::parse_temperature(
                record.get(self.temperature).unwrap_or(""),
            ),
        })
    }
}

#[cfg(test)]
mod test {
    use super::{parse_nivo_date, Observation};
    use crate::measurement::Measurement;
    use crate::NivoError;
    use chrono::{NaiveDate, Timelike};

    const NIVO_CSV: &str = include_str!("../../fixtures/nivo.csv");

    #[test]
    fn test_parse_observation_csv() {
        let observations = Observation::parse_observation_csv(NIVO_CSV).unwrap();
        assert_eq!(observations.len(), 21);
        let first = &observations[0];
        assert_eq!(first.station_id, "74056405");
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2019, 1, 15).unwrap());
        assert_eq!(first.timestamp.hour(), 6);
        assert_eq!(first.snow_height, Measurement::Value(0.45));
        assert_eq!(first.temperature, Measurement::Value(268.15));
        assert_eq!(first.year(), 2019);
        assert_eq!(first.month(), 1);
    }

    #[test]
    fn test_sentinels_are_kept_as_missing() {
        let observations = Observation::parse_observation_csv(NIVO_CSV).unwrap();
        let val_d_isere: Vec<_> = observations
            .iter()
            .filter(|o| o.station_id == "73304406" && o.year() == 2019)
            .collect();
        assert_eq!(val_d_isere.len(), 3);
        assert_eq!(val_d_isere[1].temperature, Measurement::Missing);
        assert_eq!(val_d_isere[2].snow_height, Measurement::Missing);
    }

    #[test]
    fn test_rows_without_station_or_date_are_skipped() {
        let csv_data = "\
numer_sta,date,ht_neige,t
A,20200115,0.10,270.0
,20200116,0.20,270.0
A,2020-01-17,0.30,270.0
A,20200118,abc,270.0
";
        let observations = Observation::parse_observation_csv(csv_data).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].snow_height, Measurement::Invalid);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv_data = "numer_sta,date,t\nA,20200115,270.0\n";
        assert!(matches!(
            Observation::parse_observation_csv(csv_data),
            Err(NivoError::MissingColumn { column: "ht_neige", .. })
        ));
    }

    #[test]
    fn test_parse_nivo_date_variants() {
        let day = parse_nivo_date("20200115").unwrap();
        assert_eq!(day.date(), NaiveDate::from_ymd_opt(2020, 1, 15).unwrap());
        assert_eq!(day.hour(), 0);

        let minute = parse_nivo_date("202001151830").unwrap();
        assert_eq!(minute.hour(), 18);
        assert_eq!(minute.minute(), 30);

        let second = parse_nivo_date("20200115183045").unwrap();
        assert_eq!(second.second(), 45);
    }

    #[test]
    fn test_parse_nivo_date_rejects_garbage() {
        assert!(parse_nivo_date("2020011").is_err());
        assert!(parse_nivo_date("20201315").is_err());
        assert!(parse_nivo_date("202001152500").is_err());
        assert!(parse_nivo_date("2020-01-15").is_err());
    }
}
