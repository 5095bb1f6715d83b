//! The two loaded tables, held together for the lifetime of a session.

use crate::error::Result;
use crate::observation::Observation;
use crate::station::{StationCatalog, StationInfo};

/// Station metadata and observations. Both tables are immutable once built;
/// every aggregation is recomputed from them.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    stations: StationCatalog,
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(stations: Vec<StationInfo>, observations: Vec<Observation>) -> Dataset {
        Dataset {
            stations: StationCatalog::new(stations),
            observations,
        }
    }

    /// Parse both CSV tables. Either one failing fails the whole dataset.
    pub fn from_csv(info_csv: &str, nivo_csv: &str) -> Result<Dataset> {
        let stations = StationInfo::parse_station_csv(info_csv)?;
        let observations = Observation::parse_observation_csv(nivo_csv)?;
        Ok(Dataset::new(stations, observations))
    }

    pub fn stations(&self) -> &StationCatalog {
        &self.stations
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations whose station is absent from the metadata.
    pub fn unmapped_observations(&self) -> usize {
        self.observations
            .iter()
            .filter(|o| !self.stations.contains(&o.station_id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::Dataset;

    const INFO_CSV: &str = include_str!("../../fixtures/info.csv");
    const NIVO_CSV: &str = include_str!("../../fixtures/nivo.csv");

    #[test]
    fn test_dataset_from_fixtures() {
        let dataset = Dataset::from_csv(INFO_CSV, NIVO_CSV).unwrap();
        assert_eq!(dataset.stations().len(), 7);
        assert_eq!(dataset.observations().len(), 21);
        assert_eq!(dataset.unmapped_observations(), 1);
    }

    #[test]
    fn test_dataset_fails_when_either_table_fails() {
        assert!(Dataset::from_csv("ID,Nom\n", NIVO_CSV).is_err());
        assert!(Dataset::from_csv(INFO_CSV, "numer_sta,date\n").is_err());
    }
}
