use nivo_core::{Observation, StationCatalog};

/// Half-width (m) of the altitude window used in altitude mode.
pub const ALTITUDE_TOLERANCE: f64 = 50.0;

/// Keep observations whose station altitude lies within `tolerance` of
/// `target` (bounds inclusive). Observations from stations absent from the
/// metadata have no altitude and are dropped. Input order is preserved.
pub fn filter_by_proximity(
    observations: &[Observation],
    stations: &StationCatalog,
    target: f64,
    tolerance: f64,
) -> Vec<Observation> {
    let mut unmapped = 0usize;
    let kept: Vec<Observation> = observations
        .iter()
        .filter(|obs| match stations.altitude_of(&obs.station_id) {
            Some(altitude) => (altitude - target).abs() <= tolerance,
            None => {
                unmapped += 1;
                false
            }
        })
        .cloned()
        .collect();
    if unmapped > 0 {
        log::debug!(
            "proximity: dropped {} observations from unmapped stations",
            unmapped
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use nivo_core::StationInfo;

    fn catalog() -> StationCatalog {
        StationCatalog::new(
            StationInfo::parse_station_csv(
                "\
ID,Nom,Latitude,Longitude,Altitude
LOW,Low,45.0,6.0,949
EDGE_LO,EdgeLo,45.0,6.0,950
MID,Mid,45.0,6.0,1000
EDGE_HI,EdgeHi,45.0,6.0,1050
HIGH,High,45.0,6.0,1051
",
            )
            .unwrap(),
        )
    }

    fn observations() -> Vec<Observation> {
        Observation::parse_observation_csv(
            "\
numer_sta,date,ht_neige,t
LOW,20200101,0.1,270
EDGE_LO,20200101,0.2,270
MID,20200101,mq,270
EDGE_HI,20200101,0.4,270
HIGH,20200101,0.5,270
GHOST,20200101,0.6,270
MID,20200102,0.7,270
",
        )
        .unwrap()
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let kept = filter_by_proximity(&observations(), &catalog(), 1000.0, ALTITUDE_TOLERANCE);
        let ids: Vec<&str> = kept.iter().map(|o| o.station_id.as_str()).collect();
        assert_eq!(ids, vec!["EDGE_LO", "MID", "EDGE_HI", "MID"]);
    }

    #[test]
    fn test_window_recenters_on_target() {
        let kept = filter_by_proximity(&observations(), &catalog(), 1100.0, ALTITUDE_TOLERANCE);
        let ids: Vec<&str> = kept.iter().map(|o| o.station_id.as_str()).collect();
        assert_eq!(ids, vec!["EDGE_HI", "HIGH"]);
    }

    #[test]
    fn test_unmapped_station_is_dropped() {
        let kept = filter_by_proximity(&observations(), &catalog(), 1000.0, 10_000.0);
        assert_eq!(kept.len(), 6);
        assert!(kept.iter().all(|o| o.station_id != "GHOST"));
    }
}
