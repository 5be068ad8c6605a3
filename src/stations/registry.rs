//! Known buoy positions, keyed by NDBC station id.

use crate::types::station::{LatLon, Station};
use rstar::RTree;
use std::collections::HashMap;

/// Station used when none is given.
pub const DEFAULT_STATION_ID: u32 = 46026;

/// Position used when manually entered coordinates do not parse.
pub const DEFAULT_LOCATION: LatLon = LatLon(37.75, -122.84);

/// Built-in buoys: (id, name, latitude, longitude).
const KNOWN_STATIONS: [(u32, &str, f64, f64); 4] = [
    (46026, "San Francisco", 37.75, -122.84),
    (46005, "West Washington", 46.13, -131.09),
    (46011, "Santa Maria", 34.96, -120.99),
    (46012, "Half Moon Bay", 37.36, -122.98),
];

/// Read-only lookup of buoy coordinates.
///
/// `StationRegistry::default()` holds the built-in buoys. Extra or corrected
/// entries are added with [`StationRegistry::with_stations`].
#[derive(Debug, Clone)]
pub struct StationRegistry {
    by_id: HashMap<u32, Station>,
    rtree: RTree<Station>,
}

impl StationRegistry {
    /// Builds a registry from `stations`. A later entry replaces an earlier
    /// one with the same id.
    pub fn new(stations: impl IntoIterator<Item = Station>) -> Self {
        let by_id: HashMap<u32, Station> = stations
            .into_iter()
            .map(|station| (station.id, station))
            .collect();
        let rtree = RTree::bulk_load(by_id.values().cloned().collect());
        Self { by_id, rtree }
    }

    /// Returns a registry with the built-in buoys plus `extra`.
    pub fn with_stations(extra: impl IntoIterator<Item = Station>) -> Self {
        Self::new(Self::builtin().chain(extra))
    }

    fn builtin() -> impl Iterator<Item = Station> {
        KNOWN_STATIONS
            .iter()
            .map(|&(id, name, lat, lon)| Station::new(id, name, LatLon(lat, lon)))
    }

    /// Station with the given NDBC id.
    pub fn get(&self, id: u32) -> Option<&Station> {
        self.by_id.get(&id)
    }

    /// Location of a known station, `None` if it must be entered by hand.
    pub fn coordinates(&self, id: u32) -> Option<LatLon> {
        self.get(id).map(|station| station.location)
    }

    /// The known buoy closest to `location`, with its great-circle distance in km.
    pub fn nearest(&self, location: LatLon) -> Option<(&Station, f64)> {
        self.rtree
            .nearest_neighbor(&[location.0, location.1])
            .map(|station| (station, station.location.distance_km(location)))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for StationRegistry {
    fn default() -> Self {
        Self::new(Self::builtin())
    }
}
