//! Buoy stations and coordinates, plus the `rstar` impls used for
//! nearest-station lookups.

use haversine::{distance, Location as HaversineLocation, Units};
use rstar::{PointDistance, RTreeObject, AABB};
use std::fmt;

/// A geographical coordinate: latitude first, longitude second, in decimal degrees.
///
/// # Examples
///
/// ```
/// use buoycast::LatLon;
///
/// let sf_buoy = LatLon(37.75, -122.84);
/// assert_eq!(sf_buoy.0, 37.75); // Latitude
/// assert_eq!(sf_buoy.1, -122.84); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: LatLon) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.0,
                longitude: self.1,
            },
            HaversineLocation {
                latitude: other.0,
                longitude: other.1,
            },
            Units::Kilometers,
        )
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.0, self.1)
    }
}

/// A buoy with a known position.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// NDBC station id, e.g. 46026.
    pub id: u32,
    /// Short human readable name.
    pub name: String,
    pub location: LatLon,
}

impl Station {
    pub fn new(id: u32, name: impl Into<String>, location: LatLon) -> Self {
        Self {
            id,
            name: name.into(),
            location,
        }
    }
}

impl RTreeObject for Station {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.0, self.location.1])
    }
}

impl PointDistance for Station {
    /// Squared planar distance in degrees. Good enough to rank a handful of
    /// buoys; the reported distance is computed with haversine afterwards.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.location.0 - point[0];
        let dy = self.location.1 - point[1];
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_km_between_buoys() {
        let san_francisco = LatLon(37.75, -122.84);
        let half_moon_bay = LatLon(37.36, -122.98);
        let km = san_francisco.distance_km(half_moon_bay);
        assert!(km > 40.0 && km < 50.0, "unexpected distance {km}");
        assert_eq!(san_francisco.distance_km(san_francisco), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(LatLon(37.75, -122.84).to_string(), "37.75, -122.84");
    }
}
