//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

/// A geographic point as a latitude/longitude pair in decimal degrees.
///
/// Plain value type with no identity beyond its coordinates. Latitude is
/// expected in [-90, 90] and longitude in [-180, 180]; see
/// [`GeoPoint::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Arithmetic midpoint: lat and lng averaged independently.
    ///
    /// Not the geodesic midpoint; adequate at the short and medium route
    /// distances this crate targets.
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }

    /// Whether the coordinates fall in the valid lat/lng ranges.
    pub fn in_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(10.0, 20.0);
        assert_eq!(a.midpoint(&b), GeoPoint::new(5.0, 10.0));
    }

    #[test]
    fn test_midpoint_commutes() {
        let a = GeoPoint::new(36.17, -115.14);
        let b = GeoPoint::new(34.05, -118.24);
        assert_eq!(a.midpoint(&b), b.midpoint(&a));
    }

    #[test]
    fn test_in_bounds() {
        assert!(GeoPoint::new(90.0, -180.0).in_bounds());
        assert!(GeoPoint::new(-90.0, 180.0).in_bounds());
        assert!(!GeoPoint::new(90.1, 0.0).in_bounds());
        assert!(!GeoPoint::new(0.0, -180.5).in_bounds());
    }
}
