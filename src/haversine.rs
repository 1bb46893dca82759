//! Haversine route provider (fallback when no routing service is reachable).
//!
//! Uses great-circle distance to estimate distance and travel time.
//! Less accurate than OSRM (ignores roads) but always available.

use crate::geo::GeoPoint;
use crate::polyline::{DEFAULT_PRECISION, Polyline};
use crate::route::{FetchedRoute, RouteSummary};
use crate::traits::RouteProvider;

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line route provider.
///
/// Estimates the drive from great-circle distance and an assumed speed;
/// the returned geometry is just the two endpoints.
#[derive(Debug, Clone)]
pub struct HaversineRouter {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineRouter {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineRouter {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Great-circle distance between two points in kilometers.
    fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

impl RouteProvider for HaversineRouter {
    fn route_between(&self, origin: GeoPoint, destination: GeoPoint) -> Option<FetchedRoute> {
        let distance_km = Self::haversine_km(origin, destination);
        let duration_min = distance_km / self.speed_kmh * 60.0;
        let geometry = Polyline::new(vec![origin, destination]).encode(DEFAULT_PRECISION);

        Some(FetchedRoute {
            summary: RouteSummary {
                distance_km,
                duration_min,
            },
            geometry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let point = GeoPoint::new(36.1, -115.1);
        let dist = HaversineRouter::haversine_km(point, point);
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas (36.17, -115.14) to Los Angeles (34.05, -118.24)
        // Actual distance ~370 km
        let dist = HaversineRouter::haversine_km(
            GeoPoint::new(36.17, -115.14),
            GeoPoint::new(34.05, -118.24),
        );
        assert!(dist > 350.0 && dist < 400.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_duration_from_speed() {
        let provider = HaversineRouter::new(40.0);
        // 10 km apart along the equator, roughly: 0.09 degrees of longitude.
        let route = provider
            .route_between(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0899))
            .unwrap();
        // 40 km/h means minutes = km * 1.5.
        let expected_min = route.summary.distance_km * 1.5;
        assert!((route.summary.duration_min - expected_min).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_is_the_two_endpoints() {
        let origin = GeoPoint::new(36.17, -115.14);
        let destination = GeoPoint::new(34.05, -118.24);
        let route = HaversineRouter::default()
            .route_between(origin, destination)
            .unwrap();
        let path = Polyline::decode(&route.geometry, DEFAULT_PRECISION).unwrap();
        assert_eq!(path.points(), &[origin, destination]);
    }
}
