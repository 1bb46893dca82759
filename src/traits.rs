//! Provider seams for the external routing and geocoding services.
//!
//! These are intentionally minimal. The HTTP adapters implement them for
//! the real services; tests implement them with canned data.

use crate::geo::GeoPoint;
use crate::route::FetchedRoute;

/// Supplies a driving route between two points.
pub trait RouteProvider {
    /// Returns the route, or `None` when there is no route.
    ///
    /// A fetch failure and a genuine no-route answer are the same signal:
    /// callers show "no route" and fall back to their default view, never
    /// retry here.
    fn route_between(&self, origin: GeoPoint, destination: GeoPoint) -> Option<FetchedRoute>;
}

/// One forward- or reverse-geocoding candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub display_name: String,
    pub point: GeoPoint,
}

/// Resolves free-text addresses and coordinates against a geocoding service.
pub trait Geocoder {
    /// Candidates for a free-text query, best match first. Empty on
    /// failure or when nothing matches.
    fn search(&self, query: &str) -> Vec<GeocodeMatch>;

    /// The address at a coordinate, if the service knows one.
    fn reverse(&self, point: GeoPoint) -> Option<GeocodeMatch>;
}
