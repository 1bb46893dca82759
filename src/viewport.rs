//! Map viewport planning from an origin/destination pair.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// The map's visible region: a center coordinate and a discrete zoom level.
///
/// Derived, never persisted. Callers keep the current viewport and feed it
/// back in as the `fallback` on the next [`Viewport::plan`] call; that is
/// how "keep the previous zoom" works without hidden state here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// Picks a center and zoom for displaying the two endpoints with the
    /// route visible.
    ///
    /// Rules, in order:
    /// 1. Both points present: center is their arithmetic midpoint.
    /// 2. `distance_km` present: zoom from the threshold table, largest
    ///    band first. Zero and negative distances land in the closest band.
    /// 3. `distance_km` absent but both points present: zoom stays at
    ///    `fallback.zoom`.
    /// 4. Either point absent: `fallback` is returned unchanged, whatever
    ///    else was supplied.
    ///
    /// Total function; every input combination maps to a viewport.
    pub fn plan(
        origin: Option<GeoPoint>,
        destination: Option<GeoPoint>,
        distance_km: Option<f64>,
        fallback: Viewport,
    ) -> Viewport {
        let (origin, destination) = match (origin, destination) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => return fallback,
        };

        Viewport {
            center: origin.midpoint(&destination),
            zoom: match distance_km {
                Some(distance) => zoom_for_distance(distance),
                None => fallback.zoom,
            },
        }
    }
}

/// Zoom band for a route distance in kilometers.
///
/// Bands are exclusive at the lower edge: exactly 1000 km falls into the
/// `>500` band.
fn zoom_for_distance(distance_km: f64) -> u8 {
    if distance_km > 1000.0 {
        5
    } else if distance_km > 500.0 {
        6
    } else if distance_km > 200.0 {
        7
    } else if distance_km > 100.0 {
        8
    } else if distance_km > 50.0 {
        9
    } else if distance_km > 20.0 {
        10
    } else if distance_km > 10.0 {
        11
    } else {
        12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> Viewport {
        // A nationwide default view, as the calling layer would configure.
        Viewport::new(GeoPoint::new(20.5937, 78.9629), 5)
    }

    #[test]
    fn test_center_is_midpoint() {
        let planned = Viewport::plan(
            Some(GeoPoint::new(0.0, 0.0)),
            Some(GeoPoint::new(10.0, 20.0)),
            None,
            fallback(),
        );
        assert_eq!(planned.center, GeoPoint::new(5.0, 10.0));
    }

    #[test]
    fn test_zoom_bands() {
        let origin = Some(GeoPoint::new(36.17, -115.14));
        let destination = Some(GeoPoint::new(34.05, -118.24));
        let cases = [
            (1500.0, 5),
            (1000.1, 5),
            (1000.0, 6), // boundary is exclusive
            (500.5, 6),
            (350.0, 7),
            (150.0, 8),
            (75.0, 9),
            (30.0, 10),
            (10.5, 11),
            (10.0, 12),
            (2.0, 12),
            (0.0, 12),
            (-3.0, 12),
        ];
        for (distance, expected) in cases {
            let planned = Viewport::plan(origin, destination, Some(distance), fallback());
            assert_eq!(planned.zoom, expected, "distance {distance}");
        }
    }

    #[test]
    fn test_missing_distance_keeps_previous_zoom() {
        let previous = Viewport::new(GeoPoint::new(50.0, 60.0), 9);
        let planned = Viewport::plan(
            Some(GeoPoint::new(0.0, 0.0)),
            Some(GeoPoint::new(2.0, 2.0)),
            None,
            previous,
        );
        assert_eq!(planned.zoom, 9);
        assert_eq!(planned.center, GeoPoint::new(1.0, 1.0));
    }

    #[test]
    fn test_missing_point_returns_fallback() {
        let planned = Viewport::plan(
            None,
            Some(GeoPoint::new(10.0, 20.0)),
            Some(100.0),
            fallback(),
        );
        assert_eq!(planned, fallback());

        let planned = Viewport::plan(Some(GeoPoint::new(10.0, 20.0)), None, None, fallback());
        assert_eq!(planned, fallback());

        let planned = Viewport::plan(None, None, Some(5.0), fallback());
        assert_eq!(planned, fallback());
    }
}
