//! Route presentation: fetched route data composed with decoded geometry
//! and a display viewport.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::polyline::{DEFAULT_PRECISION, DecodeError, Polyline};
use crate::traits::RouteProvider;
use crate::viewport::Viewport;

/// Distance and drive-time estimate for one route request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
}

/// What a [`RouteProvider`] returns: the summary plus the still-encoded
/// path geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRoute {
    pub summary: RouteSummary,
    pub geometry: String,
}

/// Everything the map layer needs to show one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteView {
    /// Absent when there is no route to summarize.
    pub summary: Option<RouteSummary>,
    /// Empty when there is no route to draw.
    pub path: Polyline,
    pub viewport: Viewport,
}

impl RouteView {
    /// The "no route" view: nothing to draw, fallback viewport applied.
    fn absent(fallback: Viewport) -> Self {
        Self {
            summary: None,
            path: Polyline::new(Vec::new()),
            viewport: fallback,
        }
    }
}

/// Fetches, decodes, and frames the route between two picked points.
///
/// With both endpoints present the provider is queried once; its geometry
/// is decoded at the default precision and the viewport is planned from
/// the endpoints and the fetched distance. A missing endpoint or a
/// no-route answer yields the fallback view.
///
/// Decode failures propagate: a corrupt path is a visible rendering
/// defect and the caller decides how to surface it.
pub fn route_view<P: RouteProvider>(
    provider: &P,
    origin: Option<GeoPoint>,
    destination: Option<GeoPoint>,
    fallback: Viewport,
) -> Result<RouteView, DecodeError> {
    let (origin, destination) = match (origin, destination) {
        (Some(origin), Some(destination)) => (origin, destination),
        _ => return Ok(RouteView::absent(fallback)),
    };

    let Some(fetched) = provider.route_between(origin, destination) else {
        return Ok(RouteView::absent(fallback));
    };

    let path = Polyline::decode(&fetched.geometry, DEFAULT_PRECISION)?;
    let viewport = Viewport::plan(
        Some(origin),
        Some(destination),
        Some(fetched.summary.distance_km),
        fallback,
    );

    Ok(RouteView {
        summary: Some(fetched.summary),
        path,
        viewport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRoute(Option<FetchedRoute>);

    impl RouteProvider for FixedRoute {
        fn route_between(&self, _origin: GeoPoint, _destination: GeoPoint) -> Option<FetchedRoute> {
            self.0.clone()
        }
    }

    fn fallback() -> Viewport {
        Viewport::new(GeoPoint::new(20.5937, 78.9629), 5)
    }

    #[test]
    fn test_missing_endpoint_yields_fallback_view() {
        let provider = FixedRoute(Some(FetchedRoute {
            summary: RouteSummary {
                distance_km: 12.0,
                duration_min: 20.0,
            },
            geometry: "_p~iF~ps|U".to_string(),
        }));

        let view = route_view(&provider, None, Some(GeoPoint::new(1.0, 1.0)), fallback()).unwrap();
        assert!(view.summary.is_none());
        assert!(view.path.is_empty());
        assert_eq!(view.viewport, fallback());
    }

    #[test]
    fn test_no_route_yields_fallback_view() {
        let provider = FixedRoute(None);
        let view = route_view(
            &provider,
            Some(GeoPoint::new(0.0, 0.0)),
            Some(GeoPoint::new(1.0, 1.0)),
            fallback(),
        )
        .unwrap();
        assert!(view.summary.is_none());
        assert!(view.path.is_empty());
        assert_eq!(view.viewport, fallback());
    }

    #[test]
    fn test_corrupt_geometry_propagates() {
        let provider = FixedRoute(Some(FetchedRoute {
            summary: RouteSummary {
                distance_km: 12.0,
                duration_min: 20.0,
            },
            geometry: "_p~iF\u{7}".to_string(),
        }));

        let err = route_view(
            &provider,
            Some(GeoPoint::new(0.0, 0.0)),
            Some(GeoPoint::new(1.0, 1.0)),
            fallback(),
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidCharacter { .. }));
    }
}
