//! OSRM HTTP adapter for driving routes.

use serde::Deserialize;

use crate::geo::GeoPoint;
use crate::route::{FetchedRoute, RouteSummary};
use crate::traits::RouteProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteProvider for OsrmClient {
    fn route_between(&self, origin: GeoPoint, destination: GeoPoint) -> Option<FetchedRoute> {
        // OSRM takes lng,lat pairs; overview=full keeps the whole geometry.
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full",
            self.config.base_url,
            self.config.profile,
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        match response {
            Ok(body) => {
                let route = body.routes.unwrap_or_default().into_iter().next()?;
                Some(FetchedRoute {
                    summary: RouteSummary {
                        distance_km: route.distance / 1000.0,
                        duration_min: route.duration / 60.0,
                    },
                    geometry: route.geometry,
                })
            }
            Err(err) => {
                tracing::warn!("OSRM route request failed: {err}");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    routes: Option<Vec<OsrmRoute>>,
}

/// One route from the response; `distance` is meters, `duration` seconds,
/// `geometry` an encoded polyline at the default precision.
#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: String,
}
