//! Nominatim HTTP adapter for forward and reverse geocoding.

use serde::Deserialize;

use crate::geo::GeoPoint;
use crate::traits::{GeocodeMatch, Geocoder};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying User-Agent.
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_results: usize,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("route-mapper/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            max_results: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn search(&self, query: &str) -> Vec<GeocodeMatch> {
        let url = format!("{}/search", self.config.base_url);
        let limit = self.config.max_results.to_string();

        let response = self
            .client
            .get(url)
            .query(&[("q", query), ("format", "json"), ("limit", limit.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>());

        match response {
            Ok(places) => places.into_iter().filter_map(NominatimPlace::into_match).collect(),
            Err(err) => {
                tracing::warn!("Nominatim search failed for {query:?}: {err}");
                Vec::new()
            }
        }
    }

    fn reverse(&self, point: GeoPoint) -> Option<GeocodeMatch> {
        let url = format!("{}/reverse", self.config.base_url);
        let lat = format!("{:.6}", point.lat);
        let lon = format!("{:.6}", point.lng);

        let response = self
            .client
            .get(url)
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str()), ("format", "json")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<NominatimPlace>());

        match response {
            Ok(place) => place.into_match(),
            Err(err) => {
                tracing::warn!("Nominatim reverse lookup failed: {err}");
                None
            }
        }
    }
}

/// Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

impl NominatimPlace {
    /// Drops candidates with unparseable or out-of-range coordinates.
    fn into_match(self) -> Option<GeocodeMatch> {
        let lat = self.lat.parse::<f64>().ok()?;
        let lng = self.lon.parse::<f64>().ok()?;
        let point = GeoPoint::new(lat, lng);
        if !point.in_bounds() {
            tracing::debug!("discarding out-of-bounds candidate {:?}", self.display_name);
            return None;
        }
        Some(GeocodeMatch {
            display_name: self.display_name,
            point,
        })
    }
}
