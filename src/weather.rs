// Weather location for the dashboard page: configured coordinates, or a one-time geocoding lookup

use crate::config::WeatherConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CITY: &str = "Berlin";
pub const DEFAULT_LATITUDE: f64 = 52.52;
pub const DEFAULT_LONGITUDE: f64 = 13.405;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const GEOCODING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherLocation {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    latitude: f64,
    longitude: f64,
}

/// First result's coordinates from an Open-Meteo geocoding response body.
pub fn parse_geocode_response(body: &str) -> Option<(f64, f64)> {
    let parsed: GeocodeResponse = serde_json::from_str(body).ok()?;
    parsed
        .results
        .first()
        .map(|r| (r.latitude, r.longitude))
}

impl WeatherLocation {
    /// Configured coordinates if both are set, otherwise the defaults.
    pub fn from_config(cfg: &WeatherConfig) -> Self {
        let (latitude, longitude) = match (cfg.latitude, cfg.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => (DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
        };
        Self {
            city: cfg.city.clone(),
            latitude,
            longitude,
        }
    }
}

/// Resolves the location once at startup. Lookup failures keep the default coordinates.
pub async fn resolve(cfg: &WeatherConfig) -> WeatherLocation {
    let location = WeatherLocation::from_config(cfg);
    if (cfg.latitude.is_some() && cfg.longitude.is_some()) || cfg.city.trim().is_empty() {
        return location;
    }
    match geocode(&cfg.city).await {
        Ok(Some((latitude, longitude))) => {
            tracing::info!(city = %cfg.city, latitude, longitude, "geocoded weather location");
            WeatherLocation {
                latitude,
                longitude,
                ..location
            }
        }
        Ok(None) => {
            tracing::warn!(city = %cfg.city, "geocoding returned no results; using default coordinates");
            location
        }
        Err(e) => {
            tracing::warn!(city = %cfg.city, error = %e, operation = "geocode", "geocoding failed; using default coordinates");
            location
        }
    }
}

async fn geocode(city: &str) -> anyhow::Result<Option<(f64, f64)>> {
    let client = reqwest::Client::builder()
        .timeout(GEOCODING_TIMEOUT)
        .build()?;
    let body = client
        .get(GEOCODING_URL)
        .query(&[("name", city), ("count", "1")])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_geocode_response(&body))
}
