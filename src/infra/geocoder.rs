//! Geocoding adapter.
//!
//! Resolves a free-text postal address to coordinates via the Google
//! Maps Geocoding API. The adapter owns transport details only: request
//! serialization, a bounded timeout, and JSON decoding into the domain
//! coordinate type.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{Config, GEOCODER_ENDPOINT, GEOCODER_TIMEOUT_SECONDS};
use crate::domain::Coordinates;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Geocoder trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve an address to coordinates.
    ///
    /// Fails with `AddressNotFound` when the upstream resolver reports
    /// no match. No retries.
    async fn resolve(&self, address: &str) -> AppResult<Coordinates>;
}

/// Wire representation of the Google geocoding response
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

/// Map the upstream response to coordinates, treating an empty result
/// set the same as an explicit ZERO_RESULTS status
fn coordinates_from(data: GeocodeResponse) -> AppResult<Coordinates> {
    if data.status == "ZERO_RESULTS" {
        return Err(AppError::AddressNotFound);
    }

    data.results
        .into_iter()
        .next()
        .map(|result| result.geometry.location)
        .ok_or(AppError::AddressNotFound)
}

/// Google Maps implementation of the Geocoder
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    /// Build a geocoder with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(GEOCODER_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            client,
            endpoint: GEOCODER_ENDPOINT.to_string(),
            api_key: config.maps_api_key.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn resolve(&self, address: &str) -> AppResult<Coordinates> {
        // A blank address can never resolve; skip the round trip
        if address.trim().is_empty() {
            return Err(AppError::AddressNotFound);
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let data: GeocodeResponse = response.json().await?;
        coordinates_from(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_geocoder() -> GoogleGeocoder {
        GoogleGeocoder {
            client: Client::new(),
            endpoint: GEOCODER_ENDPOINT.to_string(),
            api_key: "test-key".to_string(),
        }
    }

    #[tokio::test]
    async fn blank_address_fails_without_a_network_call() {
        let geocoder = test_geocoder();

        let result = geocoder.resolve("").await;
        assert!(matches!(result, Err(AppError::AddressNotFound)));

        let result = geocoder.resolve("   ").await;
        assert!(matches!(result, Err(AppError::AddressNotFound)));
    }

    #[test]
    fn parses_a_successful_response() {
        let body = r#"{
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 37.4224, "lng": -122.0841}}}
            ]
        }"#;

        let data: GeocodeResponse = serde_json::from_str(body).unwrap();
        let coords = coordinates_from(data).unwrap();
        assert_eq!(coords.lat, 37.4224);
        assert_eq!(coords.lng, -122.0841);
    }

    #[test]
    fn zero_results_maps_to_address_not_found() {
        let body = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        let data: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            coordinates_from(data),
            Err(AppError::AddressNotFound)
        ));
    }

    #[test]
    fn ok_status_with_no_results_maps_to_address_not_found() {
        let body = r#"{"status": "OK", "results": []}"#;
        let data: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            coordinates_from(data),
            Err(AppError::AddressNotFound)
        ));
    }
}
