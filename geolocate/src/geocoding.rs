//! Client for the Google Maps Geocoding API.
//!
//! Only forward geocoding (address -> coordinate) is supported. The first
//! result is taken when Google returns several candidates.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::{GeocodedAddress, GeolocateError, LatLng, ProviderURL};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

pub struct GoogleGeocoder {
    client: Client,
    api_key: Option<String>,
    base_url: ProviderURL,
}

impl GoogleGeocoder {
    /// Creates a geocoder pointed at the production Google API.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, GeolocateError> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL)
    }

    /// Creates a geocoder with a custom base URL (used against wiremock in tests).
    pub fn with_base_url(
        api_key: Option<String>,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, GeolocateError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: ProviderURL::parse(base_url)?,
        })
    }

    pub async fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeolocateError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeolocateError::NoMatch(address.to_string()));
        }

        let mut pairs = vec![("address", address)];
        if let Some(key) = self.api_key.as_deref() {
            pairs.push(("key", key));
        }
        let url = self
            .base_url
            .append_path("geocode/json")
            .with_query(&pairs)
            .into_url();

        tracing::debug!(address, "geocoding address");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: GeocodeResponse =
            serde_json::from_str(&body).map_err(|source| GeolocateError::Deserialize {
                context: format!("geocode(address={address})"),
                source,
            })?;

        response.into_first_match(address)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

impl GeocodeResponse {
    fn into_first_match(self, address: &str) -> Result<GeocodedAddress, GeolocateError> {
        let Self {
            status,
            error_message,
            results,
        } = self;

        match status.as_str() {
            "OK" => results
                .into_iter()
                .next()
                .map(|result| GeocodedAddress {
                    formatted_address: result.formatted_address,
                    location: result.geometry.location,
                })
                .ok_or_else(|| GeolocateError::NoMatch(address.to_string())),
            "ZERO_RESULTS" => Err(GeolocateError::NoMatch(address.to_string())),
            _ => Err(GeolocateError::Provider {
                status: status.clone(),
                message: error_message.unwrap_or_default(),
            }),
        }
    }
}
