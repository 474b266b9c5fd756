//! Client for an ip-api.com compatible IP geolocation endpoint.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::{GeolocateError, LatLng, ProviderURL};

const DEFAULT_BASE_URL: &str = "http://ip-api.com";

pub struct IpApiClient {
    client: Client,
    base_url: ProviderURL,
}

impl IpApiClient {
    pub fn new(timeout: Duration) -> Result<Self, GeolocateError> {
        Self::with_base_url(timeout, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(timeout: Duration, base_url: &str) -> Result<Self, GeolocateError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: ProviderURL::parse(base_url)?,
        })
    }

    /// Look up the approximate coordinate of a public IP address.
    ///
    /// Loopback, private and unspecified addresses are rejected without a
    /// network round trip.
    pub async fn locate(&self, ip: IpAddr) -> Result<LatLng, GeolocateError> {
        if !is_publicly_routable(&ip) {
            return Err(GeolocateError::UnroutableAddress(ip));
        }

        let url = self
            .base_url
            .append_path(&format!("json/{ip}"))
            .with_query(&[("fields", "status,message,lat,lon")])
            .into_url();

        tracing::debug!(%ip, "looking up ip location");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: IpApiResponse =
            serde_json::from_str(&body).map_err(|source| GeolocateError::Deserialize {
                context: format!("locate(ip={ip})"),
                source,
            })?;

        response.into_location(ip)
    }
}

fn is_publicly_routable(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_loopback()
                || v4.is_private()
                || v4.is_unspecified()
                || v4.is_link_local()
                || v4.is_broadcast())
        }
        IpAddr::V6(v6) => !(v6.is_loopback() || v6.is_unspecified()),
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpApiResponse {
    fn into_location(self, ip: IpAddr) -> Result<LatLng, GeolocateError> {
        match (self.status.as_str(), self.lat, self.lon) {
            ("success", Some(lat), Some(lon)) => Ok(LatLng::new(lat, lon)),
            ("success", _, _) => Err(GeolocateError::NoMatch(ip.to_string())),
            _ => {
                tracing::debug!(%ip, message = ?self.message, "ip lookup failed");
                Err(GeolocateError::NoMatch(ip.to_string()))
            }
        }
    }
}
