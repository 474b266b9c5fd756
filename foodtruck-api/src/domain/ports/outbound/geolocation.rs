use std::net::IpAddr;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::Coordinate;

/// Why a location lookup produced no coordinate.
#[derive(Debug, Error)]
pub enum LocationLookupError {
    /// The input is well-formed but the provider knows no such place.
    #[error("no location found for '{0}'")]
    NotFound(String),
    /// The provider could not be reached or refused to answer.
    #[error("location provider unavailable: {0}")]
    Unavailable(String),
}

/// Outbound port for forward geocoding (free-text address -> coordinate).
#[async_trait]
pub trait Geocoder: Send + Sync + 'static {
    async fn geocode(&self, address: &str) -> Result<Coordinate, LocationLookupError>;
}

/// Outbound port for IP geolocation.
#[async_trait]
pub trait IpLocator: Send + Sync + 'static {
    async fn locate(&self, ip: IpAddr) -> Result<Coordinate, LocationLookupError>;
}
