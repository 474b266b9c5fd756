use std::net::IpAddr;

use async_trait::async_trait;

use crate::domain::{
    models::Coordinate,
    ports::outbound::{Geocoder, IpLocator, LocationLookupError},
};

/// Adapter that wraps the Google geocoding client to implement the Geocoder port.
pub struct GoogleGeocoderAdapter {
    client: geolocate::GoogleGeocoder,
}

impl GoogleGeocoderAdapter {
    pub fn new(client: geolocate::GoogleGeocoder) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoderAdapter {
    async fn geocode(&self, address: &str) -> Result<Coordinate, LocationLookupError> {
        let found = self
            .client
            .geocode(address)
            .await
            .map_err(|e| map_geolocate_error(address, e))?;
        tracing::debug!(
            address,
            formatted = %found.formatted_address,
            "geocoded address"
        );
        Ok(Coordinate::from(found.location))
    }
}

/// Adapter that wraps the ip-api client to implement the IpLocator port.
pub struct IpApiLocatorAdapter {
    client: geolocate::IpApiClient,
}

impl IpApiLocatorAdapter {
    pub fn new(client: geolocate::IpApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IpLocator for IpApiLocatorAdapter {
    async fn locate(&self, ip: IpAddr) -> Result<Coordinate, LocationLookupError> {
        let location = self
            .client
            .locate(ip)
            .await
            .map_err(|e| map_geolocate_error(&ip.to_string(), e))?;
        Ok(Coordinate::from(location))
    }
}

fn map_geolocate_error(input: &str, e: geolocate::GeolocateError) -> LocationLookupError {
    if e.is_no_match() {
        LocationLookupError::NotFound(input.to_string())
    } else {
        LocationLookupError::Unavailable(e.to_string())
    }
}
