use serde::{Deserialize, Serialize};

/// A WGS84 coordinate as returned by the providers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A geocoded address: the provider's canonical spelling plus its coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub formatted_address: String,
    pub location: LatLng,
}
