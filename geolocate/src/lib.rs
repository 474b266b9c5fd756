//! HTTP clients for turning addresses and IP addresses into coordinates.
//!
//! - [`GoogleGeocoder`] talks to the Google Maps Geocoding API.
//! - [`IpApiClient`] talks to an ip-api.com compatible JSON endpoint.

mod error;
mod geocoding;
mod ip_lookup;
mod provider_url;
mod types;

pub(crate) use provider_url::*;

pub use error::GeolocateError;
pub use geocoding::GoogleGeocoder;
pub use ip_lookup::IpApiClient;
pub use types::{GeocodedAddress, LatLng};
