use std::net::IpAddr;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::{
    models::{Coordinate, LocationDescriptor, ResolvedLocation},
    ports::outbound::{Geocoder, IpLocator, LocationLookupError},
    SearchError,
};

const UNABLE_TO_FIND_LOCATION: &str = "Unable to find location";

/// Turns a location descriptor into coordinates.
///
/// Addresses go to the geocoder, `current` goes to the IP locator, points
/// and boxes are parsed locally. Parsed coordinates are not range checked.
pub struct LocationResolver<G, I> {
    geocoder: Arc<G>,
    ip_locator: Arc<I>,
}

impl<G: Geocoder, I: IpLocator> LocationResolver<G, I> {
    pub fn new(geocoder: Arc<G>, ip_locator: Arc<I>) -> Self {
        Self {
            geocoder,
            ip_locator,
        }
    }

    pub async fn resolve(
        &self,
        descriptor: &LocationDescriptor,
        client_ip: Option<IpAddr>,
    ) -> Result<ResolvedLocation, SearchError> {
        debug!(?descriptor, "resolving location");

        match descriptor {
            LocationDescriptor::Current => {
                let Some(ip) = client_ip else {
                    warn!("location=current without a caller address");
                    return Err(SearchError::invalid(UNABLE_TO_FIND_LOCATION));
                };
                let point = self
                    .ip_locator
                    .locate(ip)
                    .await
                    .map_err(|e| lookup_error(&ip.to_string(), e))?;
                Ok(ResolvedLocation::Point(point))
            }
            LocationDescriptor::Address(address) => {
                let point = self
                    .geocoder
                    .geocode(address)
                    .await
                    .map_err(|e| lookup_error(address, e))?;
                Ok(ResolvedLocation::Point(point))
            }
            LocationDescriptor::Point(point) => Ok(ResolvedLocation::Point(parse_point(point)?)),
            LocationDescriptor::Bounds(bounds) => Ok(ResolvedLocation::Box(parse_bounds(bounds)?)),
        }
    }
}

fn lookup_error(input: &str, err: LocationLookupError) -> SearchError {
    match err {
        LocationLookupError::NotFound(_) => {
            warn!(input, "unable to find location: {}", err);
            SearchError::invalid(UNABLE_TO_FIND_LOCATION)
        }
        LocationLookupError::Unavailable(_) => {
            error!(input, "location lookup failed: {}", err);
            SearchError::internal("Error resolving location")
        }
    }
}

/// Parse `"lat,lon"`.
pub fn parse_point(text: &str) -> Result<Coordinate, SearchError> {
    let mut parts = text.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lat), Some(lon), None) => Ok(Coordinate::new(
            parse_degrees(lat, text)?,
            parse_degrees(lon, text)?,
        )),
        _ => Err(malformed(text)),
    }
}

/// Parse `"lat1,lon1|lat2,lon2"` into its two corners.
pub fn parse_bounds(text: &str) -> Result<[Coordinate; 2], SearchError> {
    let mut corners = text.split('|');
    match (corners.next(), corners.next(), corners.next()) {
        (Some(first), Some(second), None) => Ok([parse_point(first)?, parse_point(second)?]),
        _ => Err(malformed(text)),
    }
}

fn parse_degrees(value: &str, text: &str) -> Result<f64, SearchError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|degrees| degrees.is_finite())
        .ok_or_else(|| malformed(text))
}

fn malformed(text: &str) -> SearchError {
    debug!(text, "malformed coordinates");
    SearchError::invalid(UNABLE_TO_FIND_LOCATION)
}
