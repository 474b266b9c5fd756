use std::net::IpAddr;

use thiserror::Error;

/// Errors returned by the geocoding and IP geolocation clients.
#[derive(Error, Debug)]
pub enum GeolocateError {
    /// Network or TLS failure, or a non-2xx status from the provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but found nothing for the input.
    #[error("no match for '{0}'")]
    NoMatch(String),

    /// The provider reported an error status (quota, denied key, ...).
    #[error("provider error {status}: {message}")]
    Provider { status: String, message: String },

    /// The address is not publicly routable and can never be located.
    #[error("address {0} is not publicly routable")]
    UnroutableAddress(IpAddr),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GeolocateError {
    /// True when the input itself could not be located, as opposed to the
    /// provider being unreachable or misconfigured.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch(_) | Self::UnroutableAddress(_))
    }
}
