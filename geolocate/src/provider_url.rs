use reqwest::Url;

use crate::GeolocateError;

/// Base URL of a location provider, normalised so paths append instead of replace.
#[derive(Debug, Clone)]
pub struct ProviderURL(Url);

impl AsRef<str> for ProviderURL {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl ProviderURL {
    pub fn parse(base_url: &str) -> Result<Self, GeolocateError> {
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let url = Url::parse(&normalised).map_err(|e| GeolocateError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(url))
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let mut url = self.0.clone();
        let trimmed_path = path.trim_start_matches('/');
        let joined = format!("{}{}", url.path(), trimmed_path);
        url.set_path(&joined);
        Self(url)
    }

    /// Append url-encoded query pairs.
    pub fn with_query(&self, pairs: &[(&str, &str)]) -> Self {
        let mut url = self.0.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        Self(url)
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}
