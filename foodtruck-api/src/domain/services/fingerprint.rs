use std::collections::BTreeMap;
use std::fmt;

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::domain::models::{LocationDescriptor, SearchRequest};

const SEARCH_PREFIX: &str = "foodtruck:search:";
const NAME_PREFIX: &str = "foodtruck:name:";

/// Cache key of a request: a prefixed SHA-256 over its resolved parameters.
///
/// Parameters are collected into a sorted map before hashing, so the order
/// in which the caller sent them never changes the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn for_search(request: &SearchRequest, location: &LocationDescriptor) -> Self {
        let mut params: BTreeMap<&str, Value> = BTreeMap::new();

        let (param, value) = location.as_param();
        params.insert(param, json!(value));
        if *location == LocationDescriptor::Current {
            // Two callers asking for "current" are in different places.
            params.insert("client_ip", json!(request.client_ip.map(|ip| ip.to_string())));
        }

        params.insert("limit", json!(request.limit));
        params.insert("offset", json!(request.offset));
        params.insert("sort", json!(request.sort.code()));
        params.insert("max_distance", json!(request.max_distance));
        params.insert("radius_filter", json!(request.radius_filter));
        params.insert("category_filter", json!(request.category_filter));
        params.insert("status", json!(request.status));
        params.insert(
            "name",
            json!(request.text_filter.as_ref().and_then(|f| f.name())),
        );
        params.insert(
            "fooditems",
            json!(request.text_filter.as_ref().and_then(|f| f.fooditems())),
        );

        Self::hash(SEARCH_PREFIX, params)
    }

    pub fn for_name(name: &str, limit: usize) -> Self {
        let params = BTreeMap::from([("limit", json!(limit)), ("name", json!(name))]);
        Self::hash(NAME_PREFIX, params)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn hash(prefix: &str, params: BTreeMap<&str, Value>) -> Self {
        let canonical = Value::Object(
            params
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
        .to_string();

        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Self(format!("{prefix}{:x}", hasher.finalize()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{SearchConfig, SearchParams};

    fn request(json: &str, ip: Option<&str>) -> SearchRequest {
        let params: SearchParams = serde_json::from_str(json).unwrap();
        SearchRequest::from_params(
            params,
            ip.map(|ip| ip.parse().unwrap()),
            &SearchConfig::default(),
        )
        .unwrap()
    }

    fn fingerprint(json: &str, ip: Option<&str>) -> Fingerprint {
        let request = request(json, ip);
        let location = request.disambiguate().unwrap();
        Fingerprint::for_search(&request, &location)
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = fingerprint(
            r#"{"point": "37.7,-122.4", "limit": "10", "status": "APPROVED", "name": "taco"}"#,
            None,
        );
        let b = fingerprint(
            r#"{"name": "taco", "status": "APPROVED", "limit": "10", "point": "37.7,-122.4"}"#,
            None,
        );
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("foodtruck:search:"));
        assert_eq!(a.as_str().len(), "foodtruck:search:".len() + 64);
    }

    #[test]
    fn every_parameter_contributes() {
        let base = fingerprint(r#"{"point": "37.7,-122.4"}"#, None);
        for json in [
            r#"{"point": "37.7,-122.5"}"#,
            r#"{"point": "37.7,-122.4", "limit": "10"}"#,
            r#"{"point": "37.7,-122.4", "offset": "1"}"#,
            r#"{"point": "37.7,-122.4", "sort": "1"}"#,
            r#"{"point": "37.7,-122.4", "radius_filter": "1"}"#,
            r#"{"point": "37.7,-122.4", "max_distance": "2"}"#,
            r#"{"point": "37.7,-122.4", "category_filter": "Truck"}"#,
            r#"{"point": "37.7,-122.4", "status": "APPROVED"}"#,
            r#"{"point": "37.7,-122.4", "fooditems": "taco"}"#,
            r#"{"bounds": "37.7,-122.4|37.8,-122.3"}"#,
        ] {
            assert_ne!(base, fingerprint(json, None), "{json}");
        }
    }

    #[test]
    fn effective_values_are_hashed() {
        assert_eq!(
            fingerprint(r#"{"point": "1,2", "limit": "150"}"#, None),
            fingerprint(r#"{"point": "1,2", "limit": "100"}"#, None),
        );
        assert_eq!(
            fingerprint(r#"{"point": "1,2"}"#, None),
            fingerprint(r#"{"point": "1,2", "limit": "40", "sort": "0"}"#, None),
        );
    }

    #[test]
    fn current_location_includes_caller() {
        let here = fingerprint(r#"{}"#, Some("8.8.8.8"));
        let there = fingerprint(r#"{"location": "current"}"#, Some("1.1.1.1"));
        assert_ne!(here, there);
        assert_eq!(here, fingerprint(r#"{"location": "current"}"#, Some("8.8.8.8")));
    }

    #[test]
    fn caller_ignored_for_explicit_locations() {
        assert_eq!(
            fingerprint(r#"{"point": "1,2"}"#, Some("8.8.8.8")),
            fingerprint(r#"{"point": "1,2"}"#, Some("1.1.1.1")),
        );
    }

    #[test]
    fn name_fingerprints_are_namespaced() {
        let key = Fingerprint::for_name("taco", 40);
        assert!(key.as_str().starts_with("foodtruck:name:"));
        assert_ne!(key, Fingerprint::for_name("taco", 10));
        assert_eq!(key, Fingerprint::for_name("taco", 40));
    }
}
