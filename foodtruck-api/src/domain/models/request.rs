use std::net::IpAddr;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use super::Vendor;
use crate::domain::SearchError;

/// Defaults and ceilings applied when a request is parsed.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of results when the caller gives no limit
    pub default_limit: usize,
    /// Hard ceiling for the store query
    pub max_limit: usize,
    /// Bound for nearest-point queries without a radius filter, in miles
    pub default_max_distance_miles: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 40,
            max_limit: 100,
            default_max_distance_miles: 10.0,
        }
    }
}

impl SearchConfig {
    /// Cap a requested limit at `max_limit`. Zero means no client limit.
    pub fn clamp_limit(&self, limit: usize) -> usize {
        match limit {
            0 => self.max_limit,
            limit => limit.min(self.max_limit),
        }
    }
}

/// Result ordering requested by the caller. Wire values are `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Distance,
    NameOrItem,
}

impl SortOrder {
    pub fn code(self) -> u8 {
        match self {
            Self::Distance => 0,
            Self::NameOrItem => 1,
        }
    }
}

impl FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Distance),
            "1" => Ok(Self::NameOrItem),
            other => Err(SearchError::invalid(format!(
                "Invalid value for sort: '{other}' (expected 0 or 1)"
            ))),
        }
    }
}

/// Raw query parameters of a nearby search, exactly as the caller sent them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub location: Option<String>,
    pub point: Option<String>,
    pub bounds: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub category_filter: Option<String>,
    pub radius_filter: Option<String>,
    pub max_distance: Option<String>,
    pub status: Option<String>,
    pub name: Option<String>,
    pub fooditems: Option<String>,
}

/// Which of the three location inputs a request uses, after disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationDescriptor {
    /// `location=current`: locate the caller by IP address.
    Current,
    /// Free-text address for the geocoder.
    Address(String),
    /// `"lat,lon"`
    Point(String),
    /// `"lat1,lon1|lat2,lon2"`
    Bounds(String),
}

impl LocationDescriptor {
    pub const CURRENT: &'static str = "current";

    /// Parameter name and raw value, as they appear in the query string.
    pub fn as_param(&self) -> (&'static str, &str) {
        match self {
            Self::Current => ("location", Self::CURRENT),
            Self::Address(address) => ("location", address),
            Self::Point(point) => ("point", point),
            Self::Bounds(bounds) => ("bounds", bounds),
        }
    }
}

/// Case-insensitive regex filter over the applicant and food-items fields.
///
/// Only exists when at least one of the two patterns was supplied; the other
/// one then matches anything.
#[derive(Debug, Clone)]
pub struct TextFilter {
    name: Option<String>,
    fooditems: Option<String>,
    name_pattern: Regex,
    fooditems_pattern: Regex,
}

impl TextFilter {
    pub fn new(
        name: Option<&str>,
        fooditems: Option<&str>,
    ) -> Result<Option<Self>, SearchError> {
        let name = pattern_text(name);
        let fooditems = pattern_text(fooditems);
        if name.is_none() && fooditems.is_none() {
            return Ok(None);
        }

        let name_pattern = compile_pattern("name", name.as_deref())?;
        let fooditems_pattern = compile_pattern("fooditems", fooditems.as_deref())?;

        Ok(Some(Self {
            name,
            fooditems,
            name_pattern,
            fooditems_pattern,
        }))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fooditems(&self) -> Option<&str> {
        self.fooditems.as_deref()
    }

    /// Both fields must match, even when only one pattern was given.
    pub fn matches(&self, vendor: &Vendor) -> bool {
        self.fooditems_pattern.is_match(&vendor.fooditems)
            && self.name_pattern.is_match(&vendor.applicant)
    }
}

fn compile_pattern(param: &str, pattern: Option<&str>) -> Result<Regex, SearchError> {
    RegexBuilder::new(pattern.unwrap_or(".*"))
        .case_insensitive(true)
        .build()
        .map_err(|e| SearchError::invalid(format!("Invalid pattern for {param}: {e}")))
}

/// A validated nearby-search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub location: Option<String>,
    pub point: Option<String>,
    pub bounds: Option<String>,
    pub limit: usize,
    pub offset: usize,
    pub sort: SortOrder,
    pub category_filter: Option<String>,
    pub radius_filter: Option<f64>,
    pub max_distance: f64,
    pub status: Option<String>,
    pub text_filter: Option<TextFilter>,
    /// Caller address, consulted only for `location=current`
    pub client_ip: Option<IpAddr>,
}

impl SearchRequest {
    /// A request with every field at its default.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            location: None,
            point: None,
            bounds: None,
            limit: config.default_limit,
            offset: 0,
            sort: SortOrder::default(),
            category_filter: None,
            radius_filter: None,
            max_distance: config.default_max_distance_miles,
            status: None,
            text_filter: None,
            client_ip: None,
        }
    }

    /// Parse raw query parameters once, at the boundary.
    ///
    /// Empty values count as absent. The limit is clamped to the configured
    /// ceiling; every other malformed value is an `InvalidParameter`.
    pub fn from_params(
        params: SearchParams,
        client_ip: Option<IpAddr>,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let mut request = Self::new(config);
        request.client_ip = client_ip;
        request.location = non_empty(params.location.as_deref());
        request.point = non_empty(params.point.as_deref());
        request.bounds = non_empty(params.bounds.as_deref());
        request.category_filter = non_empty(params.category_filter.as_deref());
        request.status = non_empty(params.status.as_deref());

        if let Some(limit) = non_empty(params.limit.as_deref()) {
            request.limit = config.clamp_limit(parse_count("limit", &limit)?);
        }
        if let Some(offset) = non_empty(params.offset.as_deref()) {
            request.offset = parse_count("offset", &offset)?;
        }
        if let Some(sort) = non_empty(params.sort.as_deref()) {
            request.sort = sort.parse()?;
        }
        if let Some(radius) = non_empty(params.radius_filter.as_deref()) {
            request.radius_filter = Some(parse_miles("radius_filter", &radius)?);
        }
        if let Some(max_distance) = non_empty(params.max_distance.as_deref()) {
            request.max_distance = parse_miles("max_distance", &max_distance)?;
        }

        request.text_filter = TextFilter::new(params.name.as_deref(), params.fooditems.as_deref())?;

        Ok(request)
    }

    /// Pick the single location input of this request.
    ///
    /// More than one of `location`, `point`, `bounds` is ambiguous; none at
    /// all means "where the caller is".
    pub fn disambiguate(&self) -> Result<LocationDescriptor, SearchError> {
        match (&self.location, &self.point, &self.bounds) {
            (None, None, None) => Ok(LocationDescriptor::Current),
            (Some(location), None, None) if location == LocationDescriptor::CURRENT => {
                Ok(LocationDescriptor::Current)
            }
            (Some(location), None, None) => Ok(LocationDescriptor::Address(location.clone())),
            (None, Some(point), None) => Ok(LocationDescriptor::Point(point.clone())),
            (None, None, Some(bounds)) => Ok(LocationDescriptor::Bounds(bounds.clone())),
            _ => Err(SearchError::invalid(
                "multiple locations specified, cannot disambiguate",
            )),
        }
    }
}

/// A validated free-text vendor-name search.
#[derive(Debug, Clone)]
pub struct NameSearchRequest {
    pub name: Option<String>,
    pub limit: usize,
}

/// Raw query parameters of a vendor-name search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameSearchParams {
    pub name: Option<String>,
    pub limit: Option<String>,
}

impl NameSearchRequest {
    pub fn from_params(params: NameSearchParams, config: &SearchConfig) -> Result<Self, SearchError> {
        let limit = match non_empty(params.limit.as_deref()) {
            Some(limit) => config.clamp_limit(parse_count("limit", &limit)?),
            None => config.default_limit,
        };

        Ok(Self {
            name: non_empty(params.name.as_deref()),
            limit,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Whitespace-only patterns count as absent, others are kept verbatim.
fn pattern_text(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn parse_count(param: &str, value: &str) -> Result<usize, SearchError> {
    value
        .parse::<usize>()
        .map_err(|_| SearchError::invalid(format!("Invalid value for {param}: '{value}'")))
}

fn parse_miles(param: &str, value: &str) -> Result<f64, SearchError> {
    match value.parse::<f64>() {
        Ok(miles) if miles.is_finite() && miles >= 0.0 => Ok(miles),
        _ => Err(SearchError::invalid(format!(
            "Invalid value for {param}: '{value}'"
        ))),
    }
}
