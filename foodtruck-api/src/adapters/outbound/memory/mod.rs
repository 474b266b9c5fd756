//! Vendor store over an in-memory list, loaded from a JSON fixture.
//!
//! Evaluates the same predicates as the PostgreSQL store. Used for local
//! development without a database and as the store in service tests.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use itertools::Itertools;

use crate::domain::{
    models::{Coordinate, GeoPredicate, Vendor, VendorQuery},
    ports::outbound::{VendorStore, VendorStoreError},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryVendorStore {
    vendors: Arc<Vec<Vendor>>,
}

impl MemoryVendorStore {
    pub fn new(vendors: Vec<Vendor>) -> Self {
        Self {
            vendors: Arc::new(vendors),
        }
    }

    /// Load vendors from a JSON array of store records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VendorStoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| VendorStoreError::Fixture(format!("{}: {}", path.display(), e)))?;
        let vendors: Vec<Vendor> = serde_json::from_str(&raw)
            .map_err(|e| VendorStoreError::Fixture(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), vendors = vendors.len(), "loaded vendor fixture");
        Ok(Self::new(vendors))
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

#[async_trait]
impl VendorStore for MemoryVendorStore {
    async fn find(&self, query: &VendorQuery, limit: usize) -> Result<Vec<Vendor>, VendorStoreError> {
        let candidates = self
            .vendors
            .iter()
            .filter(|v| matches_filters(v, query));

        let vendors = match query.predicate {
            GeoPredicate::WithinBox { corners } => {
                let (a, b) = (Coordinate::from(corners[0]), Coordinate::from(corners[1]));
                candidates
                    .filter(|v| within_box(&v.coordinate(), &a, &b))
                    .take(limit)
                    .cloned()
                    .collect()
            }
            GeoPredicate::WithinSphere {
                center,
                radius_radians,
            } => {
                let center = Coordinate::from(center);
                candidates
                    .filter(|v| center.central_angle(&v.coordinate()) <= radius_radians)
                    .take(limit)
                    .cloned()
                    .collect()
            }
            GeoPredicate::Near {
                center,
                max_distance_degrees,
            } => {
                let center = Coordinate::from(center);
                candidates
                    .map(|v| (center.planar_degrees(&v.coordinate()), v))
                    .filter(|(degrees, _)| *degrees <= max_distance_degrees)
                    .sorted_by(|(a, _), (b, _)| a.total_cmp(b))
                    .take(limit)
                    .map(|(_, v)| v.clone())
                    .collect()
            }
        };

        Ok(vendors)
    }

    async fn text_search(&self, name: &str, limit: usize) -> Result<Vec<Vendor>, VendorStoreError> {
        let terms: Vec<String> = name.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        // Rank by how many terms hit the applicant name, ties keep fixture order.
        let vendors = self
            .vendors
            .iter()
            .filter_map(|v| {
                let applicant = v.applicant.to_lowercase();
                let fooditems = v.fooditems.to_lowercase();
                let all_found = terms
                    .iter()
                    .all(|t| applicant.contains(t.as_str()) || fooditems.contains(t.as_str()));
                all_found.then(|| {
                    let rank = terms.iter().filter(|t| applicant.contains(t.as_str())).count();
                    (rank, v)
                })
            })
            .sorted_by(|(a, _), (b, _)| b.cmp(a))
            .take(limit)
            .map(|(_, v)| v.clone())
            .collect();

        Ok(vendors)
    }
}

fn matches_filters(vendor: &Vendor, query: &VendorQuery) -> bool {
    query
        .facility_type
        .as_deref()
        .is_none_or(|t| vendor.facilitytype == t)
        && query.status.as_deref().is_none_or(|s| vendor.status == s)
}

fn within_box(point: &Coordinate, a: &Coordinate, b: &Coordinate) -> bool {
    let (south, north) = (a.latitude.min(b.latitude), a.latitude.max(b.latitude));
    let (west, east) = (a.longitude.min(b.longitude), a.longitude.max(b.longitude));
    (south..=north).contains(&point.latitude) && (west..=east).contains(&point.longitude)
}
