use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{Vendor, VendorQuery};

#[derive(Debug, Error)]
pub enum VendorStoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("fixture error: {0}")]
    Fixture(String),
}

impl From<sqlx::Error> for VendorStoreError {
    fn from(e: sqlx::Error) -> Self {
        VendorStoreError::Database(e.to_string())
    }
}

/// Outbound port over the vendor collection.
///
/// Results come back in whatever order the store produces; only nearest
/// queries carry an inherent (ascending proximity) order.
#[async_trait]
pub trait VendorStore: Send + Sync + 'static {
    /// Execute a geospatial query, returning at most `limit` vendors.
    async fn find(&self, query: &VendorQuery, limit: usize)
        -> Result<Vec<Vendor>, VendorStoreError>;

    /// Full-text search over vendor names and food items, best match first.
    async fn text_search(&self, name: &str, limit: usize) -> Result<Vec<Vendor>, VendorStoreError>;
}
