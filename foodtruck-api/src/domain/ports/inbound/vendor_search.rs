use async_trait::async_trait;

use crate::domain::{
    models::{NameSearchRequest, SearchRequest, Vendor},
    SearchError,
};

/// Inbound port for vendor searches.
///
/// This trait defines the use cases that HTTP handlers can invoke.
#[async_trait]
pub trait VendorSearch: Send + Sync + 'static {
    /// Find vendors around a location, filtered, sorted and paginated.
    async fn search(&self, request: SearchRequest) -> Result<Vec<Vendor>, SearchError>;

    /// Find vendors by free-text name.
    async fn search_by_name(&self, request: NameSearchRequest)
        -> Result<Vec<Vendor>, SearchError>;
}
