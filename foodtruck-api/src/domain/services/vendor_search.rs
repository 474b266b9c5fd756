use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::{fingerprint::Fingerprint, geo_query, pipeline, single_flight::SingleFlight};
use super::location_resolver::LocationResolver;
use crate::domain::{
    models::{NameSearchRequest, SearchConfig, SearchRequest, Vendor},
    ports::{
        inbound::VendorSearch,
        outbound::{Geocoder, IpLocator, QueryCache, VendorStore, VendorStoreError},
    },
    SearchError,
};

/// Implementation of the VendorSearch inbound port.
///
/// A nearby search runs disambiguate, cache check, resolve, build query,
/// fetch, pipeline and cache store in that order. Concurrent misses on the
/// same fingerprint wait for each other and then read the cached result.
pub struct VendorSearchServiceImpl<G, I, S, C> {
    resolver: LocationResolver<G, I>,
    store: Arc<S>,
    cache: Arc<C>,
    config: SearchConfig,
    flights: SingleFlight,
}

impl<G, I, S, C> VendorSearchServiceImpl<G, I, S, C>
where
    G: Geocoder,
    I: IpLocator,
    S: VendorStore,
    C: QueryCache,
{
    pub fn new(
        geocoder: Arc<G>,
        ip_locator: Arc<I>,
        store: Arc<S>,
        cache: Arc<C>,
        config: SearchConfig,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder, ip_locator),
            store,
            cache,
            config,
            flights: SingleFlight::new(),
        }
    }

    async fn cached(&self, key: &Fingerprint) -> Option<Vec<Vendor>> {
        let bytes = match self.cache.get(key.as_str()).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                error!(%key, "cache lookup failed, treating as miss: {}", e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(vendors) => Some(vendors),
            Err(e) => {
                warn!(%key, "undecodable cache entry, treating as miss: {}", e);
                None
            }
        }
    }

    async fn store_cached(&self, key: &Fingerprint, vendors: &[Vendor]) {
        let bytes = match serde_json::to_vec(vendors) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%key, "failed to encode result for cache: {}", e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key.as_str(), bytes).await {
            warn!(%key, "failed to store result in cache: {}", e);
        }
    }

    async fn compute(&self, request: &SearchRequest) -> Result<Vec<Vendor>, SearchError> {
        let location = request.disambiguate()?;
        let resolved = self.resolver.resolve(&location, request.client_ip).await?;

        let query = geo_query::build_query(&resolved, request);
        debug!(query = %query.to_document(), limit = request.limit, "querying vendor store");

        let vendors = self
            .store
            .find(&query, request.limit)
            .await
            .map_err(store_error)?;

        Ok(pipeline::apply(vendors, request, resolved.anchor()))
    }
}

#[async_trait]
impl<G, I, S, C> VendorSearch for VendorSearchServiceImpl<G, I, S, C>
where
    G: Geocoder,
    I: IpLocator,
    S: VendorStore,
    C: QueryCache,
{
    async fn search(&self, mut request: SearchRequest) -> Result<Vec<Vendor>, SearchError> {
        let location = request.disambiguate().inspect_err(|e| warn!("rejected search: {}", e))?;
        request.limit = self.config.clamp_limit(request.limit);

        let key = Fingerprint::for_search(&request, &location);
        if let Some(vendors) = self.cached(&key).await {
            info!(%key, results = vendors.len(), "cache hit");
            return Ok(vendors);
        }

        let _flight = self.flights.acquire(key.as_str()).await;
        if let Some(vendors) = self.cached(&key).await {
            info!(%key, results = vendors.len(), "cache hit after wait");
            return Ok(vendors);
        }
        info!(%key, "cache miss");

        let vendors = self.compute(&request).await?;
        self.store_cached(&key, &vendors).await;

        Ok(vendors)
    }

    async fn search_by_name(&self, request: NameSearchRequest) -> Result<Vec<Vendor>, SearchError> {
        let Some(name) = request.name.as_deref() else {
            warn!("rejected name search without a name");
            return Err(SearchError::missing("name field is missing in query"));
        };
        let limit = self.config.clamp_limit(request.limit);

        let key = Fingerprint::for_name(name, limit);
        if let Some(vendors) = self.cached(&key).await {
            info!(%key, results = vendors.len(), "cache hit");
            return Ok(vendors);
        }

        let _flight = self.flights.acquire(key.as_str()).await;
        if let Some(vendors) = self.cached(&key).await {
            info!(%key, results = vendors.len(), "cache hit after wait");
            return Ok(vendors);
        }
        info!(%key, "cache miss");

        let vendors = self
            .store
            .text_search(name, limit)
            .await
            .map_err(store_error)?;
        self.store_cached(&key, &vendors).await;

        Ok(vendors)
    }
}

fn store_error(err: VendorStoreError) -> SearchError {
    error!("vendor store query failed: {}", err);
    SearchError::internal("Error querying database")
}
