//! Composition root: the only place that picks concrete outbound adapters.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::info;

use crate::{
    adapters::outbound::{
        cache::MokaQueryCache,
        geolocation::{GoogleGeocoderAdapter, IpApiLocatorAdapter},
        memory::MemoryVendorStore,
        postgres::PgVendorStore,
    },
    app_state::AppState,
    config::{Settings, StoreBackend},
    domain::{
        models::SearchConfig,
        ports::{inbound::VendorSearch, outbound::VendorStoreError},
        services::VendorSearchServiceImpl,
    },
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build location client: {0}")]
    Geolocate(#[from] geolocate::GeolocateError),
    #[error("failed to prepare vendor store: {0}")]
    Store(#[from] VendorStoreError),
    #[error("store backend is 'memory' but store.fixture_path is not set")]
    MissingFixture,
}

pub async fn build_app_state(settings: &Settings) -> Result<AppState, StartupError> {
    let search_config = SearchConfig::from(&settings.search);
    let vendor_search = build_vendor_search(settings, search_config.clone()).await?;
    Ok(AppState::new(vendor_search, search_config))
}

async fn build_vendor_search(
    settings: &Settings,
    search_config: SearchConfig,
) -> Result<Arc<dyn VendorSearch>, StartupError> {
    let geocoder = Arc::new(GoogleGeocoderAdapter::new(build_geocoder(settings)?));
    let ip_locator = Arc::new(IpApiLocatorAdapter::new(build_ip_client(settings)?));
    let cache = Arc::new(MokaQueryCache::new(
        settings.cache.max_capacity,
        settings.cache.time_to_live(),
    ));

    let service: Arc<dyn VendorSearch> = match settings.store.backend {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .acquire_timeout(Duration::from_secs(2))
                .connect_lazy_with(settings.database.with_db());
            let store = PgVendorStore::new(pool);
            store.migrate().await?;
            info!(host = %settings.database.host, "using postgres vendor store");

            Arc::new(VendorSearchServiceImpl::new(
                geocoder,
                ip_locator,
                Arc::new(store),
                cache,
                search_config,
            ))
        }
        StoreBackend::Memory => {
            let path = settings
                .store
                .fixture_path
                .as_ref()
                .ok_or(StartupError::MissingFixture)?;
            let store = MemoryVendorStore::from_json_file(path)?;
            info!(vendors = store.len(), "using in-memory vendor store");

            Arc::new(VendorSearchServiceImpl::new(
                geocoder,
                ip_locator,
                Arc::new(store),
                cache,
                search_config,
            ))
        }
    };

    Ok(service)
}

fn build_geocoder(settings: &Settings) -> Result<geolocate::GoogleGeocoder, geolocate::GeolocateError> {
    let geocoding = &settings.geocoding;
    match geocoding.base_url.as_deref() {
        Some(base_url) => geolocate::GoogleGeocoder::with_base_url(
            geocoding.api_key.clone(),
            geocoding.timeout(),
            base_url,
        ),
        None => geolocate::GoogleGeocoder::new(geocoding.api_key.clone(), geocoding.timeout()),
    }
}

fn build_ip_client(settings: &Settings) -> Result<geolocate::IpApiClient, geolocate::GeolocateError> {
    let ip_lookup = &settings.ip_lookup;
    match ip_lookup.base_url.as_deref() {
        Some(base_url) => geolocate::IpApiClient::with_base_url(ip_lookup.timeout(), base_url),
        None => geolocate::IpApiClient::new(ip_lookup.timeout()),
    }
}
