//! Mock outbound adapters for testing.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{
    models::{Coordinate, Vendor, VendorQuery},
    ports::outbound::{
        CacheError, Geocoder, IpLocator, LocationLookupError, QueryCache, VendorStore,
        VendorStoreError,
    },
};

/// Geocoder that knows a fixed set of addresses.
#[derive(Clone, Default)]
pub struct MockGeocoder {
    addresses: Arc<HashMap<String, Coordinate>>,
    unavailable: bool,
    call_count: Arc<AtomicUsize>,
}

impl MockGeocoder {
    /// A geocoder whose provider is down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_address(self, address: &str, latitude: f64, longitude: f64) -> Self {
        let mut addresses = (*self.addresses).clone();
        addresses.insert(address.to_string(), Coordinate::new(latitude, longitude));
        Self {
            addresses: Arc::new(addresses),
            ..self
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, LocationLookupError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(LocationLookupError::Unavailable("connection refused".into()));
        }
        self.addresses
            .get(address)
            .copied()
            .ok_or_else(|| LocationLookupError::NotFound(address.to_string()))
    }
}

/// IP locator that knows a fixed set of addresses.
#[derive(Clone, Default)]
pub struct MockIpLocator {
    ips: Arc<HashMap<IpAddr, Coordinate>>,
    call_count: Arc<AtomicUsize>,
}

impl MockIpLocator {
    pub fn with_ip(self, ip: IpAddr, latitude: f64, longitude: f64) -> Self {
        let mut ips = (*self.ips).clone();
        ips.insert(ip, Coordinate::new(latitude, longitude));
        Self {
            ips: Arc::new(ips),
            ..self
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IpLocator for MockIpLocator {
    async fn locate(&self, ip: IpAddr) -> Result<Coordinate, LocationLookupError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.ips
            .get(&ip)
            .copied()
            .ok_or_else(|| LocationLookupError::NotFound(ip.to_string()))
    }
}

/// HashMap-backed cache with call counters; can be told to fail every call.
#[derive(Clone, Default)]
pub struct MockQueryCache {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failing: bool,
    get_calls: Arc<AtomicUsize>,
    set_calls: Arc<AtomicUsize>,
}

impl MockQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose backend rejects every read and write.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Seed an entry directly, bypassing the counters.
    pub fn insert(&self, key: &str, value: Vec<u8>) {
        self.entries.write().unwrap().insert(key.to_string(), value);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryCache for MockQueryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(CacheError::Backend("connection reset".into()));
        }
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(CacheError::Backend("connection reset".into()));
        }
        self.insert(key, value);
        Ok(())
    }
}

/// Vendor store whose database is always down.
#[derive(Clone, Default)]
pub struct FailingVendorStore;

#[async_trait]
impl VendorStore for FailingVendorStore {
    async fn find(&self, _query: &VendorQuery, _limit: usize) -> Result<Vec<Vendor>, VendorStoreError> {
        Err(VendorStoreError::Database("pool timed out".into()))
    }

    async fn text_search(&self, _name: &str, _limit: usize) -> Result<Vec<Vendor>, VendorStoreError> {
        Err(VendorStoreError::Database("pool timed out".into()))
    }
}

/// Wraps a store and records how it was called.
#[derive(Clone, Default)]
pub struct CountingVendorStore<S> {
    inner: S,
    find_calls: Arc<AtomicUsize>,
    text_search_calls: Arc<AtomicUsize>,
    last_limit: Arc<AtomicUsize>,
}

impl<S> CountingVendorStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            find_calls: Arc::default(),
            text_search_calls: Arc::default(),
            last_limit: Arc::default(),
        }
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn text_search_calls(&self) -> usize {
        self.text_search_calls.load(Ordering::SeqCst)
    }

    /// The limit of the most recent query, if any.
    pub fn last_limit(&self) -> Option<usize> {
        match self.last_limit.load(Ordering::SeqCst) {
            0 => None,
            limit => Some(limit),
        }
    }
}

#[async_trait]
impl<S: VendorStore> VendorStore for CountingVendorStore<S> {
    async fn find(&self, query: &VendorQuery, limit: usize) -> Result<Vec<Vendor>, VendorStoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit, Ordering::SeqCst);
        self.inner.find(query, limit).await
    }

    async fn text_search(&self, name: &str, limit: usize) -> Result<Vec<Vendor>, VendorStoreError> {
        self.text_search_calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit, Ordering::SeqCst);
        self.inner.text_search(name, limit).await
    }
}
