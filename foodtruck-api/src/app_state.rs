use std::sync::Arc;

use crate::domain::{models::SearchConfig, ports::inbound::VendorSearch};

#[derive(Clone)]
pub struct AppState {
    vendor_search: Arc<dyn VendorSearch>,
    search_config: SearchConfig,
}

impl AppState {
    pub fn new(vendor_search: Arc<dyn VendorSearch>, search_config: SearchConfig) -> Self {
        Self {
            vendor_search,
            search_config,
        }
    }

    pub fn vendor_search(&self) -> &dyn VendorSearch {
        self.vendor_search.as_ref()
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search_config
    }
}
