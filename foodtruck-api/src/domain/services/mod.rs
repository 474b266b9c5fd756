mod fingerprint;
mod geo_query;
mod location_resolver;
mod pipeline;
mod single_flight;
mod vendor_search;

pub use vendor_search::VendorSearchServiceImpl;
