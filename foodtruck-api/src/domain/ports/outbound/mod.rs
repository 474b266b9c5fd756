mod geolocation;
mod query_cache;
mod vendor_store;

pub use geolocation::*;
pub use query_cache::*;
pub use vendor_store::*;
