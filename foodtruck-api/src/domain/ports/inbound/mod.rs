mod vendor_search;

pub use vendor_search::*;
