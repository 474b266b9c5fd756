mod geo;
mod query;
mod request;
mod vendor;

pub use geo::*;
pub use query::*;
pub use request::*;
pub use vendor::*;
