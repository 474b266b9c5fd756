pub mod cache;
pub mod geolocation;
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub mod mock;
