// Cache module for local filesystem caching.
// Stores job board API responses so repeat lookups skip the network.

pub mod paths;
pub mod store;

pub use store::{COUNTRIES_KEY, CacheStore};
