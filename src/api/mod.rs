// Job board API module.
// Provides client and types for the countries and internships endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use types::{Country, Fetched, Internship};
