// Job board API endpoint functions.
// Provides typed methods for fetching countries and searching internships.

use serde_json::Value;
use tracing::debug;

use crate::error::{BoardError, Result};
use crate::state::Filter;

use super::client::ApiClient;
use super::types::{Country, Fetched, Internship, InternshipsResponse};

impl ApiClient {
    /// Get the list of countries. The body must be a JSON array.
    pub async fn get_countries(&self) -> Result<Fetched<Country>> {
        let response = self.get("/api/countries").await?;
        let body = response.text().await?;

        let shape: Value = serde_json::from_str(&body)?;
        if !shape.is_array() {
            return Err(BoardError::InvalidData(
                "countries response is not an array".to_string(),
            ));
        }

        let countries = Fetched::parse(&body)?;
        debug!(count = countries.items.len(), "fetched countries");
        Ok(countries)
    }

    /// Search internships matching the filter.
    pub async fn get_internships(&self, filter: &Filter) -> Result<Fetched<Internship>> {
        let params = [
            ("discipline", filter.discipline.as_str()),
            ("state", filter.state.as_str()),
            ("country", filter.country.as_str()),
        ];
        let response = self.get_with_params("/api/internships", &params).await?;
        let body = response.text().await?;

        let wrapper: InternshipsResponse<'_> = serde_json::from_str(&body)?;
        let internships = Fetched::parse(wrapper.internships.get())?;
        debug!(count = internships.items.len(), "fetched internships");
        Ok(internships)
    }
}
