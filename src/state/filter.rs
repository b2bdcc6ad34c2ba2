// Search filter state.
// The (discipline, state, country) tuple that drives a search.

use serde::{Deserialize, Serialize};

/// Filter for an internship search. Empty strings mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub discipline: String,
    pub state: String,
    pub country: String,
}

impl Filter {
    #[cfg(test)]
    pub fn new(
        discipline: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            discipline: discipline.into(),
            state: state.into(),
            country: country.into(),
        }
    }

    /// Storage key for this filter's result set.
    /// Built from the raw strings; no trimming or case folding.
    pub fn cache_key(&self) -> String {
        format!(
            "internships-{}-{}-{}",
            self.discipline, self.state, self.country
        )
    }
}
