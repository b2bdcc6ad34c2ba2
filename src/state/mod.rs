// State management module.
// Handles the search filter, fetched data, and keyboard state of the form.

pub mod board;
pub mod filter;
pub mod form;

pub use board::{BoardState, CountriesPlan, ResultsSource, SearchPlan, SearchRequest};
pub use filter::Filter;
pub use form::{CountryPicker, Field, FormState};
