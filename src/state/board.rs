// Job board state: country list, search results, and the search controller.
// Fetching happens elsewhere; this module decides when a fetch is needed and
// applies its outcome, reading and writing the persistent cache as it goes.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::{Country, Fetched, Internship};
use crate::cache::{COUNTRIES_KEY, CacheStore};
use crate::error::{FetchFailure, Result};

use super::filter::Filter;

/// Where the displayed results came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsSource {
    Cache,
    Network,
}

/// When and how the displayed results were last replaced.
#[derive(Debug, Clone, Copy)]
pub struct ResultsInfo {
    pub source: ResultsSource,
    pub updated_at: DateTime<Utc>,
}

/// What the caller must do to finish loading countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountriesPlan {
    /// Countries were populated from the cache.
    Cached,
    /// Countries must be fetched and passed to [`BoardState::apply_countries`].
    Fetch,
}

/// An in-flight network search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub filter: Filter,
    pub cache_key: String,
}

/// What the caller must do to finish a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPlan {
    /// Results were replaced from the cache.
    Cached,
    /// Results must be fetched and passed to [`BoardState::finish_search`].
    Fetch(SearchRequest),
}

/// Everything the job board screen renders.
#[derive(Debug, Default)]
pub struct BoardState {
    /// Countries for the dropdown.
    pub countries: Vec<Country>,
    /// Currently displayed postings.
    pub internships: Vec<Internship>,
    /// Filter edited by the search form.
    pub filter: Filter,
    /// Whether a search is in progress.
    pub loading: bool,
    /// Shared user-visible error message.
    pub error: Option<String>,
    /// Provenance of the displayed results.
    pub results_info: Option<ResultsInfo>,
    /// Generation of the latest network search. `App` never overlaps
    /// searches, so this only matters to callers driving the board directly.
    generation: u64,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate countries from the cache if present.
    pub fn load_cached_countries(&mut self, cache: &CacheStore) -> CountriesPlan {
        match cache.get_json::<Vec<Country>>(COUNTRIES_KEY) {
            Ok(Some(countries)) => {
                debug!(count = countries.len(), "countries loaded from cache");
                self.countries = countries;
                CountriesPlan::Cached
            }
            Ok(None) => CountriesPlan::Fetch,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable countries cache entry");
                CountriesPlan::Fetch
            }
        }
    }

    /// Apply the outcome of a countries fetch.
    /// The response text is cached as received.
    pub fn apply_countries(&mut self, cache: &CacheStore, result: Result<Fetched<Country>>) {
        match result {
            Ok(countries) => {
                info!(count = countries.items.len(), "countries fetched");
                if let Err(e) = cache.set_item(COUNTRIES_KEY, &countries.raw) {
                    warn!(error = %e, "failed to cache countries");
                }
                self.countries = countries.items;
            }
            Err(e) => {
                warn!(error = %e, "error fetching the countries");
                self.set_failure(FetchFailure::CountriesFetchFailed);
            }
        }
    }

    /// The search control is disabled while a search is in progress.
    pub fn can_search(&self) -> bool {
        !self.loading
    }

    /// Start a search with the current filter.
    ///
    /// A cache hit replaces the results immediately. A miss leaves the
    /// results untouched and returns the request to fetch.
    pub fn begin_search(&mut self, cache: &CacheStore) -> SearchPlan {
        self.loading = true;
        self.error = None;

        let cache_key = self.filter.cache_key();
        match cache.get_json::<Vec<Internship>>(&cache_key) {
            Ok(Some(internships)) => {
                debug!(key = %cache_key, count = internships.len(), "search served from cache");
                self.replace_results(internships, ResultsSource::Cache);
                self.loading = false;
                return SearchPlan::Cached;
            }
            Ok(None) => {}
            Err(e) => warn!(key = %cache_key, error = %e, "ignoring unreadable search cache entry"),
        }

        self.generation += 1;
        SearchPlan::Fetch(SearchRequest {
            generation: self.generation,
            filter: self.filter.clone(),
            cache_key,
        })
    }

    /// Apply the outcome of a network search. Returns whether it was displayed.
    ///
    /// Results are cached even when a newer search has superseded the request;
    /// only the latest generation touches what is on screen.
    pub fn finish_search(
        &mut self,
        cache: &CacheStore,
        request: SearchRequest,
        result: Result<Fetched<Internship>>,
    ) -> bool {
        let current = request.generation == self.generation;

        match result {
            Ok(Fetched { items: internships, raw }) => {
                if let Err(e) = cache.set_item(&request.cache_key, &raw) {
                    warn!(key = %request.cache_key, error = %e, "failed to cache search results");
                }
                if !current {
                    debug!(generation = request.generation, "discarding superseded search results");
                    return false;
                }
                info!(key = %request.cache_key, count = internships.len(), "internships fetched");
                self.replace_results(internships, ResultsSource::Network);
                self.loading = false;
                self.error = None;
                true
            }
            Err(e) => {
                warn!(key = %request.cache_key, error = %e, "error fetching internships");
                if !current {
                    return false;
                }
                self.set_failure(FetchFailure::InternshipsFetchFailed);
                self.loading = false;
                true
            }
        }
    }

    /// Put a failure message in the shared error slot.
    pub fn set_failure(&mut self, failure: FetchFailure) {
        self.error = Some(failure.message().to_string());
    }

    fn replace_results(&mut self, internships: Vec<Internship>, source: ResultsSource) {
        self.internships = internships;
        self.results_info = Some(ResultsInfo {
            source,
            updated_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::error::BoardError;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn internship(title: &str) -> Internship {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "company_name": "Acme",
            "location": "Remote",
            "description": "Build things",
            "schedule_type": "Internship",
            "related_links": [{"link": "https://example.com"}]
        }))
        .unwrap()
    }

    fn fetched(title: &str) -> Fetched<Internship> {
        let raw = serde_json::json!([{
            "title": title,
            "company_name": "Acme",
            "related_links": [{"link": "https://example.com"}]
        }])
        .to_string();
        Fetched::parse(&raw).unwrap()
    }

    #[test]
    fn test_cached_countries_skip_network() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        cache
            .set_item(COUNTRIES_KEY, r#"[{"name":"USA"},{"name":"Ghana"}]"#)
            .unwrap();

        let mut board = BoardState::new();
        let plan = board.load_cached_countries(&cache);

        assert_eq!(plan, CountriesPlan::Cached);
        assert_eq!(
            board.countries,
            vec![Country::new("USA"), Country::new("Ghana")]
        );
    }

    #[test]
    fn test_corrupt_countries_cache_refetches() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        cache.set_item(COUNTRIES_KEY, "not json").unwrap();

        let mut board = BoardState::new();
        assert_eq!(board.load_cached_countries(&cache), CountriesPlan::Fetch);
        assert!(board.countries.is_empty());
    }

    #[tokio::test]
    async fn test_fetched_countries_are_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{"code":"US","name":"USA","flag":null}]"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        let client = ApiClient::new(&server.uri()).unwrap();

        let mut board = BoardState::new();
        assert_eq!(board.load_cached_countries(&cache), CountriesPlan::Fetch);
        board.apply_countries(&cache, client.get_countries().await);

        assert_eq!(board.countries.len(), 1);
        assert_eq!(board.countries[0].name, "USA");
        // Stored exactly as sent: key order and nulls intact
        assert_eq!(
            cache.get_item(COUNTRIES_KEY).unwrap().as_deref(),
            Some(r#"[{"code":"US","name":"USA","flag":null}]"#)
        );
        assert!(board.error.is_none());
    }

    #[test]
    fn test_failed_countries_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());

        let mut board = BoardState::new();
        board.apply_countries(&cache, Err(BoardError::Other("connection refused".into())));

        assert!(board.countries.is_empty());
        assert_eq!(board.error.as_deref(), Some("Error fetching countries"));
        assert!(cache.get_item(COUNTRIES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_invalid_countries_data_reaches_banner() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());

        let mut board = BoardState::new();
        board.apply_countries(
            &cache,
            Err(BoardError::InvalidData("countries response is not an array".into())),
        );

        assert_eq!(board.error.as_deref(), Some("Error fetching countries"));
    }

    #[tokio::test]
    async fn test_search_miss_then_hit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/internships"))
            .and(query_param("discipline", "eng"))
            .and(query_param("state", ""))
            .and(query_param("country", "USA"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"internships":[{"title":"X","description":"d","date":null,"related_links":[]}]}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        let client = ApiClient::new(&server.uri()).unwrap();

        let mut board = BoardState::new();
        board.filter = Filter::new("eng", "", "USA");

        let SearchPlan::Fetch(request) = board.begin_search(&cache) else {
            panic!("expected a network fetch on an empty cache");
        };
        assert!(board.loading);
        assert_eq!(request.cache_key, "internships-eng--USA");

        let result = client.get_internships(&request.filter).await;
        assert!(board.finish_search(&cache, request, result));

        assert!(!board.loading);
        assert_eq!(board.internships.len(), 1);
        assert_eq!(board.internships[0].title, "X");
        let first = board.internships.clone();
        assert_eq!(
            cache.get_item("internships-eng--USA").unwrap().as_deref(),
            Some(r#"[{"title":"X","description":"d","date":null,"related_links":[]}]"#)
        );

        // Same filter again: no request (the mock expects exactly one)
        assert_eq!(board.begin_search(&cache), SearchPlan::Cached);
        assert!(!board.loading);
        assert_eq!(board.internships, first);
        assert_eq!(
            board.results_info.map(|i| i.source),
            Some(ResultsSource::Cache)
        );
    }

    #[test]
    fn test_failed_search_keeps_results() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());

        let mut board = BoardState::new();
        board.internships = vec![internship("Existing")];
        board.filter = Filter::new("eng", "", "");

        let SearchPlan::Fetch(request) = board.begin_search(&cache) else {
            panic!("expected fetch");
        };
        board.finish_search(&cache, request, Err(BoardError::Other("timeout".into())));

        assert!(!board.loading);
        assert_eq!(board.error.as_deref(), Some("Error fetching internships"));
        assert_eq!(board.internships[0].title, "Existing");
        assert!(cache.get_item("internships-eng--").unwrap().is_none());
    }

    #[test]
    fn test_search_clears_previous_error() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        cache.set_item("internships---", &fetched("A").raw).unwrap();

        let mut board = BoardState::new();
        board.set_failure(FetchFailure::CountriesFetchFailed);

        assert_eq!(board.begin_search(&cache), SearchPlan::Cached);
        assert!(board.error.is_none());
    }

    #[test]
    fn test_long_filter_is_cached() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());

        let mut board = BoardState::new();
        board.filter = Filter::new("программист".repeat(4), "", "USA");

        let SearchPlan::Fetch(request) = board.begin_search(&cache) else {
            panic!("expected fetch");
        };
        assert!(board.finish_search(&cache, request, Ok(fetched("Dev"))));

        assert_eq!(board.begin_search(&cache), SearchPlan::Cached);
        assert_eq!(board.internships[0].title, "Dev");
    }

    #[test]
    fn test_superseded_search_is_cached_but_not_shown() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        let mut board = BoardState::new();

        board.filter = Filter::new("old", "", "");
        let SearchPlan::Fetch(old) = board.begin_search(&cache) else {
            panic!("expected fetch");
        };

        board.filter = Filter::new("new", "", "");
        let SearchPlan::Fetch(new) = board.begin_search(&cache) else {
            panic!("expected fetch");
        };

        // Newer response lands first, older one after
        assert!(board.finish_search(&cache, new, Ok(fetched("New"))));
        assert!(!board.finish_search(&cache, old, Ok(fetched("Old"))));

        assert_eq!(board.internships[0].title, "New");
        let old_cached: Vec<Internship> = cache.get_json("internships-old--").unwrap().unwrap();
        assert_eq!(old_cached[0].title, "Old");
    }

    #[test]
    fn test_superseded_failure_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        let mut board = BoardState::new();

        board.filter = Filter::new("old", "", "");
        let SearchPlan::Fetch(old) = board.begin_search(&cache) else {
            panic!("expected fetch");
        };
        board.filter = Filter::new("new", "", "");
        let SearchPlan::Fetch(_new) = board.begin_search(&cache) else {
            panic!("expected fetch");
        };

        assert!(!board.finish_search(&cache, old, Err(BoardError::Other("boom".into()))));
        assert!(board.error.is_none());
        assert!(board.loading);
    }
}
