// API client module: a small blocking HTTP client for the Open Library
// search endpoint. It is intentionally small and synchronous; the one
// network call in the program happens here.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

/// Default public endpoint for book search.
const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// How many matches a search returns at most.
pub const MAX_RESULTS: usize = 5;

/// Which query parameter the free-text query is sent as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Title,
    Author,
    Isbn,
}

impl SearchMode {
    fn query_param(self) -> &'static str {
        match self {
            SearchMode::Title => "title",
            SearchMode::Author => "author",
            SearchMode::Isbn => "isbn",
        }
    }
}

/// One record of the `docs` array in a search response. Every field is
/// optional in the API payload; the accessors substitute placeholders so
/// the UI never has to deal with holes.
#[derive(Debug, Clone, Deserialize)]
pub struct BookDoc {
    title: Option<String>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i64>,
    isbn: Option<Vec<String>>,
}

impl BookDoc {
    /// Title, or `Unknown Title` when the record has none.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Title")
    }

    /// All authors joined with ", ", or `Unknown Author`.
    pub fn authors(&self) -> String {
        match &self.author_name {
            Some(names) => names.join(", "),
            None => "Unknown Author".to_string(),
        }
    }

    /// First publication year as text, or `Unknown Year`.
    pub fn first_publish_year(&self) -> String {
        self.first_publish_year
            .map_or_else(|| "Unknown Year".to_string(), |year| year.to_string())
    }

    /// First ISBN listed for the record, or `Unknown ISBN` when the list
    /// is missing or empty.
    pub fn isbn(&self) -> &str {
        self.isbn
            .as_ref()
            .and_then(|list| list.first())
            .map_or("Unknown ISBN", String::as_str)
    }
}

/// Shape of the search endpoint's JSON body; only `docs` matters here.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<BookDoc>,
}

/// Book search client holding a reqwest blocking client and the base URL
/// of the Open Library instance to query.
#[derive(Clone)]
pub struct BookClient {
    client: Client,
    base_url: String,
}

impl BookClient {
    /// Create a client configured from the environment variable
    /// `OPENLIBRARY_URL` or fallback to the public endpoint.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("OPENLIBRARY_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::with_base_url(base_url)
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(BookClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Issue one GET against `/search.json` and return at most
    /// [`MAX_RESULTS`] matching records. Network and decode failures come
    /// back as errors for the caller to report; there is no retry.
    pub fn search(&self, query: &str, mode: SearchMode) -> Result<Vec<BookDoc>> {
        let url = search_url(&self.base_url, query, mode);
        debug!(%url, "searching Open Library");
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to send search request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Search failed: {} - {}", status, txt);
        }
        let mut body: SearchResponse = res.json().context("Parsing search response json")?;
        body.docs.truncate(MAX_RESULTS);
        Ok(body.docs)
    }
}

/// Build the search URL with the query percent-encoded into exactly one
/// of the `title`, `author` or `isbn` parameters.
fn search_url(base_url: &str, query: &str, mode: SearchMode) -> String {
    format!(
        "{}/search.json?{}={}",
        base_url,
        mode.query_param(),
        urlencoding::encode(query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SearchMode::Title, "title")]
    #[case(SearchMode::Author, "author")]
    #[case(SearchMode::Isbn, "isbn")]
    fn test_search_url_picks_one_parameter(#[case] mode: SearchMode, #[case] param: &str) {
        let url = search_url("https://openlibrary.org", "dune", mode);
        assert_eq!(
            url,
            format!("https://openlibrary.org/search.json?{}=dune", param)
        );
    }

    #[test]
    fn test_search_url_percent_encodes_query() {
        let url = search_url(
            "https://openlibrary.org",
            "the rust programming language",
            SearchMode::Title,
        );
        assert_eq!(
            url,
            "https://openlibrary.org/search.json?title=the%20rust%20programming%20language"
        );
    }

    #[test]
    fn test_docs_deserialize_with_all_fields() {
        let body = r#"{
            "docs": [{
                "title": "Dune",
                "author_name": ["Frank Herbert", "Someone Else"],
                "first_publish_year": 1965,
                "isbn": ["0441172717", "9780441172719"]
            }]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let doc = &parsed.docs[0];
        assert_eq!(doc.title(), "Dune");
        assert_eq!(doc.authors(), "Frank Herbert, Someone Else");
        assert_eq!(doc.first_publish_year(), "1965");
        assert_eq!(doc.isbn(), "0441172717");
    }

    #[test]
    fn test_docs_deserialize_with_missing_fields() {
        // The API omits fields freely; every accessor must fall back.
        let parsed: SearchResponse = serde_json::from_str(r#"{"docs": [{}]}"#).unwrap();
        let doc = &parsed.docs[0];
        assert_eq!(doc.title(), "Unknown Title");
        assert_eq!(doc.authors(), "Unknown Author");
        assert_eq!(doc.first_publish_year(), "Unknown Year");
        assert_eq!(doc.isbn(), "Unknown ISBN");
    }

    #[test]
    fn test_empty_isbn_list_falls_back() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"docs": [{"isbn": []}]}"#).unwrap();
        assert_eq!(parsed.docs[0].isbn(), "Unknown ISBN");
    }

    #[test]
    fn test_missing_docs_array_is_empty() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.docs.is_empty());
    }
}
