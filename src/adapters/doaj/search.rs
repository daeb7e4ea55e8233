//! Paginated article search
//!
//! Wraps `/search/articles/{query}` behind a [`SearchPager`], a forward
//! cursor over result pages. The first page is fetched through the search
//! endpoint; later pages follow the absolute `next` link the registry
//! hands back, with a throttle sleep before each follow-up fetch.

use crate::adapters::doaj::http::{HttpCore, Verb, SEARCH_ENDPOINT};
use crate::adapters::doaj::records::{SearchResponse, SearchResult};
use crate::domain::errors::RegistryError;
use crate::domain::{Doi, Issn};
use std::sync::Arc;

const SEARCH_TYPE: &str = "articles";

/// Client for the article search endpoint
#[derive(Clone)]
pub struct SearchClient {
    http: Arc<HttpCore>,
}

impl SearchClient {
    pub fn new(http: Arc<HttpCore>) -> Self {
        Self { http }
    }

    /// Search with a raw query term, optionally scoped to a field prefix
    pub fn search(&self, term: &str, prefix: Option<&str>) -> SearchPager {
        let query = match prefix {
            Some(prefix) => format!("{prefix}:{term}"),
            None => term.to_string(),
        };
        SearchPager::new(Arc::clone(&self.http), query)
    }

    /// Search by article DOI
    ///
    /// Validation happens at [`Doi`] construction, so a query that can
    /// never match is rejected before any request is made.
    pub fn search_by_doi(&self, doi: &Doi, exact: bool) -> SearchPager {
        let prefix = if exact { "doi.exact" } else { "doi" };
        self.search(doi.as_str(), Some(prefix))
    }

    /// Search by publisher name
    pub fn search_by_publisher(&self, publisher: &str, exact: bool) -> SearchPager {
        let prefix = if exact { "publisher.exact" } else { "publisher" };
        self.search(publisher, Some(prefix))
    }

    /// Search by journal ISSN
    pub fn search_by_eissn(&self, issn: &Issn) -> SearchPager {
        self.search(issn.as_str(), Some("issn"))
    }
}

/// Forward-only cursor over search result pages
///
/// The registry reports `total`, `page`, `pageSize` and a `next` link on
/// every page; another fetch qualifies only while a next link exists and
/// `page * pageSize < total`.
pub struct SearchPager {
    http: Arc<HttpCore>,
    query: String,
    next_url: Option<String>,
    started: bool,
    finished: bool,
}

impl SearchPager {
    fn new(http: Arc<HttpCore>, query: String) -> Self {
        Self {
            http,
            query,
            next_url: None,
            started: false,
            finished: false,
        }
    }

    /// The query term this pager was built with
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Fetch the next page of results, or `None` when exhausted
    pub async fn try_next(&mut self) -> Result<Option<Vec<SearchResult>>, RegistryError> {
        if self.finished {
            return Ok(None);
        }

        let response = if !self.started {
            self.started = true;
            let query_segment = encode_path_segment(&self.query);
            self.http
                .request(
                    &SEARCH_ENDPOINT,
                    Verb::Get,
                    &[("search_type", SEARCH_TYPE), ("search_query", &query_segment)],
                    &[("pageSize", &self.http.page_size().to_string())],
                    None,
                )
                .await?
        } else {
            // finished is false, so a next link must be pending
            let next_url = match self.next_url.take() {
                Some(url) => url,
                None => {
                    self.finished = true;
                    return Ok(None);
                }
            };
            tokio::time::sleep(self.http.throttle()).await;
            self.http.fetch_page(&next_url).await?
        };

        if !response.is_success() {
            self.finished = true;
            return Err(self.http.default_error(&response));
        }

        let page = SearchResponse::decode(&response.body)?;
        tracing::debug!(
            query = %self.query,
            page = page.page,
            total = page.total,
            results = page.results.len(),
            "Fetched search page"
        );

        if page.has_more() {
            self.next_url = page.next.clone();
        } else {
            self.finished = true;
        }
        Ok(Some(page.results))
    }

    /// Drain the cursor into a single vector
    pub async fn collect_all(mut self) -> Result<Vec<SearchResult>, RegistryError> {
        let mut all = Vec::new();
        while let Some(results) = self.try_next().await? {
            all.extend(results);
        }
        Ok(all)
    }

    /// Expect exactly one match
    ///
    /// # Errors
    ///
    /// `ResultNotFound` for zero matches, `MultipleResultsFound` with the
    /// match count otherwise.
    pub async fn one(self) -> Result<SearchResult, RegistryError> {
        let query = self.query.clone();
        let mut results = self.collect_all().await?;
        match results.len() {
            1 => Ok(results.remove(0)),
            0 => Err(RegistryError::ResultNotFound(query)),
            n => Err(RegistryError::MultipleResultsFound(n)),
        }
    }
}

/// Encode a query for use as a single path segment
///
/// DOIs always contain a slash, which would otherwise split the segment.
fn encode_path_segment(query: &str) -> String {
    query
        .replace('%', "%25")
        .replace('/', "%2F")
        .replace(' ', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DoajApiConfig, RetryConfig};
    use crate::config::secret_string;

    fn client() -> SearchClient {
        let config = DoajApiConfig {
            base_url: "https://doaj.org/api".to_string(),
            api_version: "v2".to_string(),
            api_token: secret_string("tok".to_string()),
            connect_timeout_seconds: 5,
            timeout_seconds: 10,
            page_size: 50,
            throttle_ms: 250,
            push_enabled: true,
            recreate_on_immutable_change: false,
            retry: RetryConfig::default(),
        };
        SearchClient::new(Arc::new(HttpCore::new(&config).unwrap()))
    }

    #[test]
    fn test_query_with_prefix() {
        let pager = client().search("0000-0000", Some("issn"));
        assert_eq!(pager.query(), "issn:0000-0000");
    }

    #[test]
    fn test_query_without_prefix() {
        let pager = client().search("open access", None);
        assert_eq!(pager.query(), "open access");
    }

    #[test]
    fn test_doi_query_prefixes() {
        let doi = Doi::new("10.1234/test.7").unwrap();
        assert_eq!(client().search_by_doi(&doi, false).query(), "doi:10.1234/test.7");
        assert_eq!(
            client().search_by_doi(&doi, true).query(),
            "doi.exact:10.1234/test.7"
        );
    }

    #[test]
    fn test_publisher_query_prefixes() {
        assert_eq!(
            client().search_by_publisher("doaj", true).query(),
            "publisher.exact:doaj"
        );
        assert_eq!(
            client().search_by_publisher("doaj", false).query(),
            "publisher:doaj"
        );
    }

    #[test]
    fn test_eissn_query() {
        let issn = Issn::new("0000-0000").unwrap();
        assert_eq!(client().search_by_eissn(&issn).query(), "issn:0000-0000");
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(
            encode_path_segment("doi:10.1234/test.7"),
            "doi:10.1234%2Ftest.7"
        );
        assert_eq!(encode_path_segment("publisher:Open Books"), "publisher:Open%20Books");
        assert_eq!(encode_path_segment("issn:0000-0000"), "issn:0000-0000");
    }
}
