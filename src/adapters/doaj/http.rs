//! HTTP client core for the DOAJ API
//!
//! One `HttpCore` owns the reqwest client (connection pool), the base URL,
//! API version and token, and the retry policy. Domain clients describe
//! their endpoint with an [`EndpointConfig`] (operation path template plus
//! allowed verb set) chosen at construction time; a request with a verb
//! outside that set fails before any network I/O.
//!
//! Retry applies to request timeouts only: a bounded number of attempts
//! with a fixed backoff, then `RequestFailed`. Connection errors fail
//! immediately.

use crate::config::{DoajApiConfig, SecretString};
use crate::domain::errors::RegistryError;
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// HTTP verbs the registry supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Put,
    Post,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Put => "PUT",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
        }
    }
}

/// Per-client endpoint configuration
///
/// Replaces inheritance-style class attributes with an explicit value
/// selected when the domain client is constructed.
#[derive(Debug, Clone, Copy)]
pub struct EndpointConfig {
    /// Operation path template, e.g. `/articles/{article_id}`
    pub op_path: &'static str,

    /// Verbs this endpoint accepts
    pub verbs: &'static [Verb],
}

/// Endpoint for single-article CRUD
pub const ARTICLES_ENDPOINT: EndpointConfig = EndpointConfig {
    op_path: "/articles/{article_id}",
    verbs: &[Verb::Get, Verb::Put, Verb::Post, Verb::Delete],
};

/// Endpoint for paginated search
pub const SEARCH_ENDPOINT: EndpointConfig = EndpointConfig {
    op_path: "/search/{search_type}/{search_query}",
    verbs: &[Verb::Get],
};

/// Status and body of one registry response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx success range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Shared HTTP core for all DOAJ clients
pub struct HttpCore {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    api_token: SecretString,
    max_attempts: usize,
    backoff: Duration,
    throttle: Duration,
    page_size: u32,
}

impl HttpCore {
    /// Build the core from configuration
    ///
    /// # Errors
    ///
    /// Returns `RequestFailed` if the underlying client cannot be built.
    pub fn new(config: &DoajApiConfig) -> Result<Self, RegistryError> {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| RegistryError::RequestFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            api_token: config.api_token.clone(),
            max_attempts: config.retry.max_attempts.max(1),
            backoff: Duration::from_millis(config.retry.backoff_ms),
            throttle: Duration::from_millis(config.throttle_ms),
            page_size: config.page_size,
        })
    }

    /// Sleep interval between paginated fetches and batch items
    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    /// Configured search page size
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Perform one logical operation against an endpoint
    ///
    /// `path_vars` fill the `{placeholders}` in the operation path;
    /// `query` is appended after the `api_key` parameter. The body, when
    /// present, is sent as `application/json`.
    ///
    /// Transport failures are the only errors raised here; non-2xx
    /// statuses are returned in the [`RawResponse`] so domain clients can
    /// intercept specific codes before falling back to
    /// [`default_error`](Self::default_error).
    pub async fn request(
        &self,
        endpoint: &EndpointConfig,
        verb: Verb,
        path_vars: &[(&str, &str)],
        query: &[(&str, &str)],
        body: Option<&str>,
    ) -> Result<RawResponse, RegistryError> {
        if !endpoint.verbs.contains(&verb) {
            return Err(RegistryError::VerbNotAllowed {
                verb: verb.as_str(),
                operation: endpoint.op_path.to_string(),
            });
        }

        let url = self.build_url(endpoint.op_path, path_vars, query)?;
        self.fetch(verb, url, body).await
    }

    /// GET an absolute URL handed back by the registry (pagination links),
    /// re-attaching the api_key parameter
    pub async fn fetch_page(&self, next_url: &str) -> Result<RawResponse, RegistryError> {
        let mut url = Url::parse(next_url)
            .map_err(|e| RegistryError::RequestFailed(format!("Bad pagination URL: {e}")))?;
        if !url.query_pairs().any(|(k, _)| k == "api_key") {
            url.query_pairs_mut()
                .append_pair("api_key", self.api_token.expose_secret().as_ref());
        }
        self.fetch(Verb::Get, url, None).await
    }

    /// Default non-2xx status mapping; domain clients call this after
    /// handling their own special cases
    pub fn default_error(&self, response: &RawResponse) -> RegistryError {
        match response.status {
            401 => RegistryError::InvalidToken(self.base_url.clone()),
            400 => RegistryError::BadRequest(response.body.clone()),
            status => RegistryError::HttpStatus {
                status,
                body: response.body.clone(),
            },
        }
    }

    fn build_url(
        &self,
        op_path: &str,
        path_vars: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> Result<Url, RegistryError> {
        let mut path = op_path.to_string();
        for (name, value) in path_vars {
            path = path.replace(&format!("{{{name}}}"), value);
        }
        let mut full = format!("{}/{}{}", self.base_url, self.api_version, path);
        while full.ends_with('/') {
            full.pop();
        }

        let mut url = Url::parse(&full)
            .map_err(|e| RegistryError::RequestFailed(format!("Bad request URL {full}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("api_key", self.api_token.expose_secret().as_ref());
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    async fn fetch(
        &self,
        verb: Verb,
        url: Url,
        body: Option<&str>,
    ) -> Result<RawResponse, RegistryError> {
        let redacted = redact_token(&url);
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!(url = %redacted, verb = verb.as_str(), attempt, "Fetching");

            let mut request = match verb {
                Verb::Get => self.client.get(url.clone()),
                Verb::Put => self.client.put(url.clone()),
                Verb::Post => self.client.post(url.clone()),
                Verb::Delete => self.client.delete(url.clone()),
            };
            if let Some(payload) = body {
                request = request
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(payload.to_string());
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    if !(200..300).contains(&status) {
                        tracing::warn!(url = %redacted, status, "DOAJ returned an error status");
                    }
                    return Ok(RawResponse { status, body });
                }
                Err(e) if e.is_timeout() => {
                    if attempt >= self.max_attempts {
                        return Err(RegistryError::RequestFailed(format!(
                            "DOAJ request timed out after {attempt} attempts: {redacted}"
                        )));
                    }
                    tracing::warn!(
                        url = %redacted,
                        attempt,
                        max_attempts = self.max_attempts,
                        backoff_ms = self.backoff.as_millis() as u64,
                        "Request timed out, retrying"
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                Err(e) if e.is_connect() => {
                    return Err(RegistryError::RequestFailed(format!(
                        "DOAJ unreachable at {redacted}: {e}"
                    )));
                }
                Err(e) => {
                    tracing::error!(url = %redacted, error = %e, "Unexpected transport error");
                    return Err(RegistryError::RequestFailed(e.to_string()));
                }
            }
        }
    }
}

/// Strip the api_key value from a URL for logging
fn redact_token(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == "api_key" {
                (k.into_owned(), "REDACTED".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    redacted.query_pairs_mut().clear();
    for (k, v) in &pairs {
        redacted.query_pairs_mut().append_pair(k, v);
    }
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RetryConfig;
    use crate::config::secret_string;

    fn core(base_url: &str) -> HttpCore {
        HttpCore::new(&DoajApiConfig {
            base_url: base_url.to_string(),
            api_version: "v2".to_string(),
            api_token: secret_string("tok".to_string()),
            connect_timeout_seconds: 5,
            timeout_seconds: 10,
            page_size: 50,
            throttle_ms: 250,
            push_enabled: true,
            recreate_on_immutable_change: false,
            retry: RetryConfig::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_build_url_substitutes_path_vars() {
        let core = core("https://doaj.org/api");
        let url = core
            .build_url("/articles/{article_id}", &[("article_id", "abc123")], &[])
            .unwrap();
        assert_eq!(url.path(), "/api/v2/articles/abc123");
        assert!(url.query().unwrap().contains("api_key=tok"));
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let core = core("https://doaj.org/api");
        // Create: empty article_id leaves a trailing slash to strip
        let url = core
            .build_url("/articles/{article_id}", &[("article_id", "")], &[])
            .unwrap();
        assert_eq!(url.path(), "/api/v2/articles");
    }

    #[test]
    fn test_build_url_appends_query() {
        let core = core("https://doaj.org/api");
        let url = core
            .build_url(
                "/search/{search_type}/{search_query}",
                &[("search_type", "articles"), ("search_query", "issn:0000-0000")],
                &[("pageSize", "50")],
            )
            .unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("api_key=tok"));
        assert!(query.contains("pageSize=50"));
    }

    #[tokio::test]
    async fn test_verb_gating_rejects_before_io() {
        let core = core("https://doaj.invalid/api");
        let err = core
            .request(&SEARCH_ENDPOINT, Verb::Delete, &[], &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::VerbNotAllowed { verb: "DELETE", .. }));
    }

    #[test]
    fn test_default_error_mapping() {
        let core = core("https://doaj.org/api");
        let unauthorized = RawResponse {
            status: 401,
            body: String::new(),
        };
        assert!(matches!(
            core.default_error(&unauthorized),
            RegistryError::InvalidToken(_)
        ));

        let bad_request = RawResponse {
            status: 400,
            body: "bibjson.keywords may only contain a maximum of 6 keywords".to_string(),
        };
        assert!(matches!(
            core.default_error(&bad_request),
            RegistryError::BadRequest(_)
        ));

        let server_error = RawResponse {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(matches!(
            core.default_error(&server_error),
            RegistryError::HttpStatus { status: 502, .. }
        ));
    }

    #[test]
    fn test_redact_token() {
        let url = Url::parse("https://doaj.org/api/v2/articles?api_key=sekrit&pageSize=50").unwrap();
        let redacted = redact_token(&url);
        assert!(!redacted.contains("sekrit"));
        assert!(redacted.contains("pageSize=50"));
    }
}
