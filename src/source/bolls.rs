//! bolls.life verse search client
//!
//! Issues `GET <endpoint>/<translation>?search=..&match_case=false&match_whole=..&limit=..&page=1`
//! and decodes the JSON answer.

use super::error::{Result, SourceError};
use super::traits::{SearchQuery, VerseSource};
use crate::verse::VerseMatch;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default search endpoint (translation code is appended as a path segment)
pub const DEFAULT_ENDPOINT: &str = "https://bolls.life/v2/find";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Search response body
///
/// The v2 endpoint wraps results in an object; older deployments answer
/// with a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FindResponse {
    Paged {
        results: Vec<VerseMatch>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<VerseMatch>),
}

impl FindResponse {
    fn into_results(self) -> Vec<VerseMatch> {
        match self {
            Self::Paged { results, total } => {
                debug!(returned = results.len(), total, "decoded paged response");
                results
            }
            Self::Bare(results) => results,
        }
    }
}

/// HTTP client for the bolls.life search endpoint
#[derive(Debug, Clone)]
pub struct BollsClient {
    http: Client,
    endpoint: String,
}

impl BollsClient {
    /// Create a client for `endpoint` with a bounded request timeout
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidEndpoint` if the endpoint is not an
    /// absolute URL, or `SourceError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Url::parse(&endpoint).map_err(|e| SourceError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// Endpoint this client searches against
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the request URL for a query
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidEndpoint` if the translation code does not
    /// produce a valid URL.
    pub fn request_url(&self, query: &SearchQuery) -> Result<Url> {
        let translation = query.translation.trim();
        if translation.is_empty() || translation.contains(['/', '?', '#']) {
            return Err(SourceError::InvalidEndpoint(format!(
                "invalid translation code '{}'",
                query.translation
            )));
        }

        let base = format!("{}/{translation}", self.endpoint);
        let limit = query.limit.to_string();
        let page = query.page().to_string();
        Url::parse_with_params(
            &base,
            &[
                ("search", query.term.as_str()),
                ("match_case", "false"),
                ("match_whole", if query.match_whole { "true" } else { "false" }),
                ("limit", limit.as_str()),
                ("page", page.as_str()),
            ],
        )
        .map_err(|e| SourceError::InvalidEndpoint(format!("{base}: {e}")))
    }
}

impl VerseSource for BollsClient {
    fn find(&self, query: &SearchQuery) -> Result<Vec<VerseMatch>> {
        let url = self.request_url(query)?;
        debug!(%url, "sending verse search");

        let response = self.http.get(url).send().map_err(SourceError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: FindResponse = response.json().map_err(SourceError::from_reqwest)?;
        Ok(body.into_results())
    }
}

/// Decode a search response body
///
/// # Errors
///
/// Returns `SourceError::Decode` if the body is neither shape the service uses.
pub fn parse_response(body: &str) -> Result<Vec<VerseMatch>> {
    serde_json::from_str::<FindResponse>(body)
        .map(FindResponse::into_results)
        .map_err(|e| SourceError::Decode(e.to_string()))
}
