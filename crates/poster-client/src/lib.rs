//! Poster lookup client for the OMDb-style metadata service.
//!
//! This crate provides the system's one external collaborator: given a
//! movie title, resolve a poster image URL over HTTP. It handles:
//! - Request construction (the title is percent-encoded into the query string)
//! - The "no poster" sentinel and missing-field responses
//! - A bounded request timeout
//! - Typed errors for transport and service failures
//!
//! The degrade-to-placeholder policy for *failures* lives in the
//! orchestrator; this client only turns "service answered, no poster" into
//! the placeholder itself.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Fallback image used whenever a poster cannot be resolved
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/200x300?text=No+Poster";

/// Default service endpoint; override via `OMDB_API_URL`
pub const DEFAULT_OMDB_API_URL: &str = "http://www.omdbapi.com/";

/// Sentinel the service returns for "poster not available"
const NO_POSTER_SENTINEL: &str = "N/A";

/// Per-request timeout; one slow lookup must not stall the whole request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// Errors that can occur when talking to the poster service
#[derive(Error, Debug)]
pub enum PosterError {
    /// Request could not be sent or the response body could not be read
    /// (includes timeouts)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Poster service returned status {status}: {body}")]
    Service { status: u16, body: String },
}

/// Poster lookup capability.
///
/// The orchestrator depends on this trait rather than on [`OmdbClient`]
/// directly, so recommendation flows stay testable without network access.
#[async_trait]
pub trait PosterResolver: Send + Sync {
    /// Resolve a poster URL for an exact movie title.
    ///
    /// `Ok` carries either a real poster URL or
    /// [`PLACEHOLDER_POSTER_URL`] when the service answered but has no
    /// poster for the title. `Err` means the service could not be reached
    /// or answered with a failure status.
    async fn resolve(&self, title: &str) -> Result<String, PosterError>;
}

/// Shape of the service's JSON answer; only the fields we read
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Client for an OMDb-style metadata API.
///
/// Lookups are keyed by exact title text:
/// `GET <api_url>?t=<title>&apikey=<key>`
pub struct OmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbClient {
    /// Create a client with a bounded request timeout.
    ///
    /// The API key is a deployment secret supplied by configuration.
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Result<Self, PosterError> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_url: api_url.into(),
        })
    }

    /// The service endpoint this client talks to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl PosterResolver for OmdbClient {
    async fn resolve(&self, title: &str) -> Result<String, PosterError> {
        // The query builder percent-encodes the title for us
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PosterError::Service { status, body });
        }

        let data: OmdbResponse = response.json().await?;

        // An unknown title is a success with an Error field and no poster;
        // it degrades to the placeholder like any other missing poster
        if let Some(reason) = &data.error {
            debug!(title, reason = %reason, "Service has no entry for title");
        }

        Ok(poster_or_placeholder(data.poster))
    }
}

/// Map the service's poster field to a displayable URL
fn poster_or_placeholder(poster: Option<String>) -> String {
    match poster {
        Some(url) if url != NO_POSTER_SENTINEL => url,
        _ => PLACEHOLDER_POSTER_URL.to_string(),
    }
}
