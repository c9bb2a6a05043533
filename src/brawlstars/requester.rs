//! HTTP client for the Brawl Stars API.
//!
//! This module provides the [`BsRequester`] struct for making authenticated
//! requests to the API and classifying its answers.

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Base URL of the official API.
pub const API_URL: &str = "https://api.brawlstars.com/v1";

/// HTTP client for requesting data from the Brawl Stars API.
///
/// A single client can be shared between concurrent calls: each request is
/// independent and nothing is cached.
///
/// # Examples
///
/// ```no_run
/// use bs_api::{BsRequester, Requester};
///
/// # async fn example() -> Result<(), bs_api::ApiError> {
/// let requester = BsRequester::new("your_api_token");
/// let player = requester.get_json("players/%238VJVG4PVC").await?;
/// println!("Player: {}", player);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BsRequester {
    /// Bearer token of the developer account
    token: String,
    /// API base url, without trailing slash
    url: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to the Brawl Stars API.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
/// Paths are relative to the API base URL unless they are already absolute.
#[automock]
// callers only await these futures on their own tasks, no `Send` bound needed
#[allow(async_fn_in_trait)]
pub trait Requester {
    /// Fetches `path` and decodes the body as JSON.
    async fn get_json(&self, path: &str) -> ApiResult<Value>;
    /// Fetches `path` and returns the raw body.
    async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>>;
}

impl BsRequester {
    /// Create a new [BsRequester] against the official API.
    ///
    /// # Arguments
    ///
    /// * `token` - The API token used as bearer credential.
    pub fn new(token: &str) -> Self {
        Self::with_url(API_URL, token)
    }

    /// Create a new [BsRequester] against another base URL, e.g. a proxy.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL, a trailing slash is ignored.
    /// * `token` - The API token used as bearer credential.
    pub fn with_url(url: &str, token: &str) -> Self {
        BsRequester {
            token: token.to_string(),
            url: url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Builds the absolute URL for `path`.
    ///
    /// Absolute URLs are used verbatim (icons live on another host).
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", &self.url, path.trim_start_matches('/'))
        }
    }

    /// Sends the GET request and returns the body of a successful response.
    ///
    /// The bearer header is only attached to URLs under the API base, the token
    /// is never sent to a third-party host.
    async fn request(&self, path: &str) -> ApiResult<Vec<u8>> {
        let url = self.build_url(path);
        info!("request {}", path);
        debug!("request {}", &url);

        let mut request = self.client.get(&url);
        if url.starts_with(&self.url) {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("response from {} -> {}", &url, status);

        if status != StatusCode::OK {
            return Err(ApiError::from_status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Requester for BsRequester {
    async fn get_json(&self, path: &str) -> ApiResult<Value> {
        let body = self.request(path).await?;
        let value: Value = serde_json::from_slice(&body)?;
        debug!("decoded {} -> {}", path, &value);

        Ok(value)
    }

    async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let body = self.request(path).await?;
        debug!("received {} bytes from {}", body.len(), path);

        Ok(body)
    }
}

/// Encodes a player or club tag for use in a path.
///
/// The leading `#` becomes `%23`; a tag given without it gets the encoded
/// prefix anyway, so `"#ABC"`, `"ABC"` and `"%23ABC"` all encode to `"%23ABC"`.
///
/// # Examples
///
/// ```
/// # use bs_api::encode_tag;
/// assert_eq!(encode_tag("#ABC123"), encode_tag("ABC123"));
/// ```
pub fn encode_tag(tag: &str) -> String {
    let bare = tag
        .strip_prefix('#')
        .or_else(|| tag.strip_prefix("%23"))
        .unwrap_or(tag);
    format!("%23{}", bare)
}
