//! Error taxonomy for the Brawl Stars client.
//!
//! Every HTTP status the API documents maps to one variant of [`ApiError`].
//! Two local variants complete the set: [`ApiError::ParseFailure`] when a payload
//! cannot be turned into an entity, and [`ApiError::NotFoundLocal`] when a search
//! over an already fetched collection finds nothing.

use reqwest::StatusCode;

const INCORRECT_REQUEST: &str = "Provided incorrect parameters for the request.";
const ACCESS_DENIED: &str = "Access denied, either because of missing/incorrect credentials or used API token does not grant access to the requested resource.";
const RESOURCE_NOT_FOUND: &str = "Resource was not found.";
const RATE_LIMITED: &str = "Request was throttled, because amount of requests was above the threshold defined for the used API token.";
const SERVICE_UNAVAILABLE: &str = "Service is temporarily unavailable because of maintenance.";
const UNKNOWN_FAILURE: &str = "Unknown error happened when handling the request.";

/// Result alias used across the crate.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the client.
///
/// Remote variants carry a message so callers can replace the default one,
/// e.g. `ApiError::ResourceNotFound("no such club".to_string())`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP 400.
    #[error("{0}")]
    IncorrectRequest(String),
    /// HTTP 403.
    #[error("{0}")]
    AccessDenied(String),
    /// HTTP 404, the API has nothing at the requested path.
    #[error("{0}")]
    ResourceNotFound(String),
    /// HTTP 429.
    #[error("{0}")]
    RateLimited(String),
    /// HTTP 503.
    #[error("{0}")]
    ServiceUnavailable(String),
    /// Any other non-success status.
    #[error("{message} (status {status})")]
    UnknownFailure { status: u16, message: String },
    /// A payload or timestamp did not have the expected shape.
    #[error("failed to parse response: {0}")]
    ParseFailure(String),
    /// A search over an already fetched collection matched nothing.
    #[error("{0}")]
    NotFoundLocal(String),
    /// The request never produced a status (connection, TLS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Writing a downloaded asset failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Classifies a non-success HTTP status.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_api::ApiError;
    /// use reqwest::StatusCode;
    ///
    /// let error = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS);
    /// assert!(matches!(error, ApiError::RateLimited(_)));
    /// ```
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => Self::incorrect_request(),
            403 => Self::access_denied(),
            404 => Self::resource_not_found(),
            429 => Self::rate_limited(),
            503 => Self::service_unavailable(),
            code => Self::UnknownFailure {
                status: code,
                message: UNKNOWN_FAILURE.to_string(),
            },
        }
    }

    pub fn incorrect_request() -> Self {
        Self::IncorrectRequest(INCORRECT_REQUEST.to_string())
    }

    pub fn access_denied() -> Self {
        Self::AccessDenied(ACCESS_DENIED.to_string())
    }

    pub fn resource_not_found() -> Self {
        Self::ResourceNotFound(RESOURCE_NOT_FOUND.to_string())
    }

    pub fn rate_limited() -> Self {
        Self::RateLimited(RATE_LIMITED.to_string())
    }

    pub fn service_unavailable() -> Self {
        Self::ServiceUnavailable(SERVICE_UNAVAILABLE.to_string())
    }

    /// True for both the remote 404 and a local search miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound(_) | Self::NotFoundLocal(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseFailure(err.to_string())
    }
}
