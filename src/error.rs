//! Error types for the checkout client.
//!
//! Remote protocol failures map one variant per recognized HTTP status,
//! each carrying the raw response body as diagnostic payload. Local
//! validation failures are not errors at all: `create_order` and
//! `update_order` return sentinel values instead (see
//! [`crate::client::Client`]).

use thiserror::Error;

/// Result type alias for checkout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the checkout API.
///
/// The status-mapped variants (`BadRequest` through `InternalServerError`)
/// correspond exactly to the statuses the API documents; any other non-2xx
/// status becomes [`UnexpectedStatus`](Self::UnexpectedStatus).
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value, raised at assignment time before any
    /// network activity.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request or response body (de)serialization failed.
    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The server rejected the request as malformed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The signature did not verify or credentials are wrong (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The credentials do not grant access to the resource (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// No order exists at the requested resource (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The verb is not allowed on the endpoint (405).
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The requested media type cannot be produced (406).
    #[error("not acceptable: {0}")]
    NotAcceptable(String),

    /// The request media type is not supported (415).
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The server failed to process the request (500).
    #[error("internal server error: {0}")]
    InternalServerError(String),

    /// A status outside the documented set, surfaced as an error so no
    /// response goes unclassified.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// Raw HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A create acknowledgment arrived without a `Location` header, so the
    /// new resource identifier cannot be extracted.
    #[error("create response is missing a Location header")]
    MissingLocation,
}

impl Error {
    /// Returns the raw response body carried by remote protocol errors.
    ///
    /// Local errors (`Config`, `Http`, `Json`, `MissingLocation`) carry no
    /// response body and return `None`.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::BadRequest(body)
            | Self::Unauthorized(body)
            | Self::Forbidden(body)
            | Self::NotFound(body)
            | Self::MethodNotAllowed(body)
            | Self::NotAcceptable(body)
            | Self::UnsupportedMediaType(body)
            | Self::InternalServerError(body)
            | Self::UnexpectedStatus { body, .. } => Some(body),
            Self::Config(_) | Self::Http(_) | Self::Json(_) | Self::MissingLocation => None,
        }
    }
}

/// Classification of a response status code.
///
/// Exhaustive over the documented status set, with an explicit `Unmapped`
/// variant so the handling of undocumented statuses is a visible decision
/// rather than a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200 or 201: proceed to parse/extract.
    Success,
    /// 400.
    BadRequest,
    /// 401.
    Unauthorized,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 405.
    MethodNotAllowed,
    /// 406.
    NotAcceptable,
    /// 415.
    UnsupportedMediaType,
    /// 500.
    InternalServerError,
    /// Any status outside the documented set.
    Unmapped,
}

impl StatusClass {
    /// Classifies a raw status code.
    #[must_use]
    pub const fn of(status: u16) -> Self {
        match status {
            200 | 201 => Self::Success,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            406 => Self::NotAcceptable,
            415 => Self::UnsupportedMediaType,
            500 => Self::InternalServerError,
            _ => Self::Unmapped,
        }
    }
}

/// Classifies a response status, turning non-success into a typed error
/// carrying the raw response body.
///
/// Called exactly once per response, immediately after the transport call.
///
/// # Errors
///
/// Returns the status-mapped error for every non-200/201 status.
pub fn check_status(status: u16, body: &[u8]) -> Result<()> {
    let diag = || String::from_utf8_lossy(body).into_owned();
    match StatusClass::of(status) {
        StatusClass::Success => Ok(()),
        StatusClass::BadRequest => Err(Error::BadRequest(diag())),
        StatusClass::Unauthorized => Err(Error::Unauthorized(diag())),
        StatusClass::Forbidden => Err(Error::Forbidden(diag())),
        StatusClass::NotFound => Err(Error::NotFound(diag())),
        StatusClass::MethodNotAllowed => Err(Error::MethodNotAllowed(diag())),
        StatusClass::NotAcceptable => Err(Error::NotAcceptable(diag())),
        StatusClass::UnsupportedMediaType => Err(Error::UnsupportedMediaType(diag())),
        StatusClass::InternalServerError => Err(Error::InternalServerError(diag())),
        StatusClass::Unmapped => Err(Error::UnexpectedStatus { status, body: diag() }),
    }
}
