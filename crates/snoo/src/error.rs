//! Error types for the snoo library.
//!
//! This module provides a unified error type with explicit variants for
//! transport failures, HTTP status failures, structured API errors, decode
//! errors, authentication state, and input validation.

use thiserror::Error;

use crate::reply::ApiError;

/// The unified error type for snoo operations.
///
/// Every variant is returned to the immediate caller; nothing is retried or
/// swallowed internally. Callers that want to sleep and resubmit should check
/// [`Error::as_api_error`] and consult [`ApiError::remaining_wait`].
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    /// The server answered with a structured error envelope.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The response did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Authentication errors (missing credentials, rejected cookie).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors (base URL, fullname, header values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the structured API error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if this is an API error whose ratelimit is still in effect.
    pub fn is_ratelimited(&self) -> bool {
        self.as_api_error().is_some_and(ApiError::is_ratelimited)
    }

    pub(crate) fn status(status: reqwest::StatusCode) -> Self {
        Error::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Errors raised when a response body does not match the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not valid JSON or a required field had the wrong type.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope carried a different kind than the endpoint returns.
    #[error("expected kind '{expected}', found '{found}'")]
    KindMismatch { expected: String, found: String },

    /// A result list that must hold at least one entry was empty.
    #[error("empty result: {what}")]
    EmptyResult { what: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError::Json(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// User name or password was empty.
    #[error("no authentication credentials")]
    MissingCredentials,

    /// The cookie was accepted by the server but did not authenticate anyone.
    #[error("bad cookie: no modhash returned for the session")]
    BadCookie,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid fullname.
    #[error("invalid fullname '{value}': {reason}")]
    Fullname { value: String, reason: String },

    /// Invalid user name.
    #[error("invalid user name '{value}'")]
    UserName { value: String },

    /// A header value contained characters that cannot be sent.
    #[error("invalid value for header {header}")]
    HeaderValue { header: &'static str },
}
