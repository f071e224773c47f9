//! The `{"json": {...}}` reply envelope and structured API errors.
//!
//! Mutating endpoints (`/api/login`, `/api/comment`) answer with HTTP 200 even
//! when the request failed; the failure is reported inside the envelope's
//! `errors` list instead. [`parse_api_reply`] classifies a body into either a
//! usable [`ApiReply`] or an [`ApiError`]. It never retries.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_with::{DefaultOnNull, serde_as};

use crate::error::{DecodeError, Error};

/// The inner object of a `{"json": {...}}` reply.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiReply {
    /// Endpoint-specific payload.
    #[serde(default)]
    pub data: Value,
    /// A `null` list means no errors.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    errors: Vec<Vec<Value>>,
    /// Item identifier, e.g. "c3v7f8u".
    #[serde(default)]
    pub id: Option<String>,
    /// Kind of the payload, when the endpoint returns a thing.
    #[serde(default)]
    pub kind: Option<String>,
    /// Fullname of the payload, e.g. "t1_c3v7f8u".
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    ratelimit: Option<f64>,
}

#[derive(Deserialize)]
struct Envelope {
    json: ApiReply,
}

impl ApiReply {
    /// Raw error entries as sent by the server, in order.
    ///
    /// Only the first entry becomes an [`ApiError`]; the rest are available here.
    pub fn errors(&self) -> &[Vec<Value>] {
        &self.errors
    }

    /// Seconds the server asked us to wait, if any.
    pub fn ratelimit(&self) -> Option<f64> {
        self.ratelimit
    }

    /// Build the structured error for this reply, if the server reported one.
    pub fn error(&self) -> Option<ApiError> {
        let first = self.errors.first()?;
        let part = |i: usize| first.get(i).and_then(Value::as_str).map(str::to_string);

        Some(ApiError::new(
            part(0).unwrap_or_default(),
            part(1).unwrap_or_default(),
            part(2),
            self.ratelimit.unwrap_or(0.0),
        ))
    }

    /// Decode the `data` payload into `T`.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, Error> {
        T::deserialize(&self.data).map_err(|e| Error::Decode(DecodeError::Json(e)))
    }
}

/// Parse a reply body, surfacing the first server-reported error.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the body is not a JSON envelope, and
/// [`Error::Api`] if the envelope's `errors` list is non-empty.
pub fn parse_api_reply(body: &str) -> Result<ApiReply, Error> {
    let envelope: Envelope = serde_json::from_str(body)?;
    match envelope.json.error() {
        Some(err) => Err(Error::Api(err)),
        None => Ok(envelope.json),
    }
}

/// A structured error reported by the API.
///
/// The retry deadline is fixed at construction: a positive `ratelimit`
/// pushes it into the future, otherwise it is already expired.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    id: String,
    description: String,
    field: Option<String>,
    retry_after: DateTime<Utc>,
}

impl ApiError {
    /// Create an error whose retry deadline is `ratelimit` seconds from now.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        field: Option<String>,
        ratelimit: f64,
    ) -> Self {
        let now = Utc::now();
        let retry_after = if ratelimit.is_finite() && ratelimit > 0.0 {
            let millis = (ratelimit * 1000.0).round() as i64;
            TimeDelta::try_milliseconds(millis)
                .and_then(|wait| now.checked_add_signed(wait))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        } else {
            now
        };

        Self {
            id: id.into(),
            description: description.into(),
            field,
            retry_after,
        }
    }

    /// Error identifier, e.g. "RATELIMIT" or "WRONG_PASSWORD".
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Name of the offending form field, when the server names one.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Instant after which a resubmission is allowed.
    pub fn retry_after(&self) -> DateTime<Utc> {
        self.retry_after
    }

    /// Returns `true` while the retry deadline is in the future.
    pub fn is_ratelimited(&self) -> bool {
        self.retry_after > Utc::now()
    }

    /// Time left until the retry deadline; negative once it has passed.
    pub fn remaining_wait(&self) -> TimeDelta {
        self.retry_after - Utc::now()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.description)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratelimited_reply_sets_future_deadline() {
        let body = r#"{"json": {"ratelimit": 600, "errors": [["RATELIMIT", "Test", "vdelay"]]}}"#;
        let err = parse_api_reply(body).unwrap_err();
        let api = err.as_api_error().unwrap();

        assert_eq!(api.to_string(), "RATELIMIT: Test");
        assert_eq!(api.field(), Some("vdelay"));
        assert!(api.is_ratelimited());
        assert!(err.is_ratelimited());
        let wait = api.remaining_wait().num_seconds();
        assert!((599..=600).contains(&wait), "wait was {wait}");
    }

    #[test]
    fn error_without_ratelimit_is_already_expired() {
        let body = r#"{"json": {"errors": [["WRONG_PASSWORD", "Test", "passwd"]]}}"#;
        let err = parse_api_reply(body).unwrap_err();
        let api = err.as_api_error().unwrap();

        assert_eq!(api.id(), "WRONG_PASSWORD");
        assert!(!api.is_ratelimited());
        assert!(api.remaining_wait() <= TimeDelta::zero());
    }

    #[test]
    fn zero_ratelimit_is_not_ratelimited() {
        let api = ApiError::new("RATELIMIT", "slow down", None, 0.0);
        assert!(!api.is_ratelimited());
    }

    #[test]
    fn broken_envelope_is_decode_error() {
        let err = parse_api_reply(r#"{"json": {totallybroken:  }}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn empty_envelope_is_success() {
        let reply = parse_api_reply(r#"{"json": { }}"#).unwrap();
        assert!(reply.errors().is_empty());
        assert!(reply.error().is_none());
    }

    #[test]
    fn null_errors_mean_success() {
        let reply = parse_api_reply(r#"{"json": {"errors": null, "data": {}}}"#).unwrap();
        assert!(reply.errors().is_empty());
        assert!(reply.error().is_none());
    }

    #[test]
    fn only_first_error_is_surfaced() {
        let body = r#"{"json": {"errors": [["FIRST", "one"], ["SECOND", "two"]]}}"#;
        let reply: Envelope = serde_json::from_str(body).unwrap();
        assert_eq!(reply.json.errors().len(), 2);
        assert_eq!(reply.json.error().unwrap().id(), "FIRST");
    }

    #[test]
    fn short_error_entries_do_not_panic() {
        let body = r#"{"json": {"errors": [["ONLY_ID"]]}}"#;
        let err = parse_api_reply(body).unwrap_err();
        let api = err.as_api_error().unwrap();
        assert_eq!(api.id(), "ONLY_ID");
        assert_eq!(api.description(), "");
        assert_eq!(api.field(), None);
    }

    #[test]
    fn payload_decodes_data() {
        #[derive(Deserialize)]
        struct Data {
            modhash: String,
        }

        let reply = parse_api_reply(r#"{"json": {"errors": [], "data": {"modhash": "abc"}}}"#)
            .unwrap();
        let data: Data = reply.payload().unwrap();
        assert_eq!(data.modhash, "abc");
    }
}
