//! HTTP transport.
//!
//! Every call runs inside one critical section that covers sending the
//! request, overwriting the rate-limit counters from the response headers,
//! and reading the body. Two concurrent calls can therefore never interleave
//! their counter updates.

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::auth::{Modhash, SessionCookie};
use crate::error::{Error, InvalidInputError};
use crate::ratelimit::RateLimit;
use crate::types::ApiUrl;

/// Anti-forgery header.
pub const X_MODHASH: &str = "x-modhash";

/// HTTP client bound to one API base URL.
#[derive(Debug)]
pub(crate) struct Transport {
    client: reqwest::Client,
    api: ApiUrl,
    rate_limit: Mutex<RateLimit>,
}

/// Status and body of a completed call.
#[derive(Debug)]
pub(crate) struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    /// Turn a non-success status into [`Error::Status`].
    pub fn ensure_success(self) -> Result<Self, Error> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::status(self.status))
        }
    }
}

impl Transport {
    /// Create a transport that sends `user_agent` on every call.
    pub fn new(api: ApiUrl, user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|_| InvalidInputError::HeaderValue {
                header: "User-Agent",
            })?;

        Ok(Self {
            client,
            api,
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Returns the API base URL.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Snapshot of the counters, consistent with the last completed call.
    pub async fn rate_limit(&self) -> RateLimit {
        *self.rate_limit.lock().await
    }

    /// GET a URL without query parameters.
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<Reply, Error> {
        debug!(%url, "GET");
        self.execute(self.client.get(url).headers(headers)).await
    }

    /// GET a URL with query parameters.
    pub async fn get_with_query<Q>(
        &self,
        url: &str,
        query: &Q,
        headers: HeaderMap,
    ) -> Result<Reply, Error>
    where
        Q: Serialize + std::fmt::Debug,
    {
        debug!(%url, "GET");
        trace!(?query, "query parameters");
        self.execute(self.client.get(url).query(query).headers(headers))
            .await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form<F>(&self, url: &str, form: &F, headers: HeaderMap) -> Result<Reply, Error>
    where
        F: Serialize,
    {
        debug!(%url, "POST");
        self.execute(self.client.post(url).form(form).headers(headers))
            .await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Reply, Error> {
        let mut rate_limit = self.rate_limit.lock().await;

        let response = request.send().await?;
        rate_limit.update_from_headers(response.headers());
        debug!(
            used = rate_limit.used,
            remaining = rate_limit.remaining,
            reset = rate_limit.reset_seconds,
            "rate limit updated"
        );

        let status = response.status();
        trace!(%status, "response");
        let body = response.text().await?;

        Ok(Reply { status, body })
    }
}

/// Build the authentication headers for one call.
///
/// Each header is present only when its value is non-empty.
pub(crate) fn auth_headers(
    cookie: Option<&SessionCookie>,
    modhash: Option<&Modhash>,
) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
        let mut value = HeaderValue::from_str(cookie.as_str())
            .map_err(|_| InvalidInputError::HeaderValue { header: "Cookie" })?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    if let Some(modhash) = modhash.filter(|m| !m.as_str().is_empty()) {
        let mut value = HeaderValue::from_str(modhash.as_str())
            .map_err(|_| InvalidInputError::HeaderValue { header: "X-Modhash" })?;
        value.set_sensitive(true);
        headers.insert(X_MODHASH, value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_credentials_means_no_headers() {
        let headers = auth_headers(None, None).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn empty_values_are_omitted() {
        let cookie = SessionCookie::new("");
        let modhash = Modhash::new("");
        let headers = auth_headers(Some(&cookie), Some(&modhash)).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn cookie_and_modhash_are_attached() {
        let cookie = SessionCookie::new("reddit_session=abc");
        let modhash = Modhash::new("m0d");
        let headers = auth_headers(Some(&cookie), Some(&modhash)).unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "reddit_session=abc");
        assert_eq!(headers.get("x-modhash").unwrap(), "m0d");
        assert!(headers.get(COOKIE).unwrap().is_sensitive());
    }

    #[test]
    fn control_characters_are_rejected() {
        let cookie = SessionCookie::new("bad\nvalue");
        let err = auth_headers(Some(&cookie), None).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::HeaderValue { header: "Cookie" })
        ));
    }

    #[test]
    fn bad_user_agent_is_rejected() {
        assert!(Transport::new(ApiUrl::default(), "snoo\n1.0").is_err());
    }

    #[test]
    fn non_success_status_is_error() {
        let reply = Reply {
            status: StatusCode::FORBIDDEN,
            body: String::new(),
        };
        assert!(matches!(
            reply.ensure_success(),
            Err(Error::Status { status: 403, .. })
        ));
    }
}
