//! Session secrets: the session cookie and the modhash.

use std::fmt;

/// Name of the session cookie issued at login.
pub const SESSION_COOKIE_NAME: &str = "reddit_session";

/// The value sent in the `Cookie` header of authenticated calls.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie(String);

impl SessionCookie {
    /// Wrap a complete cookie header value, e.g. "reddit_session=4826...d8eca".
    pub fn new(cookie: impl Into<String>) -> Self {
        Self(cookie.into())
    }

    /// Build the header value from a bare session token returned by login.
    pub(crate) fn from_login_token(token: &str) -> Self {
        Self(format!("{SESSION_COOKIE_NAME}={token}"))
    }

    /// Returns the header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for an empty value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionCookie").field(&"[REDACTED]").finish()
    }
}

/// Anti-forgery token sent as `X-Modhash` on mutating calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Modhash(String);

impl Modhash {
    pub(crate) fn new(modhash: impl Into<String>) -> Self {
        Self(modhash.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Modhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Modhash").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_hides_value_in_debug() {
        let cookie = SessionCookie::new("reddit_session=4826d8eca");
        let debug = format!("{:?}", cookie);
        assert!(!debug.contains("4826"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn login_token_gets_cookie_name() {
        let cookie = SessionCookie::from_login_token("abc");
        assert_eq!(cookie.as_str(), "reddit_session=abc");
    }

    #[test]
    fn modhash_hides_value_in_debug() {
        let modhash = Modhash::new("f0f0f0");
        assert!(!format!("{:?}", modhash).contains("f0f0f0"));
    }
}
