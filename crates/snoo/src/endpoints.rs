//! API method paths and request/response types.

use serde::{Deserialize, Serialize};

use crate::thing::Thing;

// ============================================================================
// Method Paths
// ============================================================================

/// Password login.
pub const LOGIN: &str = "/api/login";

/// The session's own account.
pub const ME: &str = "/api/me.json";

/// Comment submission.
pub const COMMENT: &str = "/api/comment";

/// Another user's account.
pub fn user_about(name: &str) -> String {
    format!("/user/{}/about.json", name)
}

/// A listing endpoint such as "r/rust/new" or "user/spez/comments".
pub fn listing(path: &str) -> String {
    format!("/{}.json", path.trim_matches('/'))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Value of the `api_type` field that selects the `{"json": ...}` envelope.
pub const API_TYPE_JSON: &str = "json";

/// Form body for login.
#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    pub api_type: &'a str,
    pub user: &'a str,
    pub passwd: &'a str,
}

/// The `data` payload of a login reply.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginData {
    pub modhash: String,
    pub cookie: String,
    pub need_https: bool,
}

/// Form body for comment submission.
#[derive(Debug, Serialize)]
pub struct CommentForm<'a> {
    pub api_type: &'a str,
    pub thing_id: &'a str,
    pub text: &'a str,
}

/// The `data` payload of a reply that creates things.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThingsData {
    pub things: Vec<Thing>,
}

/// Query parameters for listing pages.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ListingQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_path_is_trimmed() {
        assert_eq!(listing("r/rust/new"), "/r/rust/new.json");
        assert_eq!(listing("/r/rust/"), "/r/rust.json");
    }

    #[test]
    fn user_about_path() {
        assert_eq!(user_about("spez"), "/user/spez/about.json");
    }

    #[test]
    fn empty_query_serializes_to_nothing() {
        let value = serde_json::to_value(ListingQuery::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
