//! User account record (kind `t2`).

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use super::Created;
use crate::thing::Kind;
use crate::types::Fullname;

/// A user account.
///
/// `modhash` is only present when the account is the session's own.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    /// Account id; prefix with `t2_` for the fullname.
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    /// User name.
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub comment_karma: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub link_karma: i64,
    #[serde(rename = "gold_creddits")]
    pub gold_credits: Option<i64>,
    pub has_mail: Option<bool>,
    pub has_mod_mail: Option<bool>,
    #[serde(rename = "has_verified_email")]
    pub verified_email: Option<bool>,
    #[serde(rename = "hide_from_robots")]
    pub hide_robots: Option<bool>,
    #[serde_as(as = "DefaultOnNull")]
    pub is_friend: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub is_gold: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub is_mod: bool,
    pub over_18: Option<bool>,
    /// Anti-forgery token for the logged-in account.
    pub modhash: Option<String>,
    #[serde(flatten)]
    pub created: Created,
}

impl Account {
    /// The account's fullname, e.g. "t2_1w72".
    pub fn fullname(&self) -> Option<Fullname> {
        Fullname::from_parts(&Kind::Account, &self.id).ok()
    }
}
