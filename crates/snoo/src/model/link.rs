//! Link record (kind `t3`), a post in a subreddit.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use serde_json::Value;

use super::{Created, Edited, Votes};
use crate::types::Fullname;

/// A subreddit post.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    /// Item identifier, e.g. "15bfi0".
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    /// Fullname of the item, e.g. "t3_15bfi0".
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub title: String,
    /// Account name of the poster.
    #[serde_as(as = "DefaultOnNull")]
    pub author: String,
    #[serde(rename = "author_flair_css_class")]
    pub author_flair_class: Option<String>,
    pub author_flair_text: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub domain: String,
    #[serde_as(as = "DefaultOnNull")]
    pub url: String,
    /// Relative URL of the permanent link.
    #[serde_as(as = "DefaultOnNull")]
    pub permalink: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subreddit: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subreddit_id: String,
    #[serde(rename = "is_self")]
    #[serde_as(as = "DefaultOnNull")]
    pub selfpost: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub selftext: String,
    pub selftext_html: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub thumbnail: String,
    #[serde(rename = "link_flair_css_class")]
    pub link_flair_class: Option<String>,
    pub link_flair_text: Option<String>,
    pub distinguished: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub num_comments: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub score: i64,
    #[serde(rename = "over_18")]
    #[serde_as(as = "DefaultOnNull")]
    pub nsfw: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub clicked: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub hidden: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub saved: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub stickied: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub visited: bool,
    pub edited: Edited,
    pub media: Value,
    pub media_embed: Value,
    #[serde(flatten)]
    pub votes: Votes,
    #[serde(flatten)]
    pub created: Created,
}

impl Link {
    /// The link's fullname, if the server sent a well-formed one.
    pub fn fullname(&self) -> Option<Fullname> {
        Fullname::new(self.name.as_str()).ok()
    }
}
