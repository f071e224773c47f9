//! Comment record (kind `t1`) and the reply to a comment submission.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use super::{Created, Edited, Votes};
use crate::types::Fullname;

/// A comment on a link or on another comment.
///
/// `parent_id` and `link_id` are fullnames; resolving them takes another request.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub author: String,
    #[serde_as(as = "DefaultOnNull")]
    pub body: String,
    #[serde_as(as = "DefaultOnNull")]
    pub body_html: String,
    #[serde_as(as = "DefaultOnNull")]
    pub link_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub parent_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subreddit: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subreddit_id: String,
    pub distinguished: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub score: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub score_hidden: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub gilded: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub stickied: bool,
    pub edited: Edited,
    #[serde(flatten)]
    pub votes: Votes,
    #[serde(flatten)]
    pub created: Created,
}

impl Comment {
    /// The comment's fullname, if the server sent a well-formed one.
    pub fn fullname(&self) -> Option<Fullname> {
        Fullname::new(self.name.as_str()).ok()
    }

    /// Fullname of the item this comment replies to.
    pub fn parent(&self) -> Option<Fullname> {
        Fullname::new(self.parent_id.as_str()).ok()
    }

    /// Fullname of the link this comment belongs to.
    pub fn link(&self) -> Option<Fullname> {
        Fullname::new(self.link_id.as_str()).ok()
    }
}

/// The record returned after posting a comment.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentResult {
    /// Fullname of the new comment.
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    /// Fullname of the link the comment was posted under.
    #[serde_as(as = "DefaultOnNull")]
    pub link: String,
    /// Fullname of the parent item.
    #[serde_as(as = "DefaultOnNull")]
    pub parent: String,
    #[serde(rename = "contentHTML")]
    #[serde_as(as = "DefaultOnNull")]
    pub content_html: String,
    #[serde(rename = "contentText")]
    #[serde_as(as = "DefaultOnNull")]
    pub content_text: String,
    #[serde_as(as = "DefaultOnNull")]
    pub replies: String,
}

impl CommentResult {
    /// Fullname of the new comment.
    pub fn fullname(&self) -> Option<Fullname> {
        Fullname::new(self.id.as_str()).ok()
    }
}
