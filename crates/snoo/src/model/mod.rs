//! Domain records decoded from a thing's `data`.
//!
//! Records never own one another. Cross-references such as a comment's
//! parent are plain [`Fullname`](crate::Fullname) strings.

mod account;
mod comment;
mod created;
mod link;

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

pub use account::Account;
pub use comment::{Comment, CommentResult};
pub use created::{Created, Edited, timestamp};
pub use link::Link;

/// Vote counters of a votable item.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Votes {
    #[serde_as(as = "DefaultOnNull")]
    pub ups: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub downs: i64,
    /// `Some(true)` for an upvote by the viewer, `Some(false)` for a downvote.
    pub likes: Option<bool>,
}
