//! Kind discriminators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind tag carried by every thing envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    /// `t1`
    Comment,
    /// `t2`
    Account,
    /// `t3`
    Link,
    /// `t4`
    Message,
    /// `t5`
    Subreddit,
    /// `t6`
    Award,
    /// `t8`
    PromoCampaign,
    /// `Listing`
    Listing,
    /// Any tag this crate does not know.
    Unknown(String),
}

const TAGS: &[(&str, Kind)] = &[
    ("t1", Kind::Comment),
    ("t2", Kind::Account),
    ("t3", Kind::Link),
    ("t4", Kind::Message),
    ("t5", Kind::Subreddit),
    ("t6", Kind::Award),
    ("t8", Kind::PromoCampaign),
    ("Listing", Kind::Listing),
];

impl Kind {
    /// Parse a tag; unrecognized tags become [`Kind::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        TAGS.iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| Kind::Unknown(tag.to_string()))
    }

    /// The wire tag, e.g. "t3".
    pub fn tag(&self) -> &str {
        match self {
            Kind::Unknown(tag) => tag,
            known => TAGS
                .iter()
                .find(|(_, kind)| kind == known)
                .map(|(t, _)| *t)
                .unwrap_or(""),
        }
    }
}

impl From<String> for Kind {
    fn from(tag: String) -> Self {
        Kind::from_tag(&tag)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        for (tag, kind) in TAGS {
            assert_eq!(Kind::from_tag(tag), *kind);
            assert_eq!(kind.tag(), *tag);
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let kind = Kind::from_tag("t7");
        assert_eq!(kind, Kind::Unknown("t7".to_string()));
        assert_eq!(kind.to_string(), "t7");
    }
}
