//! Thing envelopes and their decoding.
//!
//! Every object the API returns is wrapped in a `{kind, data}` envelope. The
//! `kind` tag says which record `data` holds; `data` is kept as raw JSON until
//! a decoder for that kind picks it up. See [`decode_any`] for the rules.

mod decode;
mod kind;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::{DecodeError, Error};
use crate::model::{Account, Comment, Link};
use crate::types::Fullname;

pub use decode::{decode_any, decode_as_account, decode_as_comment, decode_as_link, decode_listing};
pub use kind::Kind;

/// A kind-tagged envelope around one record.
///
/// Deserialization is lenient: a missing or non-string `kind` becomes
/// `Kind::Unknown("")` and a missing or non-string `name`/`id` becomes empty,
/// so such an envelope decodes to no item instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    /// Which record `data` holds.
    #[serde(default = "unknown_kind", deserialize_with = "lenient_kind")]
    pub kind: Kind,
    /// Fullname of the item, when sent at envelope level.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Item identifier, when sent at envelope level.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Record payload; only interpretable once `kind` is known.
    #[serde(default)]
    pub data: Value,
}

impl Thing {
    /// Wrap a payload in an envelope of the given kind.
    pub fn new(kind: Kind, data: Value) -> Self {
        Self {
            kind,
            name: String::new(),
            id: String::new(),
            data,
        }
    }

    /// Check the envelope kind before decoding `data`.
    pub(crate) fn expect_kind(&self, expected: &Kind) -> Result<(), Error> {
        if &self.kind == expected {
            Ok(())
        } else {
            Err(DecodeError::KindMismatch {
                expected: expected.to_string(),
                found: self.kind.to_string(),
            }
            .into())
        }
    }
}

/// A page of things plus the server's boundary tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    /// Server-echoed token after the last child.
    pub after: Option<String>,
    /// Server-echoed token before the first child.
    pub before: Option<String>,
    pub modhash: Option<String>,
    /// Children in server order. Entries that are not envelopes are dropped.
    #[serde(deserialize_with = "lenient_children")]
    pub children: Vec<Thing>,
}

impl Listing {
    /// Every decodable child, in order. See [`decode_listing`].
    pub fn items(&self) -> Vec<Item> {
        decode_listing(self)
    }

    /// Only the comment children.
    pub fn comments(&self) -> Vec<Comment> {
        self.children.iter().filter_map(decode_as_comment).collect()
    }

    /// Only the link children.
    pub fn links(&self) -> Vec<Link> {
        self.children.iter().filter_map(decode_as_link).collect()
    }
}

impl TryFrom<Thing> for Listing {
    type Error = Error;

    /// Decode a listing envelope. Any kind other than `Listing` is an error.
    fn try_from(thing: Thing) -> Result<Self, Self::Error> {
        thing.expect_kind(&Kind::Listing)?;
        Ok(serde_json::from_value(thing.data)?)
    }
}

fn unknown_kind() -> Kind {
    Kind::Unknown(String::new())
}

fn lenient_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Kind, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(tag) => Kind::from(tag),
        _ => unknown_kind(),
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_children<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Thing>, D::Error> {
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|child| match Thing::deserialize(child) {
            Ok(thing) => Some(thing),
            Err(error) => {
                trace!(%error, "dropping listing child that is not an envelope");
                None
            }
        })
        .collect())
}

/// One decoded record.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Comment(Comment),
    Account(Account),
    Link(Link),
}

impl Item {
    /// The kind this item was decoded from.
    pub fn kind(&self) -> Kind {
        match self {
            Item::Comment(_) => Kind::Comment,
            Item::Account(_) => Kind::Account,
            Item::Link(_) => Kind::Link,
        }
    }

    /// The item's fullname, if it carries a usable one.
    pub fn fullname(&self) -> Option<Fullname> {
        match self {
            Item::Comment(c) => c
                .fullname()
                .or_else(|| Fullname::from_parts(&Kind::Comment, &c.id).ok()),
            Item::Account(a) => a.fullname(),
            Item::Link(l) => l
                .fullname()
                .or_else(|| Fullname::from_parts(&Kind::Link, &l.id).ok()),
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Item::Comment(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Item::Link(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_account(&self) -> Option<&Account> {
        match self {
            Item::Account(a) => Some(a),
            _ => None,
        }
    }
}
