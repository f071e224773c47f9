//! Fullname type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::thing::Kind;

/// A validated fullname: a kind tag and an item id joined by `_`.
///
/// Fullnames identify items across the API and are the cursor tokens used by
/// listing pagination. They are plain strings, never followed automatically.
///
/// # Example
///
/// ```
/// use snoo::{Fullname, Kind};
///
/// let name = Fullname::new("t3_15bfi0").unwrap();
/// assert_eq!(name.kind(), Kind::Link);
/// assert_eq!(name.id(), "15bfi0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fullname(String);

impl Fullname {
    /// Create a new fullname from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not of the form `t<digit>_<id>`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Build a fullname from a kind and a bare item id.
    pub fn from_parts(kind: &Kind, id: &str) -> Result<Self, Error> {
        Self::new(format!("{}_{}", kind.tag(), id))
    }

    /// Returns the kind tag portion, e.g. "t3".
    pub fn prefix(&self) -> &str {
        self.0.split_once('_').map(|(p, _)| p).unwrap_or("")
    }

    /// Returns the kind encoded in the prefix.
    pub fn kind(&self) -> Kind {
        Kind::from_tag(self.prefix())
    }

    /// Returns the item id portion, e.g. "15bfi0".
    pub fn id(&self) -> &str {
        self.0.split_once('_').map(|(_, id)| id).unwrap_or("")
    }

    /// Returns the full string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::Fullname {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let (prefix, id) = s.split_once('_').ok_or_else(|| invalid("missing '_' separator"))?;

        let digits = prefix
            .strip_prefix('t')
            .ok_or_else(|| invalid("kind tag must start with 't'"))?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("kind tag must be 't' followed by digits"));
        }

        if id.is_empty() {
            return Err(invalid("id cannot be empty"));
        }
        if let Some(c) = id.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(invalid(&format!("id contains invalid character '{c}'")));
        }

        Ok(())
    }
}

impl fmt::Display for Fullname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fullname {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Fullname {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Fullname> for String {
    fn from(name: Fullname) -> Self {
        name.0
    }
}

impl AsRef<str> for Fullname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
