//! Authentication primitives.
//!
//! A session is authenticated by exactly two values: the session cookie and
//! the modhash. There is no other signing scheme.

mod credentials;
mod tokens;

pub use credentials::Credentials;
pub use tokens::{Modhash, SESSION_COOKIE_NAME, SessionCookie};
