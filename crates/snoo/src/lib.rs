//! snoo - Session-centric Reddit JSON API client
//!
//! All calls flow through a [`Session`], which holds the session cookie, the
//! modhash and the rate-limit counters. Listings are walked with a
//! [`Paginator`] obtained from the session; responses are decoded from their
//! `{kind, data}` envelopes into [`Item`] variants.
//!
//! # Example
//!
//! ```no_run
//! use snoo::{Credentials, Fullname, Session};
//!
//! # async fn example() -> Result<(), snoo::Error> {
//! let session = Session::new("snoo-example/0.1")?;
//! session.login(&Credentials::new("spez", "hunter2")).await?;
//!
//! let mut front = session.subreddit("rust");
//! front.set_limit(10);
//! for item in front.next().await? {
//!     if let Some(link) = item.as_link() {
//!         println!("{} ({} comments)", link.title, link.num_comments);
//!     }
//! }
//!
//! match session.comment(&Fullname::new("t3_15bfi0")?, "hello").await {
//!     Ok(reply) => println!("posted {}", reply.id),
//!     Err(e) if e.is_ratelimited() => {
//!         let wait = e.as_api_error().map(|a| a.remaining_wait());
//!         println!("rate limited, retry in {:?}", wait);
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod paginator;
pub mod ratelimit;
pub mod reply;
pub mod session;
pub mod thing;
pub mod types;

mod transport;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, SessionCookie};
pub use error::Error;
pub use model::{Account, Comment, CommentResult, Link};
pub use paginator::{MAX_LIMIT, Paginator};
pub use ratelimit::RateLimit;
pub use reply::{ApiError, ApiReply};
pub use session::Session;
pub use thing::{Item, Kind, Listing, Thing};
pub use types::{ApiUrl, Fullname};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
