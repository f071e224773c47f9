//! Validated primitive types.

mod api_url;
mod fullname;

pub use api_url::{ApiUrl, DEFAULT_API_URL};
pub use fullname::Fullname;
