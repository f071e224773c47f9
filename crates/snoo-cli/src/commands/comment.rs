//! Comment command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use snoo::Fullname;

use crate::cli::Config;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Fullname of the link or comment to reply to, e.g. "t3_15bfi0"
    pub parent: String,

    /// Comment text (markdown)
    pub text: String,
}

pub async fn run(args: CommentArgs, config: &Config) -> Result<()> {
    let parent = Fullname::new(&args.parent).context("Invalid parent fullname")?;
    let session = session::open(config, true).await?;

    let result = match session.comment(&parent, &args.text).await {
        Ok(result) => result,
        Err(e) if e.is_ratelimited() => {
            let wait = e
                .as_api_error()
                .map(|api| api.remaining_wait().num_seconds())
                .unwrap_or_default();
            bail!("Rate limited, try again in {}s ({})", wait, e);
        }
        Err(e) => return Err(e).context("Failed to post comment"),
    };

    output::success("Comment posted");
    println!();
    output::field("Fullname", &result.id);
    output::field("Parent", &result.parent);
    output::field("Link", &result.link);

    Ok(())
}
