//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::Config;
use crate::output;
use crate::session;

use super::user::print_account;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Output the account as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, config: &Config) -> Result<()> {
    let session = session::open(config, true).await?;
    let account = session.me().await.context("Failed to fetch account")?;

    if args.json {
        return output::json_pretty(&account);
    }

    print_account(&account);
    if let Some(has_mail) = account.has_mail {
        output::field("Unread mail", if has_mail { "yes" } else { "no" });
    }

    let limit = session.rate_limit().await;
    output::field(
        "Rate limit",
        &format!(
            "{} used, {} remaining, resets in {}s",
            limit.used, limit.remaining, limit.reset_seconds
        ),
    );

    Ok(())
}
