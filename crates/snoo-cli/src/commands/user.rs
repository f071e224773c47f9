//! User lookup command implementation.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use snoo::Account;

use crate::cli::Config;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct UserArgs {
    /// Account name to look up
    pub name: String,

    /// Output the account as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: UserArgs, config: &Config) -> Result<()> {
    let session = session::open(config, false).await?;
    let account = session
        .user(&args.name)
        .await
        .with_context(|| format!("Failed to look up user '{}'", args.name))?;

    if args.json {
        return output::json_pretty(&account);
    }

    print_account(&account);
    Ok(())
}

pub(super) fn print_account(account: &Account) {
    output::field("User", &account.name);
    if let Some(fullname) = account.fullname() {
        output::field("Fullname", fullname.as_str());
    }
    output::field("Link karma", &account.link_karma.to_string());
    output::field("Comment karma", &account.comment_karma.to_string());
    let created = account.created.utc_time();
    let age = Utc::now().signed_duration_since(created).num_days();
    output::field(
        "Created",
        &format!("{} ({} days ago)", created.format("%Y-%m-%d %H:%M:%S UTC"), age),
    );
    if account.is_gold {
        output::field("Gold", "yes");
    }
    if account.is_mod {
        output::field("Moderator", "yes");
    }
}
