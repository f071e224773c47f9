//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::Config;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, config: &Config) -> Result<()> {
    let path = config.auth_path()?;

    if storage::clear(&path)? {
        output::success("Logged out");
    } else {
        output::note("No stored credentials");
    }

    Ok(())
}
