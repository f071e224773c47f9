//! CLI argument definitions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use snoo::ApiUrl;
use snoo::types::DEFAULT_API_URL;

use crate::commands::Command;
use crate::session::storage;

/// User agent sent when `--user-agent` is not given.
pub const DEFAULT_USER_AGENT: &str = concat!("snoo/", env!("SNOO_VERSION"));

/// Reddit JSON API CLI tool.
#[derive(Parser, Debug)]
#[command(name = "snoo")]
#[command(author, version = env!("SNOO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// User agent sent with every request
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// API base URL
    #[arg(long, global = true, env = "SNOO_BASE_URL", default_value = DEFAULT_API_URL)]
    pub base_url: String,

    /// Credential file (defaults to auth.json in the user data directory)
    #[arg(long, global = true, env = "SNOO_AUTH_FILE")]
    pub auth_file: Option<PathBuf>,
}

impl Config {
    pub fn api_url(&self) -> Result<ApiUrl> {
        ApiUrl::new(&self.base_url).context("Invalid base URL")
    }

    pub fn auth_path(&self) -> Result<PathBuf> {
        match &self.auth_file {
            Some(path) => Ok(path.clone()),
            None => storage::default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "snoo",
            "user",
            "spez",
            "--base-url",
            "http://localhost:8080",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.base_url, "http://localhost:8080");
        assert_eq!(cli.config.user_agent, DEFAULT_USER_AGENT);
        assert!(cli.config.api_url().is_ok());
    }

    #[test]
    fn explicit_auth_file_wins() {
        let cli =
            Cli::try_parse_from(["snoo", "--auth-file", "/tmp/auth.json", "whoami"]).unwrap();
        assert_eq!(
            cli.config.auth_path().unwrap(),
            PathBuf::from("/tmp/auth.json")
        );
    }
}
