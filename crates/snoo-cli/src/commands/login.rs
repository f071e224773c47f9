//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use snoo::Credentials;

use crate::cli::Config;
use crate::output;
use crate::session::{self, storage};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account name
    #[arg(long)]
    pub user: String,

    /// Account password
    #[arg(long, env = "SNOO_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Also store the password, so an expired cookie can be renewed
    #[arg(long)]
    pub save_password: bool,
}

pub async fn run(args: LoginArgs, config: &Config) -> Result<()> {
    let session = session::anonymous(config)?;
    let credentials = Credentials::new(&args.user, &args.password);

    output::note("Logging in...");

    session
        .login(&credentials)
        .await
        .context("Failed to login")?;

    let cookie = session
        .cookie()
        .await
        .context("Login succeeded without a session cookie")?;

    let path = config.auth_path()?;
    let stored = storage::StoredAuth {
        cookie: Some(cookie.as_str().to_string()),
        user: Some(args.user.clone()),
        password: args.save_password.then_some(args.password),
    };
    storage::save(&path, &stored).context("Failed to save credentials")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &args.user);
    output::field("Credentials", &path.display().to_string());

    Ok(())
}
