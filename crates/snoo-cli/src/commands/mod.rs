//! Subcommand implementations.

mod comment;
mod listing;
mod login;
mod logout;
mod user;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::Config;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with a user name and password
    Login(login::LoginArgs),

    /// Forget stored credentials
    Logout(logout::LogoutArgs),

    /// Display the logged-in account
    Whoami(whoami::WhoamiArgs),

    /// Look up another user's account
    User(user::UserArgs),

    /// Page through a listing such as "r/rust/new"
    Listing(listing::ListingArgs),

    /// Reply to a link or comment
    Comment(comment::CommentArgs),
}

pub async fn handle(cmd: Command, config: &Config) -> Result<()> {
    match cmd {
        Command::Login(args) => login::run(args, config).await,
        Command::Logout(args) => logout::run(args, config).await,
        Command::Whoami(args) => whoami::run(args, config).await,
        Command::User(args) => user::run(args, config).await,
        Command::Listing(args) => listing::run(args, config).await,
        Command::Comment(args) => comment::run(args, config).await,
    }
}
