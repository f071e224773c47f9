//! Listing command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use snoo::{Fullname, Item};

use crate::cli::Config;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ListingArgs {
    /// Listing path, e.g. "r/rust/new" or "user/spez/comments"
    pub path: String,

    /// Items per page (0 lets the server choose, at most 100)
    #[arg(long, default_value_t = 25)]
    pub limit: i64,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Page backwards from the newest items instead of forwards
    #[arg(long)]
    pub backward: bool,

    /// Output one JSON record per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListingArgs, config: &Config) -> Result<()> {
    let session = session::open(config, false).await?;

    let mut paginator = session.listing(&args.path);
    paginator.set_limit(args.limit);

    if !args.json {
        output::note(&format!("Fetching {}...", paginator.url()));
    }

    for page in 1..=args.pages {
        let items = if args.backward {
            paginator.previous().await
        } else {
            paginator.next().await
        }
        .with_context(|| format!("Failed to fetch page {}", page))?;

        if items.is_empty() {
            if !args.json {
                output::note("No more items");
            }
            break;
        }

        for item in &items {
            print_item(item, args.json)?;
        }
    }

    if !args.json {
        println!();
        let cursor = |name: Option<&Fullname>| name.map_or("-", Fullname::as_str).to_string();
        output::field("After", &cursor(paginator.after()));
        output::field("Before", &cursor(paginator.before()));
        output::field("Count", &paginator.count().to_string());
    }

    Ok(())
}

fn print_item(item: &Item, json: bool) -> Result<()> {
    if json {
        return match item {
            Item::Link(link) => output::json(link),
            Item::Comment(comment) => output::json(comment),
            Item::Account(account) => output::json(account),
        };
    }

    let name = item
        .fullname()
        .map_or_else(|| "?".to_string(), |f| f.to_string());

    match item {
        Item::Link(link) => println!(
            "{} {:>6} {} {}",
            name.dimmed(),
            link.score,
            link.title.bold(),
            format!("(r/{}, {} comments)", link.subreddit, link.num_comments).dimmed()
        ),
        Item::Comment(comment) => println!(
            "{} {:>6} {}: {}",
            name.dimmed(),
            comment.score,
            comment.author.cyan(),
            comment.body.lines().next().unwrap_or("")
        ),
        Item::Account(account) => println!("{} {}", name.dimmed(), account.name),
    }

    Ok(())
}
