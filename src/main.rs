mod api;
mod config;
mod error;
mod feed;
mod post;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use api::imgur::ImgurClient;
use api::WardClient;
use config::Config;
use feed::Feed;
use post::{Category, Post};
use report::{submit_report, Draft};

#[derive(Debug, Parser)]
#[command(name = "disaster-ward", about = "Report and view disaster posts")]
struct Cli {
    #[command(flatten)]
    config: Config,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch all posts and show them grouped by category
    List,
    /// Submit a new disaster report
    Report {
        /// What is happening (at most 100 characters)
        #[arg(long)]
        text: String,
        /// Photo to attach, uploaded to the image host first
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli: Cli = config::parse_args();
    let config = cli.config;
    config.init_logger();
    info!("# Disaster Ward #");
    info!("");

    let client = match WardClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut feed = Feed::new();

    let result = match cli.command {
        Command::List => list_posts(&client, &mut feed).await,
        Command::Report { text, image } => {
            let imgur = config.imgur_client_id().map(ImgurClient::new);
            let draft = Draft { text, image };
            submit_report(&config, &client, imgur.as_ref(), &mut feed, draft).await
        }
    };

    match result {
        Ok(()) => {
            display_feed(&feed);
            info!("All done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            // generic user-facing message, details are in the log line above
            eprintln!("Something went wrong. Please try again later.");
            ExitCode::FAILURE
        }
    }
}

async fn list_posts(client: &WardClient, feed: &mut Feed) -> error::ApiResult<()> {
    info!("Loading posts");
    let posts = client.fetch_posts().await?;
    info!("{} posts", posts.len());
    info!("");
    feed.rebuild(posts);
    Ok(())
}

fn display_feed(feed: &Feed) {
    if !log::log_enabled!(log::Level::Info) || feed.is_empty() {
        return;
    }

    let mut tag_width = 8_usize;
    for category in Category::ALL {
        tag_width = category.tag().len().max(tag_width);
    }

    info!("+-{:-<tag_width$}-+-------+------------ - -", " Category ");
    for category in Category::ALL {
        let bucket = feed.bucket(category);
        info!("| {:tag_width$} | {:5} |", category.tag(), bucket.len());
        for post in bucket {
            display_post(post, tag_width);
        }
    }
    info!("+-{}-+-------+------------ - -", "-".repeat(tag_width));

    let unbucketed = feed.len()
        - Category::ALL
            .iter()
            .map(|c| feed.bucket(*c).len())
            .sum::<usize>();
    if unbucketed > 0 {
        info!("({} posts with unknown category not shown)", unbucketed);
    }
    info!("");
}

fn display_post(post: &Post, tag_width: usize) {
    info!(
        "| {:tag_width$} |       | {} @({:.4}, {:.4}) {}",
        "",
        post.user_id,
        post.latitude(),
        post.longitude(),
        post.text
    );
}
