//! CLI for fetching a resource landing page
//!
//! Resolves one page through the Contentful delivery (or preview) API and
//! prints the normalized JSON to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use contentful_client::{ContentfulClient, FetchOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fetch_page")]
#[command(about = "Fetch and normalize a Contentful resource landing page")]
struct Cli {
    /// Landing page slug
    #[arg(long, default_value = "resources")]
    slug: String,

    /// Read draft content from the Preview API
    #[arg(long)]
    preview: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,contentful_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = ContentfulClient::from_env().context("Failed to configure Contentful client")?;
    let page = client
        .fetch_resource_page(&cli.slug, FetchOptions { preview: cli.preview })
        .await
        .with_context(|| format!("Failed to fetch resource page '{}'", cli.slug))?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&page)?
    } else {
        serde_json::to_string(&page)?
    };
    println!("{}", output);

    Ok(())
}
