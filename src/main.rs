//! # instant_articles
//!
//! Render an Instant Articles RSS feed from a YAML or JSON manifest.
//!
//! ## Usage
//!
//! ```sh
//! instant_articles -i feed.yaml -o ./public --articles --index
//! ```
//!
//! ## Pipeline
//!
//! 1. **Loading**: Parse the manifest
//! 2. **Building**: Turn every manifest entry into an article and add it to the
//!    feed; entries that fail to build or render are logged and skipped
//! 3. **Output**: Write `feed.xml`, plus per-article markup and a JSON index
//!    when asked to

use clap::Parser;
use instant_articles::manifest;
use instant_articles::outputs::json;
use instant_articles::utils::{slugify, unique_file_names};
use std::error::Error;
use tokio::fs;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("instant_articles starting up");

    let args = Cli::parse();
    debug!(?args.input, ?args.output_dir, "Parsed CLI arguments");

    // ---- Load manifest ----
    let manifest = match manifest::load(&args.input).await {
        Ok(m) => m,
        Err(e) => {
            error!(path = %args.input.display(), error = %e, "Failed to load manifest");
            return Err(e.into());
        }
    };
    info!(articles = manifest.articles.len(), "Loaded manifest");

    // ---- Build feed ----
    let mut feed = manifest.channel();
    for (i, entry) in manifest.articles.iter().enumerate() {
        let article = match entry.to_article() {
            Ok(a) => a,
            Err(e) => {
                warn!(
                    index = i,
                    canonical = %entry.canonical,
                    error = %e,
                    "Invalid article; skipping"
                );
                continue;
            }
        };
        let guid = entry.guid.as_deref().unwrap_or_default();
        if let Err(e) = feed.add_article_with_guid(&article, guid) {
            warn!(
                index = i,
                canonical = %entry.canonical,
                error = %e,
                "Article failed to render; skipping"
            );
        }
    }

    let total = manifest.articles.len();
    let added = feed.items().len();
    info!(total, added, skipped = total - added, "Built feed");

    // ---- Output ----
    fs::create_dir_all(&args.output_dir).await?;

    let feed_path = args.output_dir.join("feed.xml");
    let rss = feed.to_xml()?;
    if let Err(e) = fs::write(&feed_path, rss).await {
        error!(path = %feed_path.display(), error = %e, "Failed writing feed");
        return Err(e.into());
    }
    info!(path = %feed_path.display(), "Wrote feed");

    if args.articles {
        let articles_dir = args.output_dir.join("articles");
        fs::create_dir_all(&articles_dir).await?;
        let names = unique_file_names(feed.items().iter().map(|item| item.guid.as_str()), "html");
        let mut written = 0usize;
        for (item, name) in feed.items().iter().zip(&names) {
            if *name != format!("{}.html", slugify(&item.guid)) {
                warn!(guid = %item.guid, file = %name, "Article file name adjusted to stay unique");
            }
            let path = articles_dir.join(name);
            if let Err(e) = fs::write(&path, &item.content).await {
                error!(path = %path.display(), error = %e, "Failed writing article");
            } else {
                written += 1;
                debug!(path = %path.display(), "Wrote article");
            }
        }
        info!(path = %articles_dir.display(), count = written, "Wrote articles");
    }

    if args.index {
        if let Err(e) = json::write_index(&feed, &args.output_dir).await {
            error!(error = %e, "Failed to write feed index");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );

    Ok(())
}
