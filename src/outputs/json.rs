//! JSON index of a feed for downstream tools.
//!
//! The index carries channel metadata and every item except the rendered
//! article markup:
//!
//! ```text
//! {
//!   "title": "My site",
//!   "link": "https://example.com",
//!   "language": "en-us",
//!   "last_build_date": "2016-03-01T10:00:00Z",
//!   "items": [{ "title": …, "guid": …, "description": …, "link": …,
//!               "authors": […], "pub_date": … }]
//! }
//! ```

use crate::error::Result;
use crate::feed::{Feed, FeedItem};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// File name of the index inside the output directory.
pub const INDEX_FILE: &str = "feed_index.json";

#[derive(Debug, Serialize)]
struct FeedIndex<'a> {
    title: &'a str,
    link: &'a str,
    language: &'a str,
    last_build_date: &'a str,
    items: &'a [FeedItem],
}

/// Serialize the feed index to a JSON string.
pub fn feed_index(feed: &Feed) -> Result<String> {
    let index = FeedIndex {
        title: feed.title(),
        link: feed.link(),
        language: feed.language(),
        last_build_date: feed.last_build_date(),
        items: feed.items(),
    };
    Ok(serde_json::to_string_pretty(&index)?)
}

/// Write the feed index to `{output_dir}/feed_index.json`.
///
/// Creates `output_dir` when missing and returns the written path.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_index(feed: &Feed, output_dir: &Path) -> Result<PathBuf> {
    let json = feed_index(feed)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = output_dir.join(INDEX_FILE);
    fs::write(&path, json).await?;
    info!(path = %path.display(), items = feed.items().len(), "Wrote feed index");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;

    fn feed() -> Feed {
        let mut a = Article::new();
        a.set_title("T");
        a.set_canonical("http://mysite/a");
        a.add_author("Michael", "", "");
        a.add_paragraph("First");

        let mut feed = Feed::new("My site", "http://mysite.com", "News");
        feed.add_article_with_guid(&a, "42").unwrap();
        feed
    }

    #[test]
    fn test_feed_index_omits_markup() {
        let json = feed_index(&feed()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "My site");
        assert_eq!(value["language"], "en-us");
        assert_eq!(value["items"][0]["guid"], "42");
        assert_eq!(value["items"][0]["description"], "First");
        assert_eq!(value["items"][0]["authors"][0], "Michael");
        assert!(value["items"][0].get("content").is_none());
        assert!(!json.contains("<!DOCTYPE"));
    }

    #[tokio::test]
    async fn test_write_index_creates_directory() {
        let dir =
            std::env::temp_dir().join(format!("instant_articles_index_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let path = write_index(&feed(), &dir).await.unwrap();
        assert_eq!(path, dir.join(INDEX_FILE));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"guid\": \"42\""));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
