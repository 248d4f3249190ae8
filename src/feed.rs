//! RSS feed that syndicates rendered Instant Articles.
//!
//! Each added article is rendered immediately and projected into a
//! [`FeedItem`]: title, GUID, description, link, authors, publish date and the
//! rendered markup. Items keep insertion order and are never de-duplicated.

use crate::error::Result;
use crate::models::{Article, MACHINE_FORMAT};
use crate::outputs::rss;
use crate::utils::md5_hex;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// RSS version attribute of the root element.
pub const RSS_VERSION: &str = "2.0";
/// Namespace of the `content:encoded` element.
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
/// Channel language used when none was set.
pub const DEFAULT_FEED_LANGUAGE: &str = "en-us";

/// An RSS channel of Instant Articles.
///
/// # Examples
///
/// ```ignore
/// let mut feed = Feed::new("My site", "http://mysite.com", "News");
/// feed.add_article(&article)?;              // GUID is the MD5 of the canonical URL
/// feed.add_article_with_guid(&other, "12333")?;
/// let xml = feed.to_xml()?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    title: String,
    link: String,
    description: String,
    language: Option<String>,
    last_build_date: String,
    items: Vec<FeedItem>,
}

/// One article projected into a feed item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub guid: String,
    /// Subtitle, else the first paragraph, else empty.
    pub description: String,
    pub link: String,
    pub authors: Vec<String>,
    /// Latest timestamp of the article, `YYYY-MM-DDTHH:MM:SSZ`.
    pub pub_date: String,
    /// Rendered article markup, wrapped in CDATA when the feed is written.
    #[serde(skip)]
    pub content: String,
}

impl Feed {
    /// Create a feed with channel title, link and description set.
    pub fn new(title: &str, link: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Set the channel language. Defaults to `en-us` when written.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    /// Overwrite the channel last build date.
    ///
    /// Later articles with a more recent date still raise it.
    pub fn set_last_build_date<Tz: TimeZone>(&mut self, date: DateTime<Tz>) {
        self.last_build_date = date.with_timezone(&Utc).format(MACHINE_FORMAT).to_string();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The channel language, falling back to [`DEFAULT_FEED_LANGUAGE`].
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_FEED_LANGUAGE)
    }

    /// Latest item date seen so far, empty for an empty feed.
    pub fn last_build_date(&self) -> &str {
        &self.last_build_date
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    /// Add an article using the MD5 of its canonical URL as GUID.
    pub fn add_article(&mut self, article: &Article) -> Result<()> {
        self.add_article_with_guid(article, "")
    }

    /// Add an article with an explicit GUID, e.g. a database id.
    ///
    /// An empty `guid` falls back to the MD5 of the canonical URL.
    ///
    /// # Errors
    ///
    /// Rendering errors of the article are returned unchanged and the feed is
    /// left untouched.
    pub fn add_article_with_guid(&mut self, article: &Article, guid: &str) -> Result<()> {
        let content = article.to_html()?;

        let guid = if guid.is_empty() {
            md5_hex(article.canonical())
        } else {
            guid.to_string()
        };

        let description = article
            .header()
            .subtitle
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| article.paragraphs().next().map(str::to_string))
            .unwrap_or_default();

        let pub_date = article
            .header()
            .timestamps
            .iter()
            .map(|ts| ts.datetime.as_str())
            .max()
            .unwrap_or_default()
            .to_string();

        if pub_date > self.last_build_date {
            debug!(%pub_date, previous = %self.last_build_date, "Raising last build date");
            self.last_build_date = pub_date.clone();
        }

        let authors = article
            .header()
            .authors
            .iter()
            .map(|a| a.name.clone())
            .collect();

        info!(%guid, link = %article.canonical(), bytes = content.len(), "Added article to feed");
        self.items.push(FeedItem {
            title: article.title().to_string(),
            guid,
            description,
            link: article.canonical().to_string(),
            authors,
            pub_date,
            content,
        });
        Ok(())
    }

    /// Render the feed as RSS 2.0.
    pub fn to_xml(&self) -> Result<String> {
        rss::render_feed(self)
    }
}
