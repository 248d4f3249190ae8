//! # Instant Articles
//!
//! Build Instant Articles in memory, render them to the platform's markup and
//! syndicate them through an RSS 2.0 feed.
//!
//! ## Features
//!
//! - Typed article model: title block, byline, dates, cover media, paragraphs,
//!   figures, ads, analytics trackers and footer
//! - Shallow splitting of raw `<p>`/`<figure>` markup into content elements
//! - Markup rendering with self-closing head tags and defaulted metadata
//! - RSS feed with CDATA-embedded articles, MD5 GUIDs and derived dates
//! - YAML/JSON manifests for describing feeds declaratively
//!
//! ## Usage
//!
//! ```ignore
//! use instant_articles::{Article, Feed};
//!
//! let mut a = Article::new();
//! a.set_title("My article title");
//! a.set_canonical("http://mysite/url-to-this-article");
//! a.set_published(chrono::Utc::now());
//! a.set_content("<p>My content</p><p>Other paragraph</p>");
//! a.add_author("Michael", "http://facebook.com/mmichael", "Guest writer");
//! let html = a.to_html()?;
//!
//! let mut feed = Feed::new("My site", "http://mysite.com", "News");
//! feed.add_article(&a)?;
//! let rss = feed.to_xml()?;
//! ```
//!
//! ## Architecture
//!
//! 1. **Model**: [`Article`] is mutated through setters ([`article`])
//! 2. **Rendering**: [`outputs::html`] walks the model; only the title and
//!    canonical link are validated
//! 3. **Syndication**: [`Feed`] renders each added article and keeps an item;
//!    [`outputs::rss`] writes the channel

pub mod article;
pub mod content;
pub mod error;
pub mod feed;
pub mod manifest;
pub mod models;
pub mod outputs;
pub mod utils;

pub use error::{InstantError, Result};
pub use feed::{Feed, FeedItem};
pub use models::{
    AdSlot, Article, Author, Element, Figure, Footer, Frame, Header, Media, Meta, Timestamp,
    TimestampKind,
};
