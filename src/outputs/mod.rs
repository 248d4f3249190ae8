//! Renderers and writers for articles and feeds.
//!
//! # Submodules
//!
//! - [`html`]: Renders an [`crate::Article`] to Instant Article markup
//! - [`rss`]: Renders a [`crate::Feed`] to RSS 2.0 with embedded articles
//! - [`json`]: Writes a JSON index of feed items for other tools
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── feed.xml            # RSS feed
//! ├── feed_index.json     # item index (optional)
//! └── articles/           # one file per article (optional)
//!     └── <guid>.html
//! ```

pub mod html;
pub mod json;
pub mod rss;
