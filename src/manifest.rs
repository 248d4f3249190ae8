//! Feed manifests: a YAML or JSON description of a feed and its articles.
//!
//! A manifest is converted with the same setters a library caller would use,
//! so an article built from a manifest renders exactly like one built by hand.
//!
//! # Example
//!
//! ```yaml
//! title: My site
//! link: https://example.com
//! description: News from all around the world
//! articles:
//!   - title: My article title
//!     canonical: https://example.com/my-article
//!     published: 2016-03-01T10:00:00Z
//!     authors:
//!       - name: Michael
//!         link: https://example.com/michael
//!     content: "<p>Paragraph 1</p><p>Paragraph 2</p>"
//! ```

use crate::error::{InstantError, Result};
use crate::feed::Feed;
use crate::models::{AdSlot, Article};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Serialization format of a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from the file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// Channel metadata and the articles of a feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedManifest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub articles: Vec<ArticleManifest>,
}

/// One article of a manifest. Every field is optional at parse time; missing
/// mandatory fields surface as render errors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArticleManifest {
    pub title: String,
    pub canonical: String,
    /// Explicit feed GUID; the MD5 of `canonical` when absent.
    pub guid: Option<String>,
    pub language: Option<String>,
    pub subtitle: Option<String>,
    pub kick: Option<String>,
    pub style: Option<String>,
    /// RFC 3339 timestamp.
    pub published: Option<String>,
    /// RFC 3339 timestamp.
    pub modified: Option<String>,
    pub authors: Vec<AuthorManifest>,
    pub cover_image: Option<CoverManifest>,
    pub cover_video: Option<CoverManifest>,
    /// Raw markup split into paragraphs and figures.
    pub content: Option<String>,
    /// Paragraphs appended after `content`.
    pub paragraphs: Vec<String>,
    pub footer: Option<FooterManifest>,
    pub automatic_ad: Option<AdManifest>,
    /// Manually placed ads; inserted at `position` or appended.
    pub ads: Vec<AdManifest>,
    pub tracker_code: Option<String>,
    pub tracker_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthorManifest {
    pub name: String,
    pub link: String,
    pub description: String,
}

/// Cover image or video.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoverManifest {
    pub url: String,
    /// Only used for video covers, e.g. `video/mp4`.
    pub mime_type: String,
    pub caption: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FooterManifest {
    pub credits: String,
    pub copyright: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdManifest {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub style: Option<String>,
    pub code: Option<String>,
    pub position: Option<usize>,
}

impl From<&AdManifest> for AdSlot {
    fn from(ad: &AdManifest) -> Self {
        AdSlot {
            src: ad.src.clone(),
            width: ad.width,
            height: ad.height,
            style: ad.style.clone(),
            code: ad.code.clone(),
        }
    }
}

/// Parse a manifest from a string.
pub fn parse(source: &str, format: ManifestFormat) -> Result<FeedManifest> {
    let manifest = match format {
        ManifestFormat::Yaml => serde_yaml::from_str(source)?,
        ManifestFormat::Json => serde_json::from_str(source)?,
    };
    Ok(manifest)
}

/// Read and parse a manifest file; the format follows the extension.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load(path: &Path) -> Result<FeedManifest> {
    let source = fs::read_to_string(path).await?;
    let manifest = parse(&source, ManifestFormat::from_path(path))?;
    debug!(articles = manifest.articles.len(), "Loaded manifest");
    Ok(manifest)
}

fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| InstantError::InvalidTimestamp(format!("{value}: {e}")))
}

impl FeedManifest {
    /// An empty feed carrying this manifest's channel metadata.
    pub fn channel(&self) -> Feed {
        let mut feed = Feed::new(&self.title, &self.link, &self.description);
        if let Some(language) = &self.language {
            feed.set_language(language.as_str());
        }
        feed
    }

    /// Build the whole feed, stopping at the first article that fails.
    pub fn to_feed(&self) -> Result<Feed> {
        let mut feed = self.channel();
        for entry in &self.articles {
            let article = entry.to_article()?;
            feed.add_article_with_guid(&article, entry.guid.as_deref().unwrap_or_default())?;
        }
        Ok(feed)
    }
}

impl ArticleManifest {
    /// Build the article through the regular setters.
    ///
    /// Content is applied first, then ads, then trackers.
    pub fn to_article(&self) -> Result<Article> {
        let mut a = Article::new();
        a.set_title(self.title.as_str());
        a.set_canonical(self.canonical.as_str());
        if let Some(language) = &self.language {
            a.set_language(language.as_str());
        }
        if let Some(subtitle) = &self.subtitle {
            a.set_subtitle(subtitle.as_str());
        }
        if let Some(kick) = &self.kick {
            a.set_kick(kick.as_str());
        }
        if let Some(style) = &self.style {
            a.set_style(style);
        }
        if let Some(published) = &self.published {
            a.set_published(parse_timestamp(published)?);
        }
        if let Some(modified) = &self.modified {
            a.set_modified(parse_timestamp(modified)?);
        }
        for author in &self.authors {
            a.add_author(&author.name, &author.link, &author.description);
        }
        if let Some(cover) = &self.cover_image {
            a.set_cover_image(&cover.url, &cover.caption);
        }
        if let Some(cover) = &self.cover_video {
            a.set_cover_video(&cover.url, &cover.mime_type, &cover.caption);
        }
        if let Some(content) = &self.content {
            a.set_content(content);
        }
        for paragraph in &self.paragraphs {
            a.add_paragraph(paragraph.as_str());
        }
        if let Some(footer) = &self.footer {
            a.set_footer(&footer.credits, &footer.copyright);
        }
        if let Some(ad) = &self.automatic_ad {
            a.set_automatic_ad(ad.into());
        }
        for ad in &self.ads {
            match ad.position {
                Some(position) => a.insert_ad(position, ad.into()),
                None => a.add_ad(ad.into()),
            }
        }
        if let Some(code) = &self.tracker_code {
            a.set_tracker_code(code);
        }
        if let Some(url) = &self.tracker_url {
            a.set_tracker_url(url);
        }
        Ok(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Element;
    use chrono::{TimeZone, Utc};

    const YAML: &str = r#"
title: My site
link: http://mysite.com
description: News from all around the world
language: en-gb
articles:
  - title: My article title
    canonical: http://mysite/url-to-this-article
    subtitle: My article subtitle
    kick: Exclusive
    published: 2016-03-01T10:00:00Z
    authors:
      - name: Michael
        link: http://facebook.com/mmichael
        description: Guest writer
    content: "<p>Paragraph 1</p><p>Paragraph 2</p>"
    paragraphs: ["End"]
    footer:
      copyright: "(C) 2016 MyComp"
    ads:
      - src: https://ads.example.com
        width: 320
        height: 50
        position: 1
  - title: My other title
    canonical: http://mysite/url-to-this-article-number-two
    guid: "12333"
"#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ManifestFormat::from_path(Path::new("feed.json")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("feed.JSON")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("feed.yaml")), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path(Path::new("feed")), ManifestFormat::Yaml);
    }

    #[test]
    fn test_parse_yaml() {
        let m = parse(YAML, ManifestFormat::Yaml).unwrap();
        assert_eq!(m.title, "My site");
        assert_eq!(m.language.as_deref(), Some("en-gb"));
        assert_eq!(m.articles.len(), 2);
        assert_eq!(m.articles[0].authors[0].name, "Michael");
        assert_eq!(m.articles[0].ads[0].position, Some(1));
        assert_eq!(m.articles[1].guid.as_deref(), Some("12333"));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"title":"T","articles":[
            {"title":"A","canonical":"http://x/a","paragraphs":["p"]}
        ]}"#;
        let m = parse(json, ManifestFormat::Json).unwrap();
        assert_eq!(m.articles[0].paragraphs, vec!["p"]);
        assert_eq!(m.description, "");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(
            parse("{not json", ManifestFormat::Json),
            Err(InstantError::Json(_))
        ));
        assert!(matches!(
            parse("articles: [", ManifestFormat::Yaml),
            Err(InstantError::Yaml(_))
        ));
    }

    #[test]
    fn test_manifest_article_matches_setters() {
        let m = parse(YAML, ManifestFormat::Yaml).unwrap();
        let from_manifest = m.articles[0].to_article().unwrap();

        let mut by_hand = Article::new();
        by_hand.set_title("My article title");
        by_hand.set_canonical("http://mysite/url-to-this-article");
        by_hand.set_subtitle("My article subtitle");
        by_hand.set_kick("Exclusive");
        by_hand.set_published(Utc.with_ymd_and_hms(2016, 3, 1, 10, 0, 0).unwrap());
        by_hand.add_author("Michael", "http://facebook.com/mmichael", "Guest writer");
        by_hand.set_content("<p>Paragraph 1</p><p>Paragraph 2</p>");
        by_hand.add_paragraph("End");
        by_hand.set_footer("", "(C) 2016 MyComp");
        by_hand.insert_ad(1, AdSlot::new("https://ads.example.com", 320, 50));

        assert_eq!(from_manifest, by_hand);
        assert_eq!(from_manifest.to_html().unwrap(), by_hand.to_html().unwrap());
        assert!(matches!(from_manifest.elements()[1], Element::Figure(_)));
    }

    #[test]
    fn test_to_feed() {
        let feed = parse(YAML, ManifestFormat::Yaml).unwrap().to_feed().unwrap();
        assert_eq!(feed.language(), "en-gb");
        assert_eq!(feed.items().len(), 2);
        assert_eq!(
            feed.items()[0].guid,
            crate::utils::md5_hex("http://mysite/url-to-this-article")
        );
        assert_eq!(feed.items()[1].guid, "12333");
        assert_eq!(feed.last_build_date(), "2016-03-01T10:00:00Z");
    }

    #[test]
    fn test_invalid_timestamp() {
        let entry = ArticleManifest {
            title: "T".to_string(),
            canonical: "http://x/a".to_string(),
            published: Some("yesterday".to_string()),
            ..ArticleManifest::default()
        };
        assert!(matches!(
            entry.to_article(),
            Err(InstantError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_to_feed_propagates_missing_title() {
        let m = FeedManifest {
            articles: vec![ArticleManifest {
                canonical: "http://x/a".to_string(),
                ..ArticleManifest::default()
            }],
            ..FeedManifest::default()
        };
        assert!(matches!(m.to_feed(), Err(InstantError::MissingTitle)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "instant_articles_manifest_{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, YAML).unwrap();
        let m = load(&path).await.unwrap();
        assert_eq!(m.articles.len(), 2);
        std::fs::remove_file(&path).unwrap();
    }
}
