//! Data models for an Instant Article and its building blocks.
//!
//! This module defines the typed tree that the renderer walks:
//! - [`Article`]: the document root (head metadata, header, content, footer)
//! - [`Header`] and [`Footer`]: the decorations around the content
//! - [`Element`]: one ordered unit of body content, a paragraph or a figure
//! - [`Figure`] and [`Media`]: a block holding at most one media kind
//!
//! Mutating operations on [`Article`] live in [`crate::article`]; rendering lives
//! in [`crate::outputs::html`].

use chrono::{DateTime, TimeZone, Utc};

/// Namespace prefix carried by the `<html>` root of every article.
pub const OP_PREFIX: &str = "op: http://media.facebook.com/op#";
/// Language used when the article never set one.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Charset synthesized when no charset meta entry was supplied.
pub const DEFAULT_CHARSET: &str = "utf-8";
/// Meta property naming the markup version.
pub const MARKUP_VERSION_PROPERTY: &str = "op:markup_version";
/// Markup version synthesized when no version meta entry was supplied.
pub const MARKUP_VERSION: &str = "v1.0";
/// Meta property selecting a predefined article style.
pub const STYLE_PROPERTY: &str = "fb:article_style";
/// Meta property switching automatic ad placement on or off.
pub const AUTOMATIC_AD_PROPERTY: &str = "fb:use_automatic_ad_placement";

/// Class of the `<h3>` kick above the title.
pub const KICKER_CLASS: &str = "op-kicker";
/// Class of ad slot figures.
pub const AD_CLASS: &str = "op-ad";
/// Class of analytics tracker figures.
pub const TRACKER_CLASS: &str = "op-tracker";

/// Machine readable timestamp format, always UTC.
pub const MACHINE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
/// Human readable timestamp format used when the caller gives none.
pub const HUMAN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An Instant Article before it is rendered.
///
/// Build it with the setters in [`crate::article`], then render it with
/// [`Article::to_html`] or hand it to [`crate::Feed::add_article`].
///
/// The title and the canonical link are mandatory. Their absence is only
/// detected when the article is rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub(crate) language: Option<String>,
    pub(crate) canonical: String,
    pub(crate) meta: Vec<Meta>,
    pub(crate) header: Header,
    pub(crate) elements: Vec<Element>,
    pub(crate) footer: Footer,
}

impl Article {
    /// Create an empty article.
    pub fn new() -> Self {
        Self::default()
    }

    /// The article title, empty when unset.
    pub fn title(&self) -> &str {
        &self.header.title
    }

    /// The canonical URL, empty when unset.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The language code, falling back to [`DEFAULT_LANGUAGE`].
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Head metadata in insertion order.
    pub fn meta(&self) -> &[Meta] {
        &self.meta
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Body content in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    /// Inner markup of every paragraph, skipping figures.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|el| match el {
            Element::Paragraph(html) => Some(html.as_str()),
            Element::Figure(_) => None,
        })
    }
}

/// Header of the article: title block, byline, dates and cover.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    /// Rendered as `<h1>`.
    pub title: String,
    /// Rendered as `<h2>`.
    pub subtitle: Option<String>,
    /// Rendered as `<h3 class="op-kicker">`.
    pub kick: Option<String>,
    pub authors: Vec<Author>,
    pub timestamps: Vec<Timestamp>,
    /// Cover image or video. Setting a new cover replaces the old one.
    pub cover: Option<Figure>,
    /// Ads placed automatically by the platform.
    pub ads: Vec<Figure>,
}

/// One byline entry, rendered as `<address>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub link: Option<String>,
    pub description: Option<String>,
}

/// Which date a [`Timestamp`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampKind {
    Published,
    Modified,
}

impl TimestampKind {
    /// The `class` attribute of the rendered `<time>` element.
    pub fn class(self) -> &'static str {
        match self {
            TimestampKind::Published => "op-published",
            TimestampKind::Modified => "op-modified",
        }
    }
}

/// A dated header entry with both machine and human renderings.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    pub kind: TimestampKind,
    /// `YYYY-MM-DDTHH:MM:SSZ`. Fixed width, so it orders lexicographically.
    pub datetime: String,
    pub text: String,
}

impl Timestamp {
    /// Timestamp rendered with the fixed [`HUMAN_FORMAT`].
    pub fn new<Tz: TimeZone>(kind: TimestampKind, instant: &DateTime<Tz>) -> Self {
        let utc = instant.with_timezone(&Utc);
        Self {
            kind,
            datetime: utc.format(MACHINE_FORMAT).to_string(),
            text: utc.format(HUMAN_FORMAT).to_string(),
        }
    }

    /// Timestamp with a caller supplied human rendering.
    pub fn with_text<Tz: TimeZone>(
        kind: TimestampKind,
        instant: &DateTime<Tz>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            ..Self::new(kind, instant)
        }
    }
}

/// A `<meta>` entry of the head block.
///
/// Only the attributes that are set get rendered, always in the order
/// `charset`, `property`, `content`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub charset: Option<String>,
    pub property: Option<String>,
    pub content: Option<String>,
}

impl Meta {
    pub fn charset(charset: impl Into<String>) -> Self {
        Self {
            charset: Some(charset.into()),
            ..Self::default()
        }
    }

    pub fn property(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub(crate) fn is_property(&self, name: &str) -> bool {
        self.property.as_deref() == Some(name)
    }
}

/// One unit of article body content.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Inner markup of a `<p>`, written verbatim.
    Paragraph(String),
    Figure(Figure),
}

/// A media block with an optional caption and style class.
///
/// Figures read from raw markup may carry no media; they still render as a
/// `<figure>` with their caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub media: Option<Media>,
    /// Inner markup of `<figcaption>`, written verbatim.
    pub caption: Option<String>,
    /// `class` attribute, e.g. [`AD_CLASS`] or [`TRACKER_CLASS`].
    pub class: Option<String>,
}

impl Figure {
    pub fn new(media: Media) -> Self {
        Self {
            media: Some(media),
            caption: None,
            class: None,
        }
    }

    /// A figure with a caption and no media.
    pub fn caption_only(caption: impl Into<String>) -> Self {
        Self {
            media: None,
            caption: None,
            class: None,
        }
        .with_caption(caption)
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::new(Media::Image { src: src.into() })
    }

    pub fn video(src: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::new(Media::Video {
            src: src.into(),
            mime_type: mime_type.into(),
        })
    }

    pub fn frame(frame: Frame) -> Self {
        Self::new(Media::Frame(frame))
    }

    /// Set the caption; an empty caption is ignored.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        let caption = caption.into();
        self.caption = (!caption.is_empty()).then_some(caption);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// The media held by a [`Figure`].
#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    /// `<img src>`
    Image { src: String },
    /// `<iframe>` with optional inline code
    Frame(Frame),
    /// `<video><source src type></video>`
    Video { src: String, mime_type: String },
}

/// An embedded `<iframe>`: interactive embeds, ads and trackers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub src: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub style: Option<String>,
    pub hidden: bool,
    /// Inner markup of the frame, written verbatim.
    pub code: String,
}

/// An ad slot served through an `<iframe>`.
///
/// Converts into a [`Figure`] with class [`AD_CLASS`].
#[derive(Debug, Clone, PartialEq)]
pub struct AdSlot {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub style: Option<String>,
    pub code: Option<String>,
}

impl AdSlot {
    pub fn new(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
            style: None,
            code: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<AdSlot> for Figure {
    fn from(ad: AdSlot) -> Self {
        Figure::frame(Frame {
            src: (!ad.src.is_empty()).then_some(ad.src),
            width: Some(ad.width.to_string()),
            height: Some(ad.height.to_string()),
            style: ad.style.filter(|s| !s.is_empty()),
            hidden: false,
            code: ad.code.unwrap_or_default(),
        })
        .with_class(AD_CLASS)
    }
}

/// Footer of the article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Footer {
    /// Inner markup of `<aside>`, written verbatim.
    pub credits: Option<String>,
    /// Text of `<small>`, escaped on output.
    pub copyright: Option<String>,
}

impl Footer {
    pub fn is_empty(&self) -> bool {
        self.credits.is_none() && self.copyright.is_none()
    }
}
