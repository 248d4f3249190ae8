//! Setter operations that build up an [`Article`].
//!
//! Every operation mutates the article in place and never fails; the two
//! mandatory fields (title and canonical link) are checked when rendering.

use crate::content;
use crate::error::Result;
use crate::models::{
    AUTOMATIC_AD_PROPERTY, AdSlot, Article, Author, Element, Figure, Frame, Meta, STYLE_PROPERTY,
    TRACKER_CLASS, Timestamp, TimestampKind,
};
use crate::outputs::html;
use crate::utils::non_empty;
use chrono::{DateTime, TimeZone};
use tracing::debug;

impl Article {
    /// Set the `<h1>` title. Mandatory.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.header.title = title.into();
    }

    /// Set the public web URL of the article. Mandatory.
    pub fn set_canonical(&mut self, url: impl Into<String>) {
        self.canonical = url.into();
    }

    /// Set the two-letter language code. Defaults to `en`.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.header.subtitle = Some(subtitle.into());
    }

    /// Set the kick rendered above the title with class `op-kicker`.
    pub fn set_kick(&mut self, kick: impl Into<String>) {
        self.header.kick = Some(kick.into());
    }

    /// Append an author. `link` and `description` may be empty.
    pub fn add_author(&mut self, name: &str, link: &str, description: &str) {
        self.header.authors.push(Author {
            name: name.to_string(),
            link: non_empty(link),
            description: non_empty(description),
        });
    }

    /// Append a published date rendered with the default human format.
    pub fn set_published<Tz: TimeZone>(&mut self, date: DateTime<Tz>) {
        self.add_timestamp(Timestamp::new(TimestampKind::Published, &date));
    }

    /// Append a published date with a caller supplied human rendering.
    pub fn set_published_as<Tz: TimeZone>(&mut self, date: DateTime<Tz>, text: &str) {
        self.add_timestamp(Timestamp::with_text(TimestampKind::Published, &date, text));
    }

    /// Append a modified date rendered with the default human format.
    pub fn set_modified<Tz: TimeZone>(&mut self, date: DateTime<Tz>) {
        self.add_timestamp(Timestamp::new(TimestampKind::Modified, &date));
    }

    pub fn set_modified_as<Tz: TimeZone>(&mut self, date: DateTime<Tz>, text: &str) {
        self.add_timestamp(Timestamp::with_text(TimestampKind::Modified, &date, text));
    }

    pub fn add_timestamp(&mut self, timestamp: Timestamp) {
        self.header.timestamps.push(timestamp);
    }

    /// Use an image as cover, replacing any previous cover.
    ///
    /// Does nothing when `url` is empty. `caption` may be empty and is
    /// written as markup.
    pub fn set_cover_image(&mut self, url: &str, caption: &str) {
        if url.is_empty() {
            return;
        }
        self.header.cover = Some(Figure::image(url).with_caption(caption));
    }

    /// Use a video as cover, replacing any previous cover.
    ///
    /// `mime_type` looks like `video/mp4`. Does nothing when `url` is empty.
    pub fn set_cover_video(&mut self, url: &str, mime_type: &str, caption: &str) {
        if url.is_empty() {
            return;
        }
        self.header.cover = Some(Figure::video(url, mime_type).with_caption(caption));
    }

    /// Select a style defined for the publishing page.
    pub fn set_style(&mut self, style: &str) {
        self.add_meta(Meta::property(STYLE_PROPERTY, style));
    }

    /// Append a head metadata entry. Duplicates are kept.
    pub fn add_meta(&mut self, meta: Meta) {
        self.meta.push(meta);
    }

    /// Replace the footer. `credits` may contain markup such as `<p>`.
    pub fn set_footer(&mut self, credits: &str, copyright: &str) {
        self.footer.credits = non_empty(credits);
        self.footer.copyright = non_empty(copyright);
    }

    /// Split raw markup into paragraphs and figures and append them.
    ///
    /// See [`content::split`] for what is recognized.
    pub fn set_content(&mut self, html: &str) {
        let elements = content::split(html);
        debug!(count = elements.len(), "Appending split content");
        self.elements.extend(elements);
    }

    /// Append a paragraph. The markup is written verbatim.
    pub fn add_paragraph(&mut self, html: impl Into<String>) {
        self.elements.push(Element::Paragraph(html.into()));
    }

    pub fn add_figure(&mut self, figure: Figure) {
        self.elements.push(Element::Figure(figure));
    }

    /// Insert a figure before the element at `position`.
    ///
    /// Positions past the end append.
    pub fn insert_figure(&mut self, position: usize, figure: Figure) {
        let position = position.min(self.elements.len());
        self.elements.insert(position, Element::Figure(figure));
    }

    /// Place an ad in the header and let the platform position ads.
    pub fn set_automatic_ad(&mut self, ad: AdSlot) {
        self.header.ads.push(ad.into());
        self.switch_automatic_ad(true);
    }

    /// Insert an ad at `position` and turn automatic placement off.
    pub fn insert_ad(&mut self, position: usize, ad: AdSlot) {
        self.insert_figure(position, ad.into());
        self.switch_automatic_ad(false);
    }

    /// Append an ad to the content and turn automatic placement off.
    pub fn add_ad(&mut self, ad: AdSlot) {
        self.add_figure(ad.into());
        self.switch_automatic_ad(false);
    }

    /// Append an analytics snippet (for example a `<script>` block).
    pub fn set_tracker_code(&mut self, code: &str) {
        self.add_figure(
            Figure::frame(Frame {
                code: code.to_string(),
                ..Frame::default()
            })
            .with_class(TRACKER_CLASS),
        );
    }

    /// Append an analytics pixel or page loaded from `url`.
    pub fn set_tracker_url(&mut self, url: &str) {
        self.add_figure(
            Figure::frame(Frame {
                src: non_empty(url),
                ..Frame::default()
            })
            .with_class(TRACKER_CLASS),
        );
    }

    /// Render the article as Instant Article markup.
    pub fn to_html(&self) -> Result<String> {
        html::render_article(self)
    }

    // Appended on every call; the last entry in the head wins.
    fn switch_automatic_ad(&mut self, on: bool) {
        self.add_meta(Meta::property(AUTOMATIC_AD_PROPERTY, on.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AD_CLASS, Media};
    use chrono::Utc;

    fn ad() -> AdSlot {
        AdSlot::new("https://ads.example.com/slot", 320, 50)
    }

    fn ad_flags(article: &Article) -> Vec<&str> {
        article
            .meta()
            .iter()
            .filter(|m| m.is_property(AUTOMATIC_AD_PROPERTY))
            .filter_map(|m| m.content.as_deref())
            .collect()
    }

    #[test]
    fn test_basic_setters() {
        let mut a = Article::new();
        a.set_title("My article title");
        a.set_canonical("http://mysite/url-to-this-article");
        a.set_language("fr");
        a.set_subtitle("Sub");
        a.set_kick("Exclusive!");
        assert_eq!(a.title(), "My article title");
        assert_eq!(a.canonical(), "http://mysite/url-to-this-article");
        assert_eq!(a.language(), "fr");
        assert_eq!(a.header().subtitle.as_deref(), Some("Sub"));
        assert_eq!(a.header().kick.as_deref(), Some("Exclusive!"));
    }

    #[test]
    fn test_add_author_optional_fields() {
        let mut a = Article::new();
        a.add_author("Michael", "http://facebook.com/mmichael", "Guest writer");
        a.add_author("Anna", "", "");
        a.add_author("Anna", "", "");
        let authors = &a.header().authors;
        assert_eq!(authors.len(), 3);
        assert_eq!(authors[0].link.as_deref(), Some("http://facebook.com/mmichael"));
        assert_eq!(authors[0].description.as_deref(), Some("Guest writer"));
        assert_eq!(authors[1].link, None);
        assert_eq!(authors[1].description, None);
    }

    #[test]
    fn test_timestamps_are_appended() {
        let mut a = Article::new();
        let published = Utc.with_ymd_and_hms(2016, 3, 1, 10, 0, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2016, 3, 2, 11, 30, 0).unwrap();
        a.set_published(published);
        a.set_modified_as(modified, "March 2nd");
        let ts = &a.header().timestamps;
        assert_eq!(ts.len(), 2);
        assert_eq!(ts[0].kind, TimestampKind::Published);
        assert_eq!(ts[0].datetime, "2016-03-01T10:00:00Z");
        assert_eq!(ts[0].text, "2016-03-01 10:00:00");
        assert_eq!(ts[1].kind, TimestampKind::Modified);
        assert_eq!(ts[1].text, "March 2nd");
    }

    #[test]
    fn test_cover_is_replaced() {
        let mut a = Article::new();
        a.set_cover_image("https://example.com/a.jpg", "Caption");
        a.set_cover_video("https://example.com/v.mp4", "video/mp4", "");
        let cover = a.header().cover.as_ref().unwrap();
        assert_eq!(
            cover.media,
            Some(Media::Video {
                src: "https://example.com/v.mp4".to_string(),
                mime_type: "video/mp4".to_string()
            })
        );
        assert_eq!(cover.caption, None);

        a.set_cover_image("https://example.com/b.jpg", "B");
        let cover = a.header().cover.as_ref().unwrap();
        assert_eq!(
            cover.media,
            Some(Media::Image {
                src: "https://example.com/b.jpg".to_string()
            })
        );
    }

    #[test]
    fn test_cover_with_empty_url_is_ignored() {
        let mut a = Article::new();
        a.set_cover_image("https://example.com/a.jpg", "");
        a.set_cover_image("", "ignored");
        a.set_cover_video("", "video/mp4", "ignored");
        let cover = a.header().cover.as_ref().unwrap();
        assert_eq!(
            cover.media,
            Some(Media::Image {
                src: "https://example.com/a.jpg".to_string()
            })
        );
    }

    #[test]
    fn test_set_footer_overwrites() {
        let mut a = Article::new();
        a.set_footer("<p>Credits</p>", "(C) 2016");
        a.set_footer("", "(C) 2017");
        assert_eq!(a.footer().credits, None);
        assert_eq!(a.footer().copyright.as_deref(), Some("(C) 2017"));
    }

    #[test]
    fn test_set_content_appends_after_existing() {
        let mut a = Article::new();
        a.add_paragraph("First");
        a.set_content("<p>A</p><p>B</p>");
        let paragraphs: Vec<&str> = a.paragraphs().collect();
        assert_eq!(paragraphs, vec!["First", "A", "B"]);
    }

    #[test]
    fn test_insert_figure_past_end_appends() {
        let mut appended = Article::new();
        appended.add_paragraph("A");
        appended.add_paragraph("B");
        let mut inserted = appended.clone();

        appended.add_figure(Figure::image("https://example.com/a.jpg"));
        inserted.insert_figure(99, Figure::image("https://example.com/a.jpg"));
        assert_eq!(appended, inserted);

        let mut exact = Article::new();
        exact.add_paragraph("A");
        exact.add_paragraph("B");
        exact.insert_figure(2, Figure::image("https://example.com/a.jpg"));
        assert_eq!(exact, appended);
    }

    #[test]
    fn test_insert_figure_in_the_middle() {
        let mut a = Article::new();
        a.add_paragraph("A");
        a.add_paragraph("B");
        a.insert_figure(1, Figure::image("https://example.com/a.jpg"));
        assert!(matches!(a.elements()[1], Element::Figure(_)));
        assert_eq!(a.elements()[2], Element::Paragraph("B".to_string()));
    }

    #[test]
    fn test_automatic_ad_sets_flag_and_header_ad() {
        let mut a = Article::new();
        a.set_automatic_ad(ad().with_style("border:0;"));
        assert_eq!(a.header().ads.len(), 1);
        assert_eq!(a.header().ads[0].class.as_deref(), Some(AD_CLASS));
        assert_eq!(ad_flags(&a), vec!["true"]);
    }

    #[test]
    fn test_manual_ads_flag_is_last_write_wins() {
        let mut a = Article::new();
        a.add_paragraph("A");
        a.set_automatic_ad(ad());
        a.insert_ad(0, ad());
        assert_eq!(ad_flags(&a), vec!["true", "false"]);
        assert!(matches!(a.elements()[0], Element::Figure(_)));

        a.set_automatic_ad(ad());
        assert_eq!(ad_flags(&a).last(), Some(&"true"));

        a.add_ad(ad());
        assert_eq!(ad_flags(&a), vec!["true", "false", "true", "false"]);
        assert_eq!(a.elements().len(), 3);
    }

    #[test]
    fn test_ad_flag_keeps_caller_meta() {
        let mut a = Article::new();
        a.add_meta(Meta::property(AUTOMATIC_AD_PROPERTY, "true"));
        a.set_style("default");
        a.add_ad(ad());
        assert_eq!(a.meta().len(), 3);
        assert_eq!(a.meta()[0].content.as_deref(), Some("true"));
        assert!(a.meta()[1].is_property(STYLE_PROPERTY));
        assert_eq!(ad_flags(&a), vec!["true", "false"]);
    }

    #[test]
    fn test_trackers_are_tagged() {
        let mut a = Article::new();
        a.set_tracker_code("<script>ga('send', 'pageview');</script>");
        a.set_tracker_url("https://tracker.example.com/pixel");
        assert_eq!(a.elements().len(), 2);
        for el in a.elements() {
            match el {
                Element::Figure(f) => assert_eq!(f.class.as_deref(), Some(TRACKER_CLASS)),
                other => panic!("expected figure, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_set_style_appends_meta() {
        let mut a = Article::new();
        a.set_style("default");
        a.set_style("default");
        assert_eq!(a.meta().len(), 2);
        assert!(a.meta()[0].is_property(STYLE_PROPERTY));
    }
}
