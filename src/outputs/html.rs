//! Instant Article markup rendering.
//!
//! The `<head>` block is assembled by hand because every `<link>` and `<meta>`
//! must be a self-closing `<tag ... />` with a fixed attribute order. The rest of
//! the document goes through a `quick_xml::Writer`.
//!
//! # Output Shape
//!
//! ```text
//! <!DOCTYPE html><html prefix="op: http://media.facebook.com/op#" lang="en"><head>
//! <link href="…" rel="canonical" />
//! <meta charset="utf-8" />
//! <meta property="op:markup_version" content="v1.0" /></head><body><article>
//! <header>…</header><p>…</p><figure>…</figure><footer>…</footer>
//! </article></body></html>
//! ```

use crate::error::{InstantError, Result};
use crate::models::{
    Article, DEFAULT_CHARSET, Element, Figure, Footer, Header, KICKER_CLASS, MARKUP_VERSION,
    MARKUP_VERSION_PROPERTY, Media, OP_PREFIX,
};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use tracing::{debug, instrument};

type MarkupWriter = Writer<Cursor<Vec<u8>>>;

/// Render an article to Instant Article markup.
///
/// # Errors
///
/// [`InstantError::MissingTitle`] or [`InstantError::MissingCanonicalLink`]
/// when a mandatory field is empty. Nothing is rendered in that case.
#[instrument(level = "debug", skip_all, fields(canonical = %article.canonical()))]
pub fn render_article(article: &Article) -> Result<String> {
    if article.header.title.is_empty() {
        return Err(InstantError::MissingTitle);
    }
    if article.canonical.is_empty() {
        return Err(InstantError::MissingCanonicalLink);
    }

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;

    let mut html = BytesStart::new("html");
    html.push_attribute(("prefix", OP_PREFIX));
    html.push_attribute(("lang", article.language()));
    writer.write_event(Event::Start(html))?;

    writer.write_event(Event::Start(BytesStart::new("head")))?;
    writer.write_event(Event::Text(BytesText::from_escaped(head_block(article))))?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    writer.write_event(Event::Start(BytesStart::new("article")))?;
    write_header(&mut writer, &article.header)?;
    for element in &article.elements {
        match element {
            Element::Paragraph(inner) => write_raw(&mut writer, BytesStart::new("p"), inner)?,
            Element::Figure(figure) => write_figure(&mut writer, figure)?,
        }
    }
    if !article.footer.is_empty() {
        write_footer(&mut writer, &article.footer)?;
    }
    writer.write_event(Event::End(BytesEnd::new("article")))?;
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;

    let bytes = writer.into_inner().into_inner();
    debug!(bytes = bytes.len(), elements = article.elements.len(), "Rendered article");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Self-closing `<link>` and `<meta>` tags, one per line.
///
/// Caller metadata comes first. A `charset` entry and an `op:markup_version`
/// entry are appended only when the caller supplied none.
fn head_block(article: &Article) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n<link href=\"{}\" rel=\"canonical\" />",
        escape(article.canonical.as_str())
    ));

    let mut has_charset = false;
    let mut has_markup_version = false;
    for meta in &article.meta {
        out.push_str("\n<meta ");
        if let Some(charset) = meta.charset.as_deref().filter(|v| !v.is_empty()) {
            out.push_str(&format!("charset=\"{}\" ", escape(charset)));
            has_charset = true;
        }
        if let Some(property) = meta.property.as_deref().filter(|v| !v.is_empty()) {
            out.push_str(&format!("property=\"{}\" ", escape(property)));
            has_markup_version |= property == MARKUP_VERSION_PROPERTY;
        }
        if let Some(content) = meta.content.as_deref().filter(|v| !v.is_empty()) {
            out.push_str(&format!("content=\"{}\" ", escape(content)));
        }
        out.push_str("/>");
    }

    if !has_charset {
        out.push_str(&format!("\n<meta charset=\"{}\" />", DEFAULT_CHARSET));
    }
    if !has_markup_version {
        out.push_str(&format!(
            "\n<meta property=\"{}\" content=\"{}\" />",
            MARKUP_VERSION_PROPERTY, MARKUP_VERSION
        ));
    }
    out
}

fn write_header(writer: &mut MarkupWriter, header: &Header) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("header")))?;
    write_text(writer, BytesStart::new("h1"), &header.title)?;
    if let Some(subtitle) = &header.subtitle {
        write_text(writer, BytesStart::new("h2"), subtitle)?;
    }
    if let Some(kick) = &header.kick {
        let mut h3 = BytesStart::new("h3");
        h3.push_attribute(("class", KICKER_CLASS));
        write_text(writer, h3, kick)?;
    }
    for ts in &header.timestamps {
        let mut time = BytesStart::new("time");
        time.push_attribute(("class", ts.kind.class()));
        time.push_attribute(("datetime", ts.datetime.as_str()));
        write_text(writer, time, &ts.text)?;
    }
    for author in &header.authors {
        writer.write_event(Event::Start(BytesStart::new("address")))?;
        let mut a = BytesStart::new("a");
        if let Some(link) = &author.link {
            a.push_attribute(("href", link.as_str()));
        }
        write_text(writer, a, &author.name)?;
        if let Some(description) = &author.description {
            writer.write_event(Event::Text(BytesText::new(description)))?;
        }
        writer.write_event(Event::End(BytesEnd::new("address")))?;
    }
    if let Some(cover) = &header.cover {
        write_figure(writer, cover)?;
    }
    for ad in &header.ads {
        write_figure(writer, ad)?;
    }
    writer.write_event(Event::End(BytesEnd::new("header")))?;
    Ok(())
}

fn write_figure(writer: &mut MarkupWriter, figure: &Figure) -> Result<()> {
    let mut start = BytesStart::new("figure");
    if let Some(class) = &figure.class {
        start.push_attribute(("class", class.as_str()));
    }
    writer.write_event(Event::Start(start))?;

    match &figure.media {
        None => {}
        Some(Media::Image { src }) => {
            let mut img = BytesStart::new("img");
            img.push_attribute(("src", src.as_str()));
            writer.write_event(Event::Empty(img))?;
        }
        Some(Media::Frame(frame)) => {
            let mut iframe = BytesStart::new("iframe");
            let attrs = [
                ("src", &frame.src),
                ("width", &frame.width),
                ("height", &frame.height),
                ("style", &frame.style),
            ];
            for (key, value) in attrs {
                if let Some(value) = value {
                    iframe.push_attribute((key, value.as_str()));
                }
            }
            if frame.hidden {
                iframe.push_attribute(("hidden", ""));
            }
            write_raw(writer, iframe, &frame.code)?;
        }
        Some(Media::Video { src, mime_type }) => {
            writer.write_event(Event::Start(BytesStart::new("video")))?;
            let mut source = BytesStart::new("source");
            source.push_attribute(("src", src.as_str()));
            source.push_attribute(("type", mime_type.as_str()));
            writer.write_event(Event::Empty(source))?;
            writer.write_event(Event::End(BytesEnd::new("video")))?;
        }
    }

    if let Some(caption) = &figure.caption {
        write_raw(writer, BytesStart::new("figcaption"), caption)?;
    }
    writer.write_event(Event::End(BytesEnd::new("figure")))?;
    Ok(())
}

fn write_footer(writer: &mut MarkupWriter, footer: &Footer) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("footer")))?;
    if let Some(credits) = &footer.credits {
        write_raw(writer, BytesStart::new("aside"), credits)?;
    }
    if let Some(copyright) = &footer.copyright {
        write_text(writer, BytesStart::new("small"), copyright)?;
    }
    writer.write_event(Event::End(BytesEnd::new("footer")))?;
    Ok(())
}

/// `<tag>text</tag>` with `text` escaped.
fn write_text(writer: &mut MarkupWriter, start: BytesStart<'_>, text: &str) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

/// `<tag>markup</tag>` with `markup` written verbatim.
fn write_raw(writer: &mut MarkupWriter, start: BytesStart<'_>, markup: &str) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::from_escaped(markup)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}
