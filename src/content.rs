//! Shallow splitting of raw article markup into typed content elements.
//!
//! This is not an HTML parser. Top-level `<p>…</p>` and `<figure …>…</figure>`
//! fragments are found with a non-greedy pattern; paragraphs keep their inner
//! markup verbatim and figures are read with `quick_xml` to recover their media.
//! Nested or malformed markup produces best-effort element boundaries.

use crate::models::{Element, Figure, Frame, Media};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;
use tracing::{debug, warn};

static CONTENT_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(?:<p>|<figure[^>]*>).*?(?:</p>|</figure>)")
        .expect("content fragment pattern is valid")
});

/// Split raw markup into paragraphs and figures, in document order.
///
/// Every recognized fragment yields one element. When no fragment is
/// recognized the whole input becomes one paragraph.
pub fn split(html: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut matched = false;

    for m in CONTENT_FRAGMENT.find_iter(html) {
        matched = true;
        let fragment = m.as_str();
        if fragment.starts_with("<p") {
            let inner = fragment.strip_prefix("<p>").unwrap_or(fragment);
            let inner = inner.strip_suffix("</p>").unwrap_or(inner);
            elements.push(Element::Paragraph(inner.to_string()));
        } else {
            let figure = parse_figure(fragment);
            if figure.media.is_none() {
                debug!(
                    fragment = %truncate_for_log(fragment, 120),
                    "Figure without media; keeping caption only"
                );
            }
            elements.push(Element::Figure(figure));
        }
    }

    if !matched {
        elements.push(Element::Paragraph(html.to_string()));
    }

    debug!(count = elements.len(), matched, "Split content");
    elements
}

/// Read a `<figure>` fragment into a [`Figure`].
///
/// The first `img`, `iframe` or `video` found wins; a fragment with none of
/// them gives a figure without media. Frame code and caption are kept as raw
/// inner markup.
pub fn parse_figure(fragment: &str) -> Figure {
    let mut reader = Reader::from_str(fragment);
    reader.config_mut().check_end_names = false;

    let mut class = None;
    let mut caption = None;
    let mut media = None;
    let mut in_video = false;

    loop {
        let (e, has_body) = match reader.read_event() {
            Ok(Event::Start(e)) => (e, true),
            Ok(Event::Empty(e)) => (e, false),
            Ok(Event::Eof) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "Malformed figure markup; keeping what was read");
                break;
            }
        };

        match e.local_name().as_ref() {
            b"figure" => class = attr(&e, b"class"),
            b"img" if media.is_none() => {
                media = attr(&e, b"src").map(|src| Media::Image { src });
            }
            b"video" if media.is_none() => match attr(&e, b"src") {
                Some(src) => {
                    media = Some(Media::Video {
                        src,
                        mime_type: attr(&e, b"type").unwrap_or_default(),
                    });
                }
                None => in_video = true,
            },
            b"source" if in_video && media.is_none() => {
                media = attr(&e, b"src").map(|src| Media::Video {
                    src,
                    mime_type: attr(&e, b"type").unwrap_or_default(),
                });
            }
            b"iframe" if media.is_none() => {
                let mut frame = Frame {
                    src: attr(&e, b"src"),
                    width: attr(&e, b"width"),
                    height: attr(&e, b"height"),
                    style: attr(&e, b"style"),
                    hidden: has_attr(&e, b"hidden"),
                    code: String::new(),
                };
                if has_body {
                    frame.code = inner_markup(&mut reader, &e, fragment);
                }
                media = Some(Media::Frame(frame));
            }
            b"figcaption" if has_body => {
                let text = inner_markup(&mut reader, &e, fragment);
                caption = (!text.is_empty()).then_some(text);
            }
            _ => {}
        }
    }

    Figure {
        media,
        caption,
        class,
    }
}

/// Raw markup between `e` and its closing tag; the reader is moved past it.
fn inner_markup(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>, fragment: &str) -> String {
    match reader.read_to_end(e.name()) {
        Ok(span) => fragment
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
            .to_string(),
        Err(err) => {
            warn!(error = %err, "Unclosed element inside figure");
            String::new()
        }
    }
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.html_attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| {
            let raw = String::from_utf8_lossy(&a.value).into_owned();
            let unescaped = unescape(&raw).map(|v| v.into_owned());
            unescaped.unwrap_or(raw)
        })
        .filter(|v| !v.is_empty())
}

fn has_attr(e: &BytesStart<'_>, key: &[u8]) -> bool {
    e.html_attributes().flatten().any(|a| a.key.as_ref() == key)
}
