//! RSS 2.0 rendering of a [`Feed`].
//!
//! Each item embeds its rendered article inside `<content:encoded>` as CDATA.

use crate::error::Result;
use crate::feed::{CONTENT_NAMESPACE, Feed, FeedItem, RSS_VERSION};
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use tracing::{debug, instrument};

type FeedWriter = Writer<Cursor<Vec<u8>>>;

/// Render a feed as an RSS 2.0 document with an XML declaration.
#[instrument(level = "debug", skip_all, fields(items = feed.items().len()))]
pub fn render_feed(feed: &Feed) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", RSS_VERSION));
    rss.push_attribute(("xmlns:content", CONTENT_NAMESPACE));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text(&mut writer, "title", feed.title())?;
    write_text(&mut writer, "link", feed.link())?;
    write_text(&mut writer, "description", feed.description())?;
    write_text(&mut writer, "language", feed.language())?;
    write_text(&mut writer, "lastBuildDate", feed.last_build_date())?;

    for item in feed.items() {
        write_item(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let body = writer.into_inner().into_inner();
    debug!(bytes = body.len(), "Rendered feed");

    let mut result = String::with_capacity(body.len() + 40);
    result.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    result.push_str(&String::from_utf8_lossy(&body));
    Ok(result)
}

fn write_item(writer: &mut FeedWriter, item: &FeedItem) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    write_text(writer, "title", &item.title)?;
    write_text(writer, "guid", &item.guid)?;
    write_text(writer, "description", &item.description)?;
    write_text(writer, "link", &item.link)?;
    for author in &item.authors {
        write_text(writer, "author", author)?;
    }
    write_text(writer, "pubDate", &item.pub_date)?;

    writer.write_event(Event::Start(BytesStart::new("content:encoded")))?;
    let payload = format!("\n{}\n", item.content);
    for cdata in BytesCData::escaped(&payload) {
        writer.write_event(Event::CData(cdata))?;
    }
    writer.write_event(Event::End(BytesEnd::new("content:encoded")))?;

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_text(writer: &mut FeedWriter, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
