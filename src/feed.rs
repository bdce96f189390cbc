//! RSS/Atom feed parsing into loosely-typed raw entries.
//!
//! One streaming pass with quick-xml handles both dialects: RSS
//! (`<channel>`/`<item>`) and Atom (`<feed>`/`<entry>`), plus RDF-rooted
//! RSS 1.0. Per-entry fields land in the [`RawEntry`] candidate slots;
//! missing fields are simply absent, never an error. The whole body fails
//! with a parse error only when no feed root is found at all or the XML
//! reader gives up.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};

use crate::error::FeedError;
use crate::models::RawEntry;

/// Parse a feed body into its entries, in document order.
pub fn parse_entries(body: &str) -> Result<Vec<RawEntry>, FeedError> {
    let body = scrub_html_entities(body);
    let mut reader = Reader::from_str(&body);

    let mut entries = Vec::new();
    let mut saw_feed_root = false;
    let mut in_entry = false;
    let mut current = RawEntry::default();
    // Name of the field element currently being captured, with its
    // accumulated text. Markup tags nested inside a field are dropped but
    // their text is kept; the cleaner strips markup later anyway.
    let mut active_field: Option<String> = None;
    let mut buffer = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = tag_name(&e);
                match name.as_str() {
                    "rss" | "channel" | "feed" | "rdf:RDF" => saw_feed_root = true,
                    "item" | "entry" => {
                        in_entry = true;
                        current = RawEntry::default();
                        active_field = None;
                        buffer.clear();
                    }
                    _ if in_entry && active_field.is_none() => {
                        if name == "link" {
                            if let Some(href) = alternate_link_href(&e) {
                                current.links.push(href);
                            }
                        }
                        if is_field_tag(&name) {
                            active_field = Some(name);
                            buffer.clear();
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                if in_entry && tag_name(&e) == "link" {
                    if let Some(href) = alternate_link_href(&e) {
                        current.links.push(href);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if active_field.as_deref() == Some(name.as_str()) {
                    assign_field(&mut current, &name, buffer.trim());
                    active_field = None;
                    buffer.clear();
                } else if (name == "item" || name == "entry") && in_entry {
                    in_entry = false;
                    active_field = None;
                    buffer.clear();
                    entries.push(std::mem::take(&mut current));
                }
            }
            Ok(Event::Text(e)) => {
                if in_entry && active_field.is_some() {
                    buffer.push_str(&e.decode().unwrap_or_default());
                }
            }
            Ok(Event::CData(e)) => {
                if in_entry && active_field.is_some() {
                    buffer.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            // Entity references arrive as their own events; resolve the
            // predefined and numeric ones, keep the raw form otherwise so
            // the cleaner can still decode HTML entities downstream.
            Ok(Event::GeneralRef(e)) => {
                if in_entry && active_field.is_some() {
                    if let Ok(Some(resolved)) = e.resolve_char_ref() {
                        buffer.push(resolved);
                    } else {
                        let name = String::from_utf8_lossy(e.as_ref()).into_owned();
                        match resolve_predefined_entity(&name) {
                            Some(resolved) => buffer.push_str(resolved),
                            None => {
                                buffer.push('&');
                                buffer.push_str(&name);
                                buffer.push(';');
                            }
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Parse(e.to_string())),
            _ => {}
        }
    }

    if !saw_feed_root {
        return Err(FeedError::Parse(
            "no RSS or Atom feed root found".to_string(),
        ));
    }
    Ok(entries)
}

/// Replace HTML-only entities that XML parsers reject; feeds embed them in
/// descriptions constantly.
fn scrub_html_entities(body: &str) -> String {
    body.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "…")
}

fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn is_field_tag(name: &str) -> bool {
    matches!(
        name,
        "title"
            | "link"
            | "guid"
            | "id"
            | "pubDate"
            | "published"
            | "updated"
            | "dc:date"
            | "description"
            | "summary"
            | "content"
            | "content:encoded"
    )
}

/// First occurrence of a field wins; later duplicates (e.g. a nested Atom
/// `<source>` block repeating `title`/`updated`) are ignored.
fn assign_field(entry: &mut RawEntry, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let slot = match name {
        "title" => &mut entry.title,
        "link" => &mut entry.link,
        "guid" | "id" => &mut entry.guid,
        "pubDate" => &mut entry.pub_date,
        "published" => &mut entry.published,
        "updated" => &mut entry.updated,
        "dc:date" => &mut entry.dc_date,
        "description" => &mut entry.description,
        "summary" => &mut entry.summary,
        "content" | "content:encoded" => &mut entry.content,
        _ => return,
    };
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}

/// Atom `<link href=..>`: keep the href when `rel` is `alternate` or absent.
fn alternate_link_href(e: &BytesStart) -> Option<String> {
    let mut href = None;
    let mut rel_is_alternate = true;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"href" => {
                href = attr.unescape_value().ok().map(|value| value.into_owned());
            }
            b"rel" => {
                rel_is_alternate = attr
                    .unescape_value()
                    .map(|value| value == "alternate")
                    .unwrap_or(false);
            }
            _ => {}
        }
    }
    if rel_is_alternate { href } else { None }
}
