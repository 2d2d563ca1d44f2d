//! Syndication feed parsing.
//!
//! Extracts RSS `<item>` elements into [`FeedEntry`] values. HTML tags in
//! descriptions are stripped so downstream text handling (deadline
//! extraction, description truncation) sees plain text.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::HarvestError;

/// One entry of a provider's syndication feed.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Plain-text summary (the item description with HTML stripped).
    pub summary: String,
}

/// Parse an RSS XML body into [`FeedEntry`] items.
///
/// Pulls `<title>`, `<link>`, and `<description>` from each `<item>`.
/// Items without a title are dropped; a missing link is kept as empty.
///
/// # Errors
///
/// Returns [`HarvestError::Xml`] if the XML is malformed.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, HarvestError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut description = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("").to_string();
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    title.clear();
                    link.clear();
                    description.clear();
                } else if name == "description" && in_item {
                    in_description = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if !title.is_empty() {
                        entries.push(FeedEntry {
                            title: title.clone(),
                            link: link.clone(),
                            summary: description.clone(),
                        });
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if in_description {
                        // Accumulate all text nodes inside <description>,
                        // including those emitted after nested tags like <b>.
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(&text);
                    } else {
                        match current_tag.as_str() {
                            "title" => title = text,
                            "link" => link = text,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if in_description {
                        description = strip_html(&text);
                    } else if current_tag == "title" {
                        title = strip_html(&text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(HarvestError::Xml(e)),
            _ => {}
        }
    }

    Ok(entries)
}

/// Strip HTML tags from a string and normalize whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
