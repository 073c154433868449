//! WebDAV multistatus parsing
//!
//! Reduces a PROPFIND `multistatus` response to the fields the lister
//! consumes: href, collection flag, last-modified token, and content
//! length. Namespace prefixes vary between servers (`d:`, `D:`, none),
//! so element names are matched on their local part only.

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

/// One `<response>` element of a multistatus body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DavResource {
    /// Server-rooted href, percent-encoded as reported
    pub href: String,
    /// True when `<resourcetype>` contains `<collection/>`
    pub is_collection: bool,
    /// `getlastmodified` text, kept verbatim as the opaque mtime token
    pub modified: Option<String>,
    /// `getcontentlength` in bytes, when present and numeric
    pub size: Option<u64>,
}

/// Which element's text is currently being captured
enum Capture {
    None,
    Href,
    Modified,
    Length,
}

/// Parses a multistatus body into its resources.
///
/// Properties inside a failed propstat (e.g. a 404 block) carry no text,
/// so only the granted property values are captured. Responses without
/// an href are dropped.
pub fn parse_multistatus(xml: &str) -> Result<Vec<DavResource>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut resources = Vec::new();
    let mut current: Option<DavResource> = None;
    let mut capture = Capture::None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                b"response" => current = Some(DavResource::default()),
                b"href" => capture = Capture::Href,
                b"getlastmodified" => capture = Capture::Modified,
                b"getcontentlength" => capture = Capture::Length,
                b"collection" => mark_collection(&mut current),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if local_name(e.name().as_ref()) == b"collection" {
                    mark_collection(&mut current);
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(resource) = current.as_mut() {
                    let text = t.unescape()?.into_owned();
                    match capture {
                        Capture::Href => resource.href = text,
                        Capture::Modified => resource.modified = Some(text),
                        Capture::Length => resource.size = text.trim().parse().ok(),
                        Capture::None => {}
                    }
                }
            }
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                b"response" => {
                    if let Some(resource) = current.take() {
                        if !resource.href.is_empty() {
                            resources.push(resource);
                        }
                    }
                }
                b"href" | b"getlastmodified" | b"getcontentlength" => capture = Capture::None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow::anyhow!("malformed multistatus XML: {e}")),
            _ => {}
        }
    }

    Ok(resources)
}

fn mark_collection(current: &mut Option<DavResource>) {
    if let Some(resource) = current.as_mut() {
        resource.is_collection = true;
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}
