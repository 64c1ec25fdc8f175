//! EPUB text extraction
//!
//! Reads `META-INF/container.xml` to find the package document, follows its
//! spine and turns every XHTML document into text blocks. Blocks are joined
//! with the paragraph marker so the paginator indents each one.

use crate::constants::PARAGRAPH_BREAK;
use crate::types::*;
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Extract the text of an EPUB in spine order
pub fn read_epub(path: &Path) -> Result<String> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let container = read_entry(&mut archive, CONTAINER_PATH)?;
    let opf_path = rootfile_path(&container)?;
    let opf = read_entry(&mut archive, &opf_path)?;
    let package = parse_package(&opf)?;

    let base_dir = match opf_path.rfind('/') {
        Some(idx) => &opf_path[..=idx],
        None => "",
    };

    let mut blocks = Vec::new();
    for idref in &package.spine {
        let Some(item) = package.manifest.get(idref) else {
            warn!("Spine item '{}' is missing from the manifest", idref);
            continue;
        };
        if !is_document(&item.media_type) {
            continue;
        }

        let entry = resolve_href(base_dir, &item.href);
        let document = match read_entry(&mut archive, &entry) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping {}: {}", entry, e);
                continue;
            }
        };
        let doc_blocks = html_blocks(&document)?;
        debug!("{}: {} text blocks", entry, doc_blocks.len());
        blocks.extend(doc_blocks);
    }

    if blocks.is_empty() {
        return Err(ImposeError::Input(format!(
            "{} contains no readable text",
            path.display()
        )));
    }
    Ok(blocks.join(PARAGRAPH_BREAK))
}

// =============================================================================
// Package Document
// =============================================================================

struct ManifestItem {
    href: String,
    media_type: String,
}

struct Package {
    manifest: HashMap<String, ManifestItem>,
    spine: Vec<String>,
}

fn rootfile_path(container: &str) -> Result<String> {
    let mut reader = Reader::from_str(container);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"rootfile" => {
                if let Some(path) = attribute(&e, b"full-path") {
                    return Ok(path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Err(ImposeError::Epub(
        "container.xml names no package document".to_string(),
    ))
}

fn parse_package(opf: &str) -> Result<Package> {
    let mut reader = Reader::from_str(opf);
    let mut manifest = HashMap::new();
    let mut spine = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"item" => {
                    if let (Some(id), Some(href)) = (attribute(&e, b"id"), attribute(&e, b"href")) {
                        let media_type = attribute(&e, b"media-type").unwrap_or_default();
                        manifest.insert(id, ManifestItem { href, media_type });
                    }
                }
                b"itemref" => {
                    if let Some(idref) = attribute(&e, b"idref") {
                        spine.push(idref);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if spine.is_empty() {
        return Err(ImposeError::Epub("Package has an empty spine".to_string()));
    }
    Ok(Package { manifest, spine })
}

fn is_document(media_type: &str) -> bool {
    media_type.is_empty() || media_type == "application/xhtml+xml" || media_type == "text/html"
}

// =============================================================================
// XHTML Text
// =============================================================================

/// Text blocks of one XHTML document, whitespace collapsed
pub fn html_blocks(document: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().check_end_names = false;

    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut skip_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                if is_skipped(name.as_ref()) {
                    skip_depth += 1;
                } else if is_block(name.as_ref()) {
                    flush(&mut current, &mut blocks);
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                if is_skipped(name.as_ref()) {
                    skip_depth = skip_depth.saturating_sub(1);
                } else if is_block(name.as_ref()) {
                    flush(&mut current, &mut blocks);
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"br" {
                    flush(&mut current, &mut blocks);
                }
            }
            Event::Text(t) if skip_depth == 0 => {
                current.push_str(&decode_text(&t));
                current.push(' ');
            }
            Event::CData(t) if skip_depth == 0 => {
                current.push_str(&String::from_utf8_lossy(&t));
                current.push(' ');
            }
            Event::Eof => break,
            _ => {}
        }
    }
    flush(&mut current, &mut blocks);
    Ok(blocks)
}

fn flush(current: &mut String, blocks: &mut Vec<String>) {
    let block = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !block.is_empty() {
        blocks.push(block);
    }
    current.clear();
}

fn is_skipped(name: &[u8]) -> bool {
    matches!(name, b"head" | b"script" | b"style")
}

fn is_block(name: &[u8]) -> bool {
    matches!(
        name,
        b"p" | b"div"
            | b"h1"
            | b"h2"
            | b"h3"
            | b"h4"
            | b"h5"
            | b"h6"
            | b"li"
            | b"blockquote"
            | b"pre"
            | b"section"
            | b"article"
            | b"tr"
            | b"dt"
            | b"dd"
    )
}

fn decode_text(text: &BytesText) -> String {
    match text.unescape_with(html_entity) {
        Ok(s) => s.into_owned(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

/// HTML entities that XML does not predefine
fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "nbsp" => Some("\u{a0}"),
        "mdash" => Some("\u{2014}"),
        "ndash" => Some("\u{2013}"),
        "hellip" => Some("\u{2026}"),
        "lsquo" => Some("\u{2018}"),
        "rsquo" => Some("\u{2019}"),
        "ldquo" => Some("\u{201c}"),
        "rdquo" => Some("\u{201d}"),
        "copy" => Some("\u{a9}"),
        _ => None,
    }
}

// =============================================================================
// Archive Helpers
// =============================================================================

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name)?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn attribute(element: &BytesStart, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Resolve a manifest href against the package directory
fn resolve_href(base_dir: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);
    let joined = format!("{}{}", base_dir, percent_decode(href));

    let mut parts: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
