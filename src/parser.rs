use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document (unclosed tag, multiple roots, ...).
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into an [`XmlNode`] tree.
///
/// Self-closing (`<x/>`) and open/close (`<x></x>`) forms produce identical
/// trees. Direct text chunks of one element are concatenated, without
/// trimming, in document order; chunks that are pure formatting whitespace
/// between sibling tags (pretty-printing indentation) are dropped so they
/// never masquerade as content and trigger spurious diffs.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    let mut next_id: u64 = 0;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let node = build_node_start(&e, &reader, &mut next_id)?;
                stack.push(node);
            }
            Event::Empty(e) => {
                let node = build_node_start(&e, &reader, &mut next_id)?;
                place_completed_node(node, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    let text = e.unescape()?.into_owned();
                    if !text.trim().is_empty() {
                        current.text.push_str(&text);
                    }
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    let text = std::str::from_utf8(e.as_ref())?;
                    if !text.trim().is_empty() {
                        current.text.push_str(text);
                    }
                }
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                place_completed_node(node, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    root.ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
}

/// Parse an XML file into an [`XmlNode`] tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn place_completed_node(
    node: XmlNode,
    stack: &mut Vec<XmlNode>,
    root: &mut Option<XmlNode>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    } else {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    Ok(())
}

fn build_node_start(
    e: &quick_xml::events::BytesStart<'_>,
    reader: &Reader<&[u8]>,
    next_id: &mut u64,
) -> Result<XmlNode, ParseError> {
    let tag = qname_to_string(e.name())?;
    let id = *next_id;
    *next_id += 1;
    let mut node = XmlNode::new(id, tag);

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn self_closing_and_open_close_forms_are_equivalent() {
        let a = parse(b"<x/>").unwrap();
        let b = parse(b"<x></x>").unwrap();
        assert_eq!(a.tag, b.tag);
        assert_eq!(a.attributes, b.attributes);
        assert_eq!(a.text, b.text);
        assert_eq!(a.children.len(), b.children.len());
    }

    #[test]
    fn assigns_dense_ids_reset_per_parse() {
        let tree = parse(b"<root><a/><b><c/></b></root>").unwrap();
        assert_eq!(tree.id, 0);
        assert_eq!(tree.children[0].id, 1);
        assert_eq!(tree.children[1].id, 2);
        assert_eq!(tree.children[1].children[0].id, 3);

        let other = parse(b"<root><a/></root>").unwrap();
        assert_eq!(other.id, 0);
        assert_eq!(other.children[0].id, 1);
    }

    #[test]
    fn concatenates_interleaved_text_onto_parent() {
        let tree = parse(b"<p>a<b/>c</p>").unwrap();
        assert_eq!(tree.text, "ac");
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].tag, "b");
    }

    #[test]
    fn rejects_unclosed_elements() {
        assert!(parse(b"<root><a></root>").is_err());
    }

    #[test]
    fn rejects_multiple_top_level_elements() {
        assert!(parse(b"<a/><b/>").is_err());
    }
}
