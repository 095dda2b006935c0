//! Structural XML diffing and a MusicXML-aware colored overlay projector.
//!
//! Two entry points cover the whole pipeline:
//!
//! - [`compute_xml_diff_tokens`] diffs two XML documents and returns a flat,
//!   XPath-addressed token stream.
//! - [`process_musicxml_diff`] takes that token stream and paints a `color`
//!   attribute onto the nearest musically meaningful ancestor of each
//!   addressed node in both documents.
//!
//! ```
//! let old = "<score><part id=\"P1\"><note/></part></score>";
//! let new = "<score><part id=\"P1\"><note/><note/></part></score>";
//! let tokens = musicxml_diff_overlay::compute_xml_diff_tokens(old, new).unwrap();
//! let overlay = musicxml_diff_overlay::process_musicxml_diff(old, new, &tokens).unwrap();
//! assert!(overlay.new_xml.contains("color="));
//! ```

pub mod cost;
pub mod diff;
pub mod error;
pub mod format;
pub mod overlay;
pub mod parser;
pub mod tree;
pub mod writer;
pub mod xpath;

pub use cost::{CostModel, Side, INFEASIBLE};
pub use diff::{diff_nodes, EditType, NodeType, XmlDiffToken};
pub use error::XmlDiffError;
pub use format::{format_json, format_summary, format_text};
pub use overlay::{project_overlay, OverlayResult, COLORABLE_TAGS, COLOR_CHANGE, COLOR_DELETE, COLOR_INSERT};
pub use parser::{parse, parse_file, ParseError};
pub use tree::XmlNode;
pub use writer::{write, write_file, WriteError};

/// Diff two XML documents and return their flat, XPath-addressed token
/// stream in document order.
///
/// If the two documents' root elements have different tag names, no
/// recursive comparison is attempted: the old root is reported as a single
/// `DELETE` and the new root as a single `INSERT`, both addressed at `/tag`.
pub fn compute_xml_diff_tokens(
    old_xml: &str,
    new_xml: &str,
) -> Result<Vec<XmlDiffToken>, XmlDiffError> {
    let old = parser::parse(old_xml.as_bytes())?;
    let new = parser::parse(new_xml.as_bytes())?;

    let mut tokens = Vec::new();
    if old.tag != new.tag {
        tokens.push(XmlDiffToken::element_delete(
            format!("/{}", old.tag),
            old.tag.clone(),
        ));
        tokens.push(XmlDiffToken::element_insert(
            format!("/{}", new.tag),
            new.tag.clone(),
        ));
        return Ok(tokens);
    }

    let cost_model = CostModel::new();
    diff_nodes(&cost_model, &old, &new, &format!("/{}", old.tag), &mut tokens);
    Ok(tokens)
}

/// Apply a token stream produced by [`compute_xml_diff_tokens`] to the same
/// two source documents and return the colored overlay.
pub fn process_musicxml_diff(
    old_xml: &str,
    new_xml: &str,
    tokens: &[XmlDiffToken],
) -> Result<OverlayResult, XmlDiffError> {
    overlay::project_overlay(old_xml, new_xml, tokens)
}
