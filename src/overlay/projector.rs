//! Resolves a token stream against the two source documents and paints a
//! `color` attribute onto the nearest "musically meaningful" ancestor of
//! each addressed node.

use crate::diff::{EditType, NodeType, XmlDiffToken};
use crate::error::XmlDiffError;
use crate::parser::parse;
use crate::tree::XmlNode;
use crate::writer::write;
use crate::xpath::{node_at, node_at_mut, resolve_index_path, strip_terminator};

/// Closed set of MusicXML elements eligible to carry the overlay `color`
/// attribute. This is a fixed policy, not a runtime configuration knob.
pub const COLORABLE_TAGS: &[&str] = &[
    "note",
    "direction",
    "harmony",
    "backup",
    "forward",
    "attributes",
    "clef",
    "key",
    "time",
    "part",
    "measure",
    "rest",
];

pub const COLOR_INSERT: &str = "#00FF00";
pub const COLOR_DELETE: &str = "#FF0000";
pub const COLOR_CHANGE: &str = "#FFFF00";

/// Result of applying a token stream to the two source documents.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayResult {
    /// `oldXml` with `color` attributes applied.
    pub old_xml: String,
    /// `newXml` with `color` attributes applied.
    pub new_xml: String,
    /// Tokens that could not be resolved to a colorable element on either
    /// required side, in input order.
    pub unused_tokens: Vec<XmlDiffToken>,
}

/// Parse both documents, apply every token's color to its colorable
/// ancestor, and return the colored documents plus the tokens that could
/// not be placed.
///
/// Never fails because of an unresolvable token. Only a parse failure on
/// either input document is fatal.
pub fn project_overlay(
    old_xml: &str,
    new_xml: &str,
    tokens: &[XmlDiffToken],
) -> Result<OverlayResult, XmlDiffError> {
    let mut old_tree = parse(old_xml.as_bytes())?;
    let mut new_tree = parse(new_xml.as_bytes())?;
    let mut unused_tokens = Vec::new();

    for token in tokens {
        let element_path = strip_terminator(&token.xpath);
        let resolved = match token.node_type {
            NodeType::Element => match token.edit_type {
                EditType::Insert => color_side(&mut new_tree, element_path, COLOR_INSERT),
                EditType::Delete => color_side(&mut old_tree, element_path, COLOR_DELETE),
                EditType::Change => {
                    unreachable!("element tokens never carry CHANGE per the token schema")
                }
            },
            NodeType::Attribute | NodeType::Content => {
                let old_colored = color_side(&mut old_tree, element_path, COLOR_CHANGE);
                let new_colored = color_side(&mut new_tree, element_path, COLOR_CHANGE);
                old_colored || new_colored
            }
        };

        if !resolved {
            unused_tokens.push(token.clone());
        }
    }

    Ok(OverlayResult {
        old_xml: write(&old_tree)?,
        new_xml: write(&new_tree)?,
        unused_tokens,
    })
}

/// Resolve `element_path` against `tree`, walk up to the nearest colorable
/// ancestor (inclusive of the resolved node itself), and set its `color`
/// attribute. Returns whether a colorable ancestor was found and colored.
fn color_side(tree: &mut XmlNode, element_path: &str, color: &str) -> bool {
    let Some(index_path) = resolve_index_path(tree, element_path) else {
        return false;
    };
    let Some(colorable_path) = colorable_ancestor(tree, &index_path) else {
        return false;
    };
    node_at_mut(tree, &colorable_path)
        .attributes
        .insert("color".to_string(), color.to_string());
    true
}

/// Walk from the node at `index_path` upward through its ancestors
/// (including itself) and return the index path of the first whose tag is
/// in [`COLORABLE_TAGS`].
fn colorable_ancestor(root: &XmlNode, index_path: &[usize]) -> Option<Vec<usize>> {
    let mut candidate = index_path.to_vec();
    loop {
        if COLORABLE_TAGS.contains(&node_at(root, &candidate).tag.as_str()) {
            return Some(candidate);
        }
        if candidate.is_empty() {
            return None;
        }
        candidate.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::token::XmlDiffToken;

    const BASE_OLD: &str = r#"<score-partwise>
 <part id="P1">
  <measure number="1">
   <note><pitch><step>C</step><octave>4</octave></pitch><duration>4</duration></note>
   <note><pitch><step>D</step><octave>4</octave></pitch><duration>4</duration></note>
  </measure>
 </part>
</score-partwise>"#;

    const BASE_NEW: &str = r#"<score-partwise>
 <part id="P1">
  <measure number="1">
   <note><pitch><step>C</step><octave>4</octave></pitch><duration>4</duration></note>
   <note><pitch><step>E</step><octave>4</octave></pitch><duration>4</duration></note>
   <note><pitch><step>F</step><octave>4</octave></pitch><duration>4</duration></note>
  </measure>
 </part>
</score-partwise>"#;

    #[test]
    fn colors_change_and_insert_on_note_ancestors() {
        let tokens = vec![
            XmlDiffToken::content_change(
                "/score-partwise/part/measure/note[2]/pitch/step/text()".to_string(),
                "D".to_string(),
                "E".to_string(),
            ),
            XmlDiffToken::element_insert(
                "/score-partwise/part/measure/note[3]".to_string(),
                "note".to_string(),
            ),
        ];

        let result = project_overlay(BASE_OLD, BASE_NEW, &tokens).unwrap();

        assert!(result.old_xml.contains(r#"color="#FFFF00""#));
        assert!(result.new_xml.contains(r#"color="#FFFF00""#));
        assert!(result.new_xml.contains(r#"color="#00FF00""#));
        assert!(result.unused_tokens.is_empty());
    }

    #[test]
    fn colorable_walk_is_inclusive_of_the_addressed_element() {
        let tree = parse(b"<score><part><measure><note/></measure></part></score>").unwrap();
        let index_path = resolve_index_path(&tree, "/score/part/measure/note").unwrap();
        let colorable = colorable_ancestor(&tree, &index_path).unwrap();
        assert_eq!(node_at(&tree, &colorable).tag, "note");
    }

    #[test]
    fn non_colorable_subtree_yields_unused_token() {
        let old = "<score><title>Anthem</title></score>";
        let new = "<score><title>Hymn</title></score>";
        let tokens = vec![XmlDiffToken::content_change(
            "/score/title/text()".to_string(),
            "Anthem".to_string(),
            "Hymn".to_string(),
        )];

        let result = project_overlay(old, new, &tokens).unwrap();
        assert_eq!(result.unused_tokens.len(), 1);
        assert!(!result.old_xml.contains("color="));
        assert!(!result.new_xml.contains("color="));
    }

    #[test]
    fn later_token_overwrites_color_set_by_an_earlier_one() {
        let xml = "<score><note/></score>";
        let tokens = vec![
            XmlDiffToken::content_change(
                "/score/note/text()".to_string(),
                "a".to_string(),
                "b".to_string(),
            ),
            XmlDiffToken::element_insert("/score/note".to_string(), "note".to_string()),
        ];

        let result = project_overlay(xml, xml, &tokens).unwrap();
        assert!(result.new_xml.contains(r#"color="#00FF00""#));
        assert!(!result.new_xml.contains("#FFFF00"));
    }

    #[test]
    fn overlay_never_touches_non_color_content() {
        let old = r#"<score><part id="P1"><note dynamics="80"><pitch>C</pitch></note></part></score>"#;
        let tokens = vec![XmlDiffToken::attribute_change(
            "/score/part/note/@dynamics".to_string(),
            "dynamics".to_string(),
            "80".to_string(),
            "90".to_string(),
        )];

        let result = project_overlay(old, old, &tokens).unwrap();
        assert!(result.old_xml.contains(r#"dynamics="80""#));
        assert!(result.old_xml.contains("<pitch>C</pitch>"));
        assert!(result.old_xml.contains(r#"id="P1""#));
    }
}
