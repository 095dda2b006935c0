use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// A parsed XML element, flattened to the three things this crate's diff
/// model cares about: a tag name, an attribute map, and concatenated direct
/// text. Comments, processing instructions, and namespace resolution are not
/// represented.
///
/// `id` is a dense integer assigned during [`crate::parser::parse`], unique
/// within that single parse call. It exists purely as a memoization key for
/// the cost model (see [`crate::cost`]) and carries no meaning across two
/// different parses of the same document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNode {
    /// Memoization key, unique within one parse.
    pub id: u64,
    /// Element tag name (local name; namespace prefixes are kept opaque).
    pub tag: String,
    /// XML attributes keyed by name. Order is not meaningful and not
    /// preserved; a sorted map keeps serialization deterministic.
    pub attributes: BTreeMap<String, String>,
    /// Child elements, in document order.
    pub children: Vec<XmlNode>,
    /// Concatenation of all direct text chunks of this element, whitespace
    /// preserved, empty string if none.
    pub text: String,
}

impl XmlNode {
    /// Create a new XML node with no attributes, children, or text.
    pub fn new(id: u64, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Return the first child with the provided tag.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Return all children with the provided tag, in document order.
    pub fn get_children(&self, tag: &str) -> Vec<&XmlNode> {
        self.children
            .iter()
            .filter(|child| child.tag == tag)
            .collect()
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (key, value) in &self.attributes {
            write!(f, " {}=\"{}\"", key, value)?;
        }

        if self.children.is_empty() && self.text.is_empty() {
            return write!(f, "/>");
        }

        write!(f, ">{}", self.text)?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::XmlNode;

    #[test]
    fn get_child_finds_first_match_by_tag() {
        let mut root = XmlNode::new(0, "root");
        root.children.push(XmlNode::new(1, "a"));
        root.children.push(XmlNode::new(2, "b"));
        root.children.push(XmlNode::new(3, "a"));

        let found = root.get_child("a").expect("a should exist");
        assert_eq!(found.id, 1);
        assert_eq!(root.get_children("a").len(), 2);
    }

    #[test]
    fn display_renders_self_closing_when_empty() {
        let node = XmlNode::new(0, "x");
        assert_eq!(node.to_string(), "<x/>");
    }
}
