//! XPath address construction and the minimal resolver the overlay
//! projector needs.

use crate::tree::XmlNode;

/// Build the XPath segment for `child`, appended to `parent_path`, given the
/// full ordered list of `child`'s siblings on its side of the comparison.
///
/// The dialect is deliberately narrow: absolute paths of `/tag` or
/// `/tag[k]` segments (`k` a 1-based position among same-name siblings),
/// optionally terminated by `/@attr` or `/text()`. This is not a general
/// XPath 1.0 evaluator, it only has to round trip the addresses
/// [`crate::diff::planner`] produces.
///
/// For a root call, pass `""` for `parent_path`; the result then begins
/// with `/`.
pub fn build_xpath(parent_path: &str, child: &XmlNode, siblings: &[XmlNode]) -> String {
    let same_name_siblings: Vec<&XmlNode> = siblings.iter().filter(|s| s.tag == child.tag).collect();
    let segment = if same_name_siblings.len() <= 1 {
        format!("/{}", child.tag)
    } else {
        let position = same_name_siblings
            .iter()
            .position(|s| s.id == child.id)
            .map(|idx| idx + 1)
            .unwrap_or(1);
        format!("/{}[{}]", child.tag, position)
    };
    format!("{parent_path}{segment}")
}

/// Append an attribute terminator to an element path.
pub fn attribute_xpath(element_path: &str, attr_name: &str) -> String {
    format!("{element_path}/@{attr_name}")
}

/// Append a text-node terminator to an element path.
pub fn text_xpath(element_path: &str) -> String {
    format!("{element_path}/text()")
}

/// Strip a trailing `/@attr` or `/text()` terminator, returning the element
/// path a DOM walk should resolve against.
pub fn strip_terminator(xpath: &str) -> &str {
    if let Some(stripped) = xpath.strip_suffix("/text()") {
        return stripped;
    }
    if let Some(at_pos) = xpath.rfind("/@") {
        // Only treat this as a terminator if it is the last segment, i.e.
        // there is no further `/` after the attribute name.
        if !xpath[at_pos + 2..].contains('/') {
            return &xpath[..at_pos];
        }
    }
    xpath
}

/// One parsed path segment: a tag name and an optional 1-based index.
#[derive(Debug, Clone, PartialEq)]
struct Segment<'a> {
    tag: &'a str,
    index: Option<usize>,
}

fn parse_segments(path: &str) -> Option<Vec<Segment<'_>>> {
    let trimmed = path.strip_prefix('/')?;
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    trimmed.split('/').map(parse_one_segment).collect()
}

fn parse_one_segment(raw: &str) -> Option<Segment<'_>> {
    if let Some(open) = raw.find('[') {
        let close = raw.strip_suffix(']')?;
        let index: usize = close[open + 1..].parse().ok()?;
        Some(Segment {
            tag: &raw[..open],
            index: Some(index),
        })
    } else {
        Some(Segment {
            tag: raw,
            index: None,
        })
    }
}

/// Resolve an element path against `root`, returning the sequence of child
/// indices from the root down to the matched element (empty when the path
/// addresses the root itself). Returns `None` if any segment fails to
/// resolve.
pub fn resolve_index_path(root: &XmlNode, path: &str) -> Option<Vec<usize>> {
    let segments = parse_segments(path)?;
    let mut segments = segments.into_iter();

    let root_segment = segments.next()?;
    if root_segment.tag != root.tag {
        return None;
    }

    let mut indices = Vec::new();
    let mut current = root;
    for segment in segments {
        let matching: Vec<usize> = current
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.tag == segment.tag)
            .map(|(idx, _)| idx)
            .collect();

        let chosen = match segment.index {
            Some(k) if k >= 1 => matching.get(k - 1).copied(),
            Some(_) => None,
            None => {
                if matching.len() == 1 {
                    Some(matching[0])
                } else {
                    matching.first().copied()
                }
            }
        }?;

        indices.push(chosen);
        current = &current.children[chosen];
    }

    Some(indices)
}

/// Walk `root` down an index path produced by [`resolve_index_path`].
pub fn node_at<'a>(root: &'a XmlNode, index_path: &[usize]) -> &'a XmlNode {
    let mut current = root;
    for &idx in index_path {
        current = &current.children[idx];
    }
    current
}

/// Mutable counterpart to [`node_at`].
pub fn node_at_mut<'a>(root: &'a mut XmlNode, index_path: &[usize]) -> &'a mut XmlNode {
    let mut current = root;
    for &idx in index_path {
        current = &mut current.children[idx];
    }
    current
}
