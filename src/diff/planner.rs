//! Children-alignment and recursive token emission.
//!
//! [`diff_nodes`] assumes its two arguments already share a tag name. The
//! root-name mismatch case is handled once, by the public facade, before
//! this function is ever called.

use crate::cost::{alignment_matrix, saturating_add, CostModel, Side};
use crate::diff::token::XmlDiffToken;
use crate::tree::XmlNode;
use crate::xpath::{attribute_xpath, build_xpath, text_xpath};

/// One step of the reconstructed children-alignment path, indices into the
/// old/new child slices (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlignOp {
    Match(usize, usize),
    Delete(usize),
    Insert(usize),
}

/// Recompute the DP matrix (cheap: built entirely from already-memoized
/// [`CostModel`] lookups) and backtrack from the bottom-right corner,
/// preferring match over delete over insert whenever the matrix admits more
/// than one minimum. Returns operations in left-to-right emission order.
fn align_children(
    cost_model: &CostModel,
    old_children: &[XmlNode],
    new_children: &[XmlNode],
) -> Vec<AlignOp> {
    let dp = alignment_matrix(cost_model, old_children, new_children);
    let mut i = old_children.len();
    let mut j = new_children.len();
    let mut ops = Vec::new();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let match_cost = saturating_add(
                dp[i - 1][j - 1],
                cost_model.pair_cost(&old_children[i - 1], &new_children[j - 1]),
            );
            if match_cost == dp[i][j] {
                ops.push(AlignOp::Match(i - 1, j - 1));
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 {
            let delete_cost = saturating_add(
                dp[i - 1][j],
                cost_model.subtree_cost(Side::Old, &old_children[i - 1]),
            );
            if delete_cost == dp[i][j] {
                ops.push(AlignOp::Delete(i - 1));
                i -= 1;
                continue;
            }
        }
        debug_assert!(j > 0, "DP matrix admits no valid predecessor");
        ops.push(AlignOp::Insert(j - 1));
        j -= 1;
    }

    ops.reverse();
    ops
}

/// Diff two same-tag subtrees, appending tokens to `out`. `path` is the
/// XPath of `old`/`new` themselves (both sides share one path up to this
/// point; only `Match` children recurse with a composed path).
pub fn diff_nodes(
    cost_model: &CostModel,
    old: &XmlNode,
    new: &XmlNode,
    path: &str,
    out: &mut Vec<XmlDiffToken>,
) {
    diff_attributes(old, new, path, out);
    diff_content(old, new, path, out);

    for op in align_children(cost_model, &old.children, &new.children) {
        match op {
            AlignOp::Match(oi, nj) => {
                let child_path = build_xpath(path, &old.children[oi], &old.children);
                diff_nodes(cost_model, &old.children[oi], &new.children[nj], &child_path, out);
            }
            AlignOp::Delete(oi) => {
                let child = &old.children[oi];
                let child_path = build_xpath(path, child, &old.children);
                out.push(XmlDiffToken::element_delete(child_path, child.tag.clone()));
            }
            AlignOp::Insert(nj) => {
                let child = &new.children[nj];
                let child_path = build_xpath(path, child, &new.children);
                out.push(XmlDiffToken::element_insert(child_path, child.tag.clone()));
            }
        }
    }
}

fn diff_attributes(old: &XmlNode, new: &XmlNode, path: &str, out: &mut Vec<XmlDiffToken>) {
    let mut seen = std::collections::HashSet::new();
    for key in old.attributes.keys().chain(new.attributes.keys()) {
        if !seen.insert(key.as_str()) {
            continue;
        }
        let attr_path = attribute_xpath(path, key);
        match (old.attributes.get(key), new.attributes.get(key)) {
            (Some(old_value), Some(new_value)) if old_value != new_value => {
                out.push(XmlDiffToken::attribute_change(
                    attr_path,
                    key.clone(),
                    old_value.clone(),
                    new_value.clone(),
                ));
            }
            (Some(_), Some(_)) => {}
            (Some(old_value), None) => {
                out.push(XmlDiffToken::attribute_delete(
                    attr_path,
                    key.clone(),
                    old_value.clone(),
                ));
            }
            (None, Some(new_value)) => {
                out.push(XmlDiffToken::attribute_insert(
                    attr_path,
                    key.clone(),
                    new_value.clone(),
                ));
            }
            (None, None) => unreachable!("key came from one of the two maps"),
        }
    }
}

fn diff_content(old: &XmlNode, new: &XmlNode, path: &str, out: &mut Vec<XmlDiffToken>) {
    if old.text == new.text {
        return;
    }
    let content_path = text_xpath(path);
    match (old.text.is_empty(), new.text.is_empty()) {
        (true, true) => unreachable!("old.text == new.text was already handled above"),
        (false, true) => out.push(XmlDiffToken::content_delete(content_path, old.text.clone())),
        (true, false) => out.push(XmlDiffToken::content_insert(content_path, new.text.clone())),
        (false, false) => out.push(XmlDiffToken::content_change(
            content_path,
            old.text.clone(),
            new.text.clone(),
        )),
    }
}
