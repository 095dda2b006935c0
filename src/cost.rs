//! Memoized cost model backing the tree-edit-distance diff planner.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::tree::XmlNode;

/// Stand-in for `+∞`: large enough that no sum of real (non-infinite) costs
/// over a realistic document can reach it, but small enough that repeated
/// saturating addition never wraps.
pub const INFEASIBLE: u64 = u64::MAX / 4;

pub(crate) fn saturating_add(a: u64, b: u64) -> u64 {
    a.saturating_add(b).min(INFEASIBLE)
}

/// Memoized cost functions over a fixed pair of trees.
///
/// A `CostModel` is scoped to exactly one `(old tree, new tree)` comparison;
/// its caches must not be reused across a different pair of trees, since
/// node ids are only meaningful within the parse that produced them.
#[derive(Debug, Default)]
pub struct CostModel {
    /// Node ids are dense per parse, not unique across the two trees, so
    /// `subtree_cost` keeps one cache per side instead of a single id-keyed
    /// cache.
    subtree_cost_old: RefCell<HashMap<u64, u64>>,
    subtree_cost_new: RefCell<HashMap<u64, u64>>,
    /// Only ever called with an old-side node first and a new-side node
    /// second, so a plain `(u64, u64)` key is already a product of two
    /// disjoint id spaces and needs no side tag.
    pair_cost: RefCell<HashMap<(u64, u64), u64>>,
}

/// Which side of the comparison a node belongs to, used only to pick the
/// right `subtree_cost` cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl CostModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// `1 + |attrs| + (text non-empty ? 1 : 0) + Σ subtree_cost(child)`.
    pub fn subtree_cost(&self, side: Side, node: &XmlNode) -> u64 {
        let cache = match side {
            Side::Old => &self.subtree_cost_old,
            Side::New => &self.subtree_cost_new,
        };
        if let Some(&cached) = cache.borrow().get(&node.id) {
            return cached;
        }

        let mut cost = 1 + node.attributes.len() as u64;
        if !node.text.is_empty() {
            cost += 1;
        }
        for child in &node.children {
            cost = saturating_add(cost, self.subtree_cost(side, child));
        }

        cache.borrow_mut().insert(node.id, cost);
        cost
    }

    /// Estimated edit distance to transform subtree `old` into subtree `new`.
    ///
    /// Returns [`INFEASIBLE`] when the tag names differ. Such a pair is
    /// never matched by the planner's children-alignment DP, which falls
    /// back to a delete + insert instead.
    pub fn pair_cost(&self, old: &XmlNode, new: &XmlNode) -> u64 {
        if old.tag != new.tag {
            return INFEASIBLE;
        }
        if let Some(&cached) = self.pair_cost.borrow().get(&(old.id, new.id)) {
            return cached;
        }

        let mut cost = attribute_cost(old, new);
        if old.text != new.text && (!old.text.is_empty() || !new.text.is_empty()) {
            cost += 1;
        }
        cost = saturating_add(cost, self.children_alignment_cost(&old.children, &new.children));

        self.pair_cost.borrow_mut().insert((old.id, new.id), cost);
        cost
    }

    /// The cost of the optimal alignment of two ordered child lists: classic
    /// Wagner-Fischer edit distance where a "substitution" is a recursive
    /// [`CostModel::pair_cost`] call instead of a fixed unit cost.
    pub fn children_alignment_cost(&self, old_children: &[XmlNode], new_children: &[XmlNode]) -> u64 {
        alignment_matrix(self, old_children, new_children)[old_children.len()][new_children.len()]
    }
}

fn attribute_cost(old: &XmlNode, new: &XmlNode) -> u64 {
    // Iterate the union of keys, not the naive chain of both key sets: a key
    // present in both maps would otherwise be visited (and cost) twice.
    let mut seen = std::collections::HashSet::new();
    let mut cost = 0u64;
    for key in old.attributes.keys().chain(new.attributes.keys()) {
        if !seen.insert(key) {
            continue;
        }
        match (old.attributes.get(key), new.attributes.get(key)) {
            (Some(a), Some(b)) if a != b => cost += 1,
            (Some(_), Some(_)) => {}
            _ => cost += 1,
        }
    }
    cost
}

/// Build the full DP matrix for a children-alignment problem. Exposed at
/// crate visibility so the diff planner can reconstruct the chosen
/// operation sequence by backtracking over the same matrix this cost model
/// used to compute the total.
pub(crate) fn alignment_matrix(
    cost_model: &CostModel,
    old_children: &[XmlNode],
    new_children: &[XmlNode],
) -> Vec<Vec<u64>> {
    let n = old_children.len();
    let m = new_children.len();
    let mut dp = vec![vec![0u64; m + 1]; n + 1];

    for i in 1..=n {
        dp[i][0] = saturating_add(dp[i - 1][0], cost_model.subtree_cost(Side::Old, &old_children[i - 1]));
    }
    for j in 1..=m {
        dp[0][j] = saturating_add(dp[0][j - 1], cost_model.subtree_cost(Side::New, &new_children[j - 1]));
    }
    for i in 1..=n {
        for j in 1..=m {
            let delete_cost =
                saturating_add(dp[i - 1][j], cost_model.subtree_cost(Side::Old, &old_children[i - 1]));
            let insert_cost =
                saturating_add(dp[i][j - 1], cost_model.subtree_cost(Side::New, &new_children[j - 1]));
            let match_cost = saturating_add(
                dp[i - 1][j - 1],
                cost_model.pair_cost(&old_children[i - 1], &new_children[j - 1]),
            );
            // Tie-break: match, then delete, then insert.
            dp[i][j] = match_cost.min(delete_cost).min(insert_cost);
        }
    }
    dp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn subtree_cost_counts_attrs_text_and_children() {
        let model = CostModel::new();
        let tree = parse(br#"<a x="1" y="2">hi<b/></a>"#).unwrap();
        // 1 (self) + 2 attrs + 1 (text) + subtree_cost(b)=1 = 5
        assert_eq!(model.subtree_cost(Side::Old, &tree), 5);
    }

    #[test]
    fn pair_cost_is_infeasible_for_different_tags() {
        let model = CostModel::new();
        let a = parse(b"<a/>").unwrap();
        let b = parse(b"<b/>").unwrap();
        assert_eq!(model.pair_cost(&a, &b), INFEASIBLE);
    }

    #[test]
    fn pair_cost_is_zero_for_identical_subtrees() {
        let model = CostModel::new();
        let a = parse(br#"<a x="1"><c/></a>"#).unwrap();
        let b = parse(br#"<a x="1"><c/></a>"#).unwrap();
        assert_eq!(model.pair_cost(&a, &b), 0);
    }

    #[test]
    fn pair_cost_is_memoized_and_stable_across_repeated_calls() {
        let model = CostModel::new();
        let a = parse(br#"<a x="1"><c/></a>"#).unwrap();
        let b = parse(br#"<a x="2"><c/></a>"#).unwrap();
        let first = model.pair_cost(&a, &b);
        let second = model.pair_cost(&a, &b);
        assert_eq!(first, second);
        assert_eq!(first, 1);
    }
}
