//! Tree-edit-distance diffing: cost-model-driven children alignment that
//! emits a flat, XPath-addressed token stream.

pub mod planner;
pub mod token;

pub use planner::diff_nodes;
pub use token::{EditType, NodeType, XmlDiffToken};
