//! The converted graph: node and edge records plus consumer-side lookups.
//!
//! A `FlowGraph` is produced fresh by each conversion call and owned by the
//! caller. The helpers here cover what a rendering collaborator needs:
//! resolving a clicked node, finding a node by its copyable path string, and
//! walking children in sibling order.

use serde::Serialize;

use crate::node::{FlowEdge, FlowNode, NodeId};
use crate::value::ValueKind;

/// Output of one conversion run.
///
/// Nodes and edges are in pre-order: a parent precedes its children, and
/// siblings appear in iteration/index order. Every non-root node has exactly
/// one incoming edge; the root has none.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// The root node. `None` only for a default-constructed graph.
    pub fn root(&self) -> Option<&FlowNode> {
        self.nodes.first()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id.
    ///
    /// Ids are minted in pre-order, so `nodes` is sorted by id and the
    /// lookup is a binary search.
    pub fn node(&self, id: NodeId) -> Option<&FlowNode> {
        self.nodes
            .binary_search_by_key(&id, |n| n.id)
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// Look up a node by its encoded path string.
    pub fn node_at_path(&self, path: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.path.as_str() == path)
    }

    /// Child nodes of `id`, in sibling order.
    pub fn children_of(&self, id: NodeId) -> Vec<&FlowNode> {
        self.edges
            .iter()
            .filter(|e| e.source == id)
            .filter_map(|e| self.node(e.target))
            .collect()
    }

    /// Deepest depth present in the graph.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Number of nodes of the given kind.
    pub fn count_kind(&self, kind: ValueKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::convert::convert;

    fn sample() -> FlowGraph {
        convert(&json!({"a": 1, "b": [2, 3], "c": {"d": null}})).unwrap()
    }

    #[test]
    fn root_is_the_first_node() {
        let graph = sample();
        assert_eq!(graph.root().unwrap().path.as_str(), "$");
    }

    #[test]
    fn node_lookup_by_id() {
        let graph = sample();
        for expected in &graph.nodes {
            let found = graph.node(expected.id).unwrap();
            assert_eq!(found.path, expected.path);
        }
        let missing = NodeId::new(9_999).unwrap();
        assert!(graph.node(missing).is_none());
    }

    #[test]
    fn node_lookup_by_path() {
        let graph = sample();
        assert_eq!(graph.node_at_path("$/c/d").unwrap().label, "d: null");
        assert!(graph.node_at_path("$/nope").is_none());
    }

    #[test]
    fn children_come_back_in_sibling_order() {
        let graph = sample();
        let b = graph.node_at_path("$/b").unwrap();
        let kids = graph.children_of(b.id);
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0].path.as_str(), "$/b/[0]");
        assert_eq!(kids[1].path.as_str(), "$/b/[1]");
    }

    #[test]
    fn mapping_children_match_key_count() {
        let graph = sample();
        let root_id = graph.root().unwrap().id;
        assert_eq!(graph.children_of(root_id).len(), 3);
    }

    #[test]
    fn depth_and_kind_stats() {
        let graph = sample();
        assert_eq!(graph.max_depth(), 2);
        assert_eq!(graph.count_kind(ValueKind::Mapping), 2);
        assert_eq!(graph.count_kind(ValueKind::Sequence), 1);
        assert_eq!(graph.count_kind(ValueKind::Scalar), 4);
    }

    #[test]
    fn leaves_have_no_children() {
        let graph = sample();
        let a = graph.node_at_path("$/a").unwrap();
        assert!(graph.children_of(a.id).is_empty());
    }
}
