//! Node and edge records emitted by a conversion run.
//!
//! [`NodeId`]s are minted by a run-scoped allocator and are only meaningful
//! within the run that produced them; re-converting an edited document mints
//! a fresh sequence.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::layout::Position;
use crate::path::TreePath;
use crate::value::ValueKind;

/// Unique, niche-optimized identifier for a node within one conversion run.
///
/// Uses `NonZeroU64` so that `Option<NodeId>` is the same size as `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(NonZeroU64);

impl NodeId {
    /// Create a `NodeId` from a raw `u64`. Returns `None` if `raw` is zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(NodeId)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Run-scoped node ID allocator.
///
/// Created fresh at the start of each conversion call and threaded through
/// the traversal by `&mut`, never shared process-wide, so concurrent or
/// repeated calls cannot observe each other's sequences. Produces strictly
/// increasing IDs from 1.
#[derive(Debug, Default)]
pub struct NodeIdAllocator {
    next: u64,
}

impl NodeIdAllocator {
    /// Create an allocator whose first ID is 1.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next node ID.
    pub fn next_id(&mut self) -> NodeId {
        self.next += 1;
        NodeId::new(self.next).expect("counter is incremented before use")
    }
}

/// One visited value in the converted graph.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Identity within this run, strictly increasing in pre-order.
    pub id: NodeId,
    /// Canonical structural path, unique within this run.
    pub path: TreePath,
    /// Distance from the root; the root is 0.
    pub depth: usize,
    /// 0-based ordinal among siblings under the same parent.
    pub sibling_index: usize,
    /// Semantic type tag.
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Display string: the final path segment, plus the rendered value for
    /// scalars.
    pub label: String,
    /// Raw scalar payload; containers carry structure only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Grid position ready for direct rendering.
    pub position: Position,
}

/// Edge identifier, derived deterministically from the endpoint pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId {
    source: NodeId,
    target: NodeId,
}

impl EdgeId {
    /// Derive the identifier for an edge between two nodes.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}-{}", self.source.get(), self.target.get())
    }
}

impl Serialize for EdgeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One containment relation between a parent node and a child node.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlowEdge {
    /// Derived from `(source, target)`.
    pub id: EdgeId,
    /// The parent node.
    pub source: NodeId,
    /// The child node.
    pub target: NodeId,
}

impl FlowEdge {
    /// Build the edge from a parent to a child.
    pub fn link(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::new(source, target),
            source,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_niche_optimization() {
        assert_eq!(
            std::mem::size_of::<Option<NodeId>>(),
            std::mem::size_of::<NodeId>()
        );
    }

    #[test]
    fn node_id_zero_is_none() {
        assert!(NodeId::new(0).is_none());
        assert_eq!(NodeId::new(42).unwrap().get(), 42);
    }

    #[test]
    fn allocator_produces_sequential_ids() {
        let mut alloc = NodeIdAllocator::new();
        assert_eq!(alloc.next_id().get(), 1);
        assert_eq!(alloc.next_id().get(), 2);
        assert_eq!(alloc.next_id().get(), 3);
    }

    #[test]
    fn separate_allocators_do_not_interfere() {
        let mut a = NodeIdAllocator::new();
        let mut b = NodeIdAllocator::new();
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id().get(), 1);
    }

    #[test]
    fn edge_id_is_derived_from_endpoints() {
        let src = NodeId::new(3).unwrap();
        let dst = NodeId::new(7).unwrap();
        let edge = FlowEdge::link(src, dst);
        assert_eq!(edge.id, EdgeId::new(src, dst));
        assert_eq!(edge.id.to_string(), "e3-7");
    }

    #[test]
    fn display_forms() {
        assert_eq!(NodeId::new(5).unwrap().to_string(), "n5");
    }

    #[test]
    fn edge_serializes_with_string_id() {
        let edge = FlowEdge::link(NodeId::new(1).unwrap(), NodeId::new(2).unwrap());
        let json = serde_json::to_value(edge).unwrap();
        assert_eq!(json["id"], "e1-2");
        assert_eq!(json["source"], 1);
        assert_eq!(json["target"], 2);
    }
}
