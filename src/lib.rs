//! # treeflow
//!
//! Convert already-parsed hierarchical data values (nested mappings, ordered
//! sequences, scalar leaves) into positioned node-link graphs ready for
//! direct rendering: one node per visited value, one edge per containment
//! relation, each node carrying a stable identity, a display label, a
//! collision-resistant structural path, a type tag, and a 2D grid position.
//!
//! ## Architecture
//!
//! - **Classification** (`value`): every value is a mapping, a sequence, or
//!   a scalar; the `TreeSource` trait is the seam to the input representation
//! - **Paths** (`path`): escaped structural paths from the `$` root sentinel
//! - **Identity & layout** (`node`, `layout`): run-scoped id allocation,
//!   depth/sibling grid positions
//! - **Assembly** (`convert`): one iterative pre-order pass with an indexed
//!   parent lookup and cycle/depth guards
//!
//! The engine is pure and synchronous: no I/O, no shared state across calls,
//! and a failed conversion never returns a partial graph.
//!
//! ## Library usage
//!
//! ```
//! use treeflow::convert::convert;
//!
//! let doc = serde_json::json!({"a": 1, "b": [2, 3]});
//! let graph = convert(&doc).unwrap();
//! assert_eq!(graph.node_count(), 5);
//! assert_eq!(graph.edge_count(), 4);
//! assert_eq!(graph.node_at_path("$/a").unwrap().label, "a: 1");
//! ```

pub mod convert;
pub mod error;
pub mod graph;
pub mod layout;
pub mod node;
pub mod path;
pub mod value;
