//! Graph assembly: the conversion traversal.
//!
//! A single iterative pre-order pass drives classification, path encoding,
//! identity/position allocation, and node/edge emission. Parent resolution
//! goes through a path→id index maintained during the same pass, never a
//! scan of previously emitted nodes, so conversion stays linear on wide and
//! deep inputs. All run state lives inside the call.

use std::collections::{HashMap, HashSet};

use crate::error::{ConfigError, ConvertError, FlowResult};
use crate::graph::FlowGraph;
use crate::layout::{DEFAULT_X_SPACING, DEFAULT_Y_SPACING, Position};
use crate::node::{FlowEdge, FlowNode, NodeId, NodeIdAllocator};
use crate::path::TreePath;
use crate::value::{TreeSource, ValueKind};

/// Default maximum structural depth before conversion aborts.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Horizontal pixels between siblings.
    pub x_spacing: f32,
    /// Vertical pixels between depth levels.
    pub y_spacing: f32,
    /// Depth guard: conversion fails once a value deeper than this is
    /// reached. The root sits at depth 0.
    pub max_depth: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            x_spacing: DEFAULT_X_SPACING,
            y_spacing: DEFAULT_Y_SPACING,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConvertConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("x", self.x_spacing), ("y", self.y_spacing)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSpacing { axis, value });
            }
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth);
        }
        Ok(())
    }
}

/// Convert a JSON value with the default configuration.
pub fn convert(value: &serde_json::Value) -> FlowResult<FlowGraph> {
    convert_with(value, &ConvertConfig::default())
}

/// Convert a JSON value with an explicit configuration.
pub fn convert_with(value: &serde_json::Value, config: &ConvertConfig) -> FlowResult<FlowGraph> {
    convert_source(value, config)
}

/// Convert any [`TreeSource`] hierarchy into a positioned graph.
///
/// Pre-order over an explicit stack — native recursion is never used, so
/// depth is bounded by `config.max_depth` rather than the call stack. Each
/// enter-frame carries the value, its path, depth, sibling ordinal, and its
/// parent's path; leave-frames maintain the set of identities on the current
/// root-to-node path, which is how shared-reference cycles are caught.
pub fn convert_source<T: TreeSource>(root: &T, config: &ConvertConfig) -> FlowResult<FlowGraph> {
    config.validate()?;

    enum Frame<'a, T> {
        Enter {
            value: &'a T,
            path: TreePath,
            depth: usize,
            sibling_index: usize,
            parent_path: Option<TreePath>,
        },
        Leave(*const T),
    }

    let mut nodes: Vec<FlowNode> = Vec::new();
    let mut edges: Vec<FlowEdge> = Vec::new();
    // Path → id, for O(1) amortized parent resolution and path-uniqueness
    // enforcement.
    let mut path_index: HashMap<TreePath, NodeId> = HashMap::new();
    // Identity of every container on the current root-to-node path.
    let mut ancestors: HashSet<*const T> = HashSet::new();
    let mut ids = NodeIdAllocator::new();

    let mut stack: Vec<Frame<'_, T>> = vec![Frame::Enter {
        value: root,
        path: TreePath::root(),
        depth: 0,
        sibling_index: 0,
        parent_path: None,
    }];

    while let Some(frame) = stack.pop() {
        let (value, path, depth, sibling_index, parent_path) = match frame {
            Frame::Enter {
                value,
                path,
                depth,
                sibling_index,
                parent_path,
            } => (value, path, depth, sibling_index, parent_path),
            Frame::Leave(ptr) => {
                ancestors.remove(&ptr);
                continue;
            }
        };

        if depth > config.max_depth {
            return Err(ConvertError::StructureTooDeep {
                path: path.to_string(),
                max_depth: config.max_depth,
            }
            .into());
        }
        if ancestors.contains(&(value as *const T)) {
            return Err(ConvertError::CyclicStructure {
                path: path.to_string(),
            }
            .into());
        }

        // Duplicate mapping keys from a TreeSource are disambiguated with a
        // `~n` suffix; `~` is escaped in key-derived segments, so suffixed
        // paths cannot collide with input-derived ones.
        let mut path = path;
        if path_index.contains_key(&path) {
            let mut n = 2;
            path = loop {
                let candidate = path.with_suffix(n);
                if !path_index.contains_key(&candidate) {
                    break candidate;
                }
                n += 1;
            };
        }

        let kind = value.kind();
        let id = ids.next_id();
        let segment = path.last_segment();
        let label = match kind {
            ValueKind::Scalar => format!("{segment}: {}", value.scalar_text()),
            ValueKind::Mapping | ValueKind::Sequence => segment,
        };

        if let Some(ref parent) = parent_path {
            // Pre-order: the parent was visited and indexed before any of
            // its children popped.
            let parent_id = path_index[parent];
            edges.push(FlowEdge::link(parent_id, id));
        }

        path_index.insert(path.clone(), id);
        nodes.push(FlowNode {
            id,
            path: path.clone(),
            depth,
            sibling_index,
            kind,
            label,
            value: value.scalar_value(),
            position: Position::at(depth, sibling_index, config.x_spacing, config.y_spacing),
        });

        match kind {
            ValueKind::Mapping => {
                ancestors.insert(value as *const T);
                stack.push(Frame::Leave(value as *const T));
                // Reversed push so children pop in iteration order.
                for (i, (key, child)) in value.entries().into_iter().enumerate().rev() {
                    stack.push(Frame::Enter {
                        value: child,
                        path: path.child_key(&key),
                        depth: depth + 1,
                        sibling_index: i,
                        parent_path: Some(path.clone()),
                    });
                }
            }
            ValueKind::Sequence => {
                ancestors.insert(value as *const T);
                stack.push(Frame::Leave(value as *const T));
                for (i, child) in value.items().into_iter().enumerate().rev() {
                    stack.push(Frame::Enter {
                        value: child,
                        path: path.child_index(i),
                        depth: depth + 1,
                        sibling_index: i,
                        parent_path: Some(path.clone()),
                    });
                }
            }
            ValueKind::Scalar => {}
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "conversion complete"
    );

    Ok(FlowGraph { nodes, edges })
}
