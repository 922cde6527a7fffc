//! Grid layout: sibling columns and depth rows.

use serde::{Deserialize, Serialize};

/// Default horizontal distance between siblings, in pixels.
///
/// Wide enough that typical labels do not overlap.
pub const DEFAULT_X_SPACING: f32 = 220.0;

/// Default vertical distance between depth levels, in pixels.
pub const DEFAULT_Y_SPACING: f32 = 120.0;

/// 2D canvas position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Grid position for a node.
    ///
    /// A pure function of depth, sibling ordinal, and the two spacing
    /// constants — independent of global node count, so structurally
    /// identical inputs lay out identically regardless of what else a
    /// document contains.
    pub fn at(depth: usize, sibling_index: usize, x_spacing: f32, y_spacing: f32) -> Self {
        Self {
            x: sibling_index as f32 * x_spacing,
            y: depth as f32 * y_spacing,
        }
    }
}
