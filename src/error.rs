//! Rich diagnostic error types for the treeflow engine.
//!
//! Each failure carries a miette `#[diagnostic]` derive with an error code
//! and help text, so callers know exactly which input tripped the guard and
//! how to proceed.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the treeflow engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text) through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum FlowError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid {axis} spacing: {value}")]
    #[diagnostic(
        code(treeflow::config::invalid_spacing),
        help(
            "Spacing constants are pixel distances and must be finite and \
             non-negative. Check the x_spacing/y_spacing fields of ConvertConfig."
        )
    )]
    InvalidSpacing { axis: &'static str, value: f32 },

    #[error("max_depth must be at least 1")]
    #[diagnostic(
        code(treeflow::config::invalid_max_depth),
        help(
            "A depth limit of 0 would forbid any nesting below the root. \
             Use a positive limit."
        )
    )]
    InvalidMaxDepth,
}

// ---------------------------------------------------------------------------
// Conversion errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("cyclic structure: value at {path} is already on the path from the root")]
    #[diagnostic(
        code(treeflow::convert::cyclic),
        help(
            "The input contains a shared-reference cycle: a container is \
             reachable from itself through containment. The engine only \
             accepts tree-shaped values — break the cycle before converting."
        )
    )]
    CyclicStructure { path: String },

    #[error("structure exceeds the maximum depth of {max_depth} at {path}")]
    #[diagnostic(
        code(treeflow::convert::too_deep),
        help(
            "The depth guard tripped. Increase max_depth in ConvertConfig if \
             the input is genuinely this deep, or check for runaway nesting."
        )
    )]
    StructureTooDeep { path: String, max_depth: usize },
}

/// Convenience alias for functions returning treeflow results.
pub type FlowResult<T> = std::result::Result<T, FlowError>;
