//! # Error Types
//!
//! Failures the designer core can report. Most interactive operations are
//! infallible in-memory mutations; the errors here cover geometry loading and
//! scene-graph consistency problems that callers may want to surface.

use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::scene::NodeId;

/// Errors returned by the designer core.
#[derive(Error, Debug)]
pub enum DesignerError {
    /// The model file does not exist below the data path.
    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),

    /// No geometry loader understands the file extension.
    #[error("unsupported model format: {0}")]
    UnsupportedModelFormat(PathBuf),

    /// The loader found the file but could not turn it into geometry.
    #[error("failed to load model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    /// A node id no longer refers to anything in the scene.
    #[error("node {0:?} is not part of the scene")]
    UnknownNode(NodeId),

    /// A universe connection could not find both of its system nodes.
    #[error("connection {from} -> {to} resolved {found} of 2 endpoints")]
    UnresolvedConnection { from: usize, to: usize, found: usize },

    /// The background universe analysis was dropped before finishing.
    #[error("universe analysis was cancelled")]
    AnalysisCancelled,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, DesignerError>;
