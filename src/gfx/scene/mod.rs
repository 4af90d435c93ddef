//! # Scene Management Module
//!
//! The scene is a flat, ordered child list. Content nodes wrap blocks,
//! connections join System nodes in the universe map, and overlays (lighting,
//! selection box, tracked line, manipulator handles) sit ahead of everything.
//!
//! ## Key Components
//!
//! - [`Scene`] - Ordered child list with the two-layer split
//! - [`ContentNode`] - Visual representation of one block
//! - [`Connection`] - Jump connection between two systems
//! - [`Overlay`] - Decorations kept in sync by replace-in-place

pub mod connection;
pub mod content;
pub mod overlay;
pub mod scene;

/// Identity of a node in the scene's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

// Re-export main types
pub use connection::{Connection, ConnectionType};
pub use content::ContentNode;
pub use overlay::{Lighting, Overlay, OverlaySlot, SelectionBox, TrackedLine};
pub use scene::{Scene, SceneChild, SceneNode};
