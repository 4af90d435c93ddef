//! # Data Model
//!
//! Blocks are the externally owned records the editor displays. The scene
//! never mutates a block in place: manipulation produces a modified clone
//! that is handed back to the data layer through the presenter's observer.

pub mod block;
pub mod content_type;

pub use block::{Archetype, Block, BlockId, JumpKind, JumpLink, Placement};
pub use content_type::{ContentKind, ContentType, Shape};

/// What the viewport is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerType {
    /// A single star system with all of its objects and zones.
    System,
    /// The universe map of systems and jump connections.
    Universe,
    /// Preview of a single solar archetype.
    SolarArchetype,
    /// Preview of a single model.
    ModelPreview,
    Other,
}

impl ViewerType {
    /// Manipulation handles and keyboard nudges exist only in these views.
    pub fn supports_manipulation(self) -> bool {
        matches!(self, ViewerType::System | ViewerType::Universe)
    }

    /// Preview views show one model centered at the origin.
    pub fn is_preview(self) -> bool {
        matches!(self, ViewerType::SolarArchetype | ViewerType::ModelPreview)
    }
}
