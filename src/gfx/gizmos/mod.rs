//! # Gizmo System
//!
//! Visual aids drawn on top of the scene content. The manipulator handles
//! are the only interactive gizmo: the picker treats them as grab targets
//! ahead of any content.
//!
//! ## Key Components
//!
//! - [`ManipulatorLine`] - One axis handle following the selected node
//! - [`handle_count`] - Which handles a node gets in a view and mode

pub mod manipulator;

// Re-export main types
pub use manipulator::{handle_count, Axis, ManipulatorLine, ACTIVE_HANDLE_COLOR};
