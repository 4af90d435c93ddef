//! # Designer Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use std::sync::Arc;
//! use sysdesigner::prelude::*;
//!
//! let mut presenter = Presenter::new(ViewerType::Universe, DesignerSettings::default());
//! let systems = vec![
//!     Arc::new(Block::new(1, 0, "Li01", ContentType::System).with_jump(1, JumpKind::Gate)),
//!     Arc::new(Block::new(2, 1, "Li02", ContentType::System).with_position(100.0, 0.0, 0.0)),
//! ];
//! presenter.add_blocks(systems.clone());
//! presenter.display_universe(&systems);
//! let rejected = presenter.wait_universe().unwrap_or_default();
//! assert!(rejected.is_empty());
//! ```

// Re-export data types
pub use crate::data::{Archetype, Block, BlockId, ContentKind, ContentType, JumpKind, Placement, ViewerType};
pub use crate::error::{DesignerError, Result};
pub use crate::settings::DesignerSettings;

// Re-export graphics and scene types
pub use crate::gfx::camera::{CameraDirection, FlyCamera};
pub use crate::gfx::geometry::{GeometryData, Model};
pub use crate::gfx::picking::{Aabb, PickOutcome};
pub use crate::gfx::resources::{GeometryLoader, ModelCache, ObjLoader};
pub use crate::gfx::scene::{NodeId, Scene};

// Re-export interaction types
pub use crate::manipulation::{Axis, ManipulationMode, ManipulationState, PointerCapture};
pub use crate::presenter::{KeyInput, PointerInput, Presenter, PresenterObserver};

// Re-export math types
pub use cgmath::Vector3;
