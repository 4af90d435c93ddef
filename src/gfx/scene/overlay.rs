use cgmath::{Matrix4, Vector3};

use crate::gfx::gizmos::{Axis, ManipulatorLine};
use crate::gfx::picking::Aabb;

pub const SELECTION_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Selection box colour while the selection is also the tracked node.
pub const TRACKED_COLOR: [f32; 4] = [1.0, 0.6, 0.0, 1.0];
pub const TRACKED_LINE_COLOR: [f32; 4] = [1.0, 0.6, 0.0, 1.0];
pub const AMBIENT_LIGHT: [f32; 4] = [0.3, 0.3, 0.3, 1.0];

/// Fixed position of an overlay in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlaySlot {
    Lighting,
    SelectionBox,
    TrackedLine,
    Handle(Axis),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: [f32; 4],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AMBIENT_LIGHT,
        }
    }
}

/// Wireframe bounds drawn around the selected node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBox {
    /// Bounds in the node's local space.
    pub bounds: Aabb,
    pub transform: Matrix4<f32>,
    pub color: [f32; 4],
}

/// Line from the selected node to the tracked node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedLine {
    pub from: Vector3<f32>,
    pub to: Vector3<f32>,
    pub color: [f32; 4],
}

/// Scene decoration drawn ahead of all content.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Lighting(Lighting),
    SelectionBox(SelectionBox),
    TrackedLine(TrackedLine),
    Handle(ManipulatorLine),
}

impl Overlay {
    pub fn slot(&self) -> OverlaySlot {
        match self {
            Overlay::Lighting(_) => OverlaySlot::Lighting,
            Overlay::SelectionBox(_) => OverlaySlot::SelectionBox,
            Overlay::TrackedLine(_) => OverlaySlot::TrackedLine,
            Overlay::Handle(line) => OverlaySlot::Handle(line.axis),
        }
    }
}
