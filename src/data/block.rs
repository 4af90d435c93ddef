use std::path::PathBuf;
use std::sync::Arc;

use cgmath::{Vector3, Zero};

use super::ContentType;

/// Stable identity of a block across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

/// Reusable template record that supplies a model file.
#[derive(Debug, Clone, PartialEq)]
pub struct Archetype {
    pub name: String,
    pub model_path: Option<String>,
}

impl Archetype {
    pub fn new(name: impl Into<String>, model_path: Option<&str>) -> Self {
        Self {
            name: name.into(),
            model_path: model_path.map(str::to_string),
        }
    }
}

/// Kind of jump object a system uses to reach another system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    Gate,
    Hole,
}

/// A declared jump from a system to another system, by system index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpLink {
    pub target: usize,
    pub kind: JumpKind,
}

/// Position, Euler rotation (degrees) and per-axis scale of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Externally owned record describing one placed object.
///
/// Scene nodes hold shared snapshots of blocks and compare them by [`BlockId`];
/// an edit always produces a new block rather than mutating the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Correlates blocks across passes (system index in the universe).
    pub index: usize,
    pub name: String,
    pub object_type: ContentType,
    pub visibility: bool,
    pub archetype: Option<Arc<Archetype>>,
    pub placement: Placement,
    /// File backing a system block, opened from the universe view.
    pub path: Option<PathBuf>,
    pub jumps: Vec<JumpLink>,
    pub modified: bool,
}

impl Block {
    pub fn new(id: u64, index: usize, name: impl Into<String>, object_type: ContentType) -> Self {
        Self {
            id: BlockId(id),
            index,
            name: name.into(),
            object_type,
            visibility: true,
            archetype: None,
            placement: Placement::default(),
            path: None,
            jumps: Vec::new(),
            modified: false,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.placement.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.placement.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.placement.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(Arc::new(archetype));
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_jump(mut self, target: usize, kind: JumpKind) -> Self {
        self.jumps.push(JumpLink { target, kind });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visibility = false;
        self
    }

    /// Model file of the block's archetype, if any.
    pub fn model_path(&self) -> Option<&str> {
        self.archetype.as_ref()?.model_path.as_deref()
    }

    pub fn is_real_model(&self) -> bool {
        self.object_type.is_real_model()
    }

    /// Clone of this block with new placement values, flagged as modified.
    pub fn modified_with(&self, placement: Placement) -> Block {
        let mut block = self.clone();
        block.placement = placement;
        block.modified = true;
        block
    }
}
