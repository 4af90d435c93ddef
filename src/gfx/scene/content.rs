use std::sync::Arc;

use cgmath::{Matrix4, Vector3, Zero};

use crate::data::{Block, ContentKind, Placement, Shape, ViewerType};
use crate::gfx::camera::TransformUniform;
use crate::gfx::geometry::{placeholder_model, GeometryHandle};
use crate::gfx::picking::Aabb;
use crate::gfx::scene::NodeId;
use crate::gfx::transform;

/// In-scene representation of one block.
///
/// Position, rotation and scale are kept as separate vectors; the matrix is
/// rebuilt by every setter so it is never stale when read.
#[derive(Debug, Clone)]
pub struct ContentNode {
    kind: ContentKind,
    block: Arc<Block>,
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: Vector3<f32>,
    transform: Matrix4<f32>,
    model: Option<GeometryHandle>,
    /// Universe connections ending at this node; System nodes only.
    connections: Vec<NodeId>,
}

impl ContentNode {
    /// Node for a block, `None` when the block's type has no content variant.
    pub fn new(block: Arc<Block>, viewer: ViewerType) -> Option<Self> {
        let kind = block.object_type.content_kind()?;
        let mut node = Self {
            kind,
            block,
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            transform: Matrix4::from_scale(1.0),
            model: None,
            connections: Vec::new(),
        };
        node.set_placement(Self::placement_for(&node.block, viewer));
        Some(node)
    }

    fn placement_for(block: &Block, viewer: ViewerType) -> Placement {
        if viewer.is_preview() {
            Placement::default()
        } else {
            block.placement
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn block(&self) -> &Arc<Block> {
        &self.block
    }

    /// Swap the referenced block without touching the transform.
    pub fn set_block(&mut self, block: Arc<Block>) {
        self.block = block;
    }

    /// Re-derive everything from an updated block.
    ///
    /// Returns true when the block's model may differ and geometry must be
    /// resolved again.
    pub fn apply_block(&mut self, block: Arc<Block>, viewer: ViewerType) -> bool {
        let model_changed = self.block.object_type != block.object_type
            || self.block.model_path() != block.model_path();

        self.set_placement(Self::placement_for(&block, viewer));
        self.block = block;
        if model_changed {
            self.model = None;
        }
        model_changed
    }

    /// Drop any transient transform and go back to the block's values.
    pub fn revert(&mut self, viewer: ViewerType) {
        self.set_placement(Self::placement_for(&self.block, viewer));
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.update_transform();
    }

    pub fn set_rotation(&mut self, rotation: Vector3<f32>) {
        self.rotation = rotation;
        self.update_transform();
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.update_transform();
    }

    pub fn placement(&self) -> Placement {
        Placement {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.position = placement.position;
        self.rotation = placement.rotation;
        self.scale = placement.scale;
        self.update_transform();
    }

    fn update_transform(&mut self) {
        self.transform = transform::compose(self.position, self.rotation, self.scale);
    }

    pub fn transform(&self) -> Matrix4<f32> {
        self.transform
    }

    pub fn uniform(&self) -> TransformUniform {
        TransformUniform::from(self.transform)
    }

    pub fn is_emissive(&self) -> bool {
        self.block.object_type.is_emissive()
    }

    pub fn shape(&self) -> Shape {
        self.block.object_type.shape()
    }

    /// Loaded model, if one was resolved for this node.
    pub fn model(&self) -> Option<&GeometryHandle> {
        self.model.as_ref()
    }

    pub fn set_model(&mut self, model: Option<GeometryHandle>) {
        self.model = model;
    }

    /// Geometry used for drawing and hit testing.
    pub fn geometry(&self) -> GeometryHandle {
        match &self.model {
            Some(model) => model.clone(),
            None => placeholder_model(self.shape()),
        }
    }

    /// Local bounds of the placeholder shape.
    pub fn shape_bounds(&self) -> Aabb {
        match self.shape() {
            Shape::Box => Aabb::unit(),
            Shape::Sphere => Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0)),
            Shape::Cylinder => Aabb::new(Vector3::new(-1.0, -0.5, -1.0), Vector3::new(1.0, 0.5, 1.0)),
        }
    }

    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }

    pub fn add_connection(&mut self, connection: NodeId) {
        if self.kind == ContentKind::System && !self.connections.contains(&connection) {
            self.connections.push(connection);
        }
    }

    pub fn remove_connection(&mut self, connection: NodeId) {
        self.connections.retain(|id| *id != connection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ContentType;
    use cgmath::InnerSpace;

    fn assert_matrix_eq(a: Matrix4<f32>, b: Matrix4<f32>) {
        for col in 0..4 {
            for row in 0..4 {
                assert!((a[col][row] - b[col][row]).abs() < 1e-4, "{:?} != {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_no_node_for_invalid_type() {
        let block = Arc::new(Block::new(1, 0, "nothing", ContentType::None));
        assert!(ContentNode::new(block, ViewerType::System).is_none());
    }

    #[test]
    fn test_transform_never_stale() {
        let block = Arc::new(Block::new(1, 0, "zone", ContentType::ZoneBox));
        let mut node = ContentNode::new(block, ViewerType::System).unwrap();

        node.set_position(Vector3::new(1.0, 2.0, 3.0));
        node.set_rotation(Vector3::new(10.0, 0.0, 0.0));
        node.set_scale(Vector3::new(2.0, 2.0, 2.0));
        node.set_rotation(Vector3::new(0.0, 45.0, 30.0));
        node.set_position(Vector3::new(-4.0, 0.0, 9.0));

        let expected = transform::compose(
            Vector3::new(-4.0, 0.0, 9.0),
            Vector3::new(0.0, 45.0, 30.0),
            Vector3::new(2.0, 2.0, 2.0),
        );
        assert_matrix_eq(node.transform(), expected);
    }

    #[test]
    fn test_preview_views_zero_placement() {
        let block = Arc::new(
            Block::new(1, 0, "ship", ContentType::Ship)
                .with_position(100.0, 0.0, 0.0)
                .with_rotation(0.0, 90.0, 0.0),
        );
        let node = ContentNode::new(block, ViewerType::ModelPreview).unwrap();
        assert_eq!(node.position().magnitude(), 0.0);
        assert_eq!(node.rotation().magnitude(), 0.0);
    }

    #[test]
    fn test_apply_block_reports_model_change() {
        let block = Arc::new(Block::new(1, 0, "zone", ContentType::ZoneSphere));
        let mut node = ContentNode::new(block.clone(), ViewerType::System).unwrap();

        let moved = Arc::new(block.as_ref().clone().with_position(5.0, 0.0, 0.0));
        assert!(!node.apply_block(moved, ViewerType::System));
        assert_eq!(node.position(), Vector3::new(5.0, 0.0, 0.0));

        let reshaped = Arc::new(Block::new(1, 0, "zone", ContentType::ZoneBox));
        assert!(node.apply_block(reshaped, ViewerType::System));
        assert_eq!(node.shape(), Shape::Box);
    }

    #[test]
    fn test_only_systems_hold_connections() {
        let system = Arc::new(Block::new(1, 0, "Li01", ContentType::System));
        let mut node = ContentNode::new(system, ViewerType::Universe).unwrap();
        node.add_connection(NodeId(9));
        node.add_connection(NodeId(9));
        assert_eq!(node.connections(), &[NodeId(9)]);
        node.remove_connection(NodeId(9));
        assert!(node.connections().is_empty());

        let planet = Arc::new(Block::new(2, 0, "planet", ContentType::Planet));
        let mut node = ContentNode::new(planet, ViewerType::System).unwrap();
        node.add_connection(NodeId(9));
        assert!(node.connections().is_empty());
    }
}
