use std::collections::HashMap;

use cgmath::{SquareMatrix, Vector3};
use log::debug;

use crate::data::{BlockId, Shape};
use crate::gfx::geometry::placeholder_model;
use crate::gfx::picking::{HitTarget, Ray, RayHit};
use crate::gfx::scene::{Connection, ContentNode, NodeId, Overlay, OverlaySlot};

/// Anything that can sit in the scene's child list.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Overlay(Overlay),
    Content(ContentNode),
    Connection(Connection),
}

#[derive(Debug, Clone)]
pub struct SceneChild {
    pub id: NodeId,
    pub node: SceneNode,
}

/// Ordered child list; order is draw order.
///
/// Everything before `second_layer` is drawn first: the overlays and all
/// emissive content. Non-emissive content and connections follow.
#[derive(Debug, Clone)]
pub struct Scene {
    children: Vec<SceneChild>,
    second_layer: usize,
    overlays: HashMap<OverlaySlot, NodeId>,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            second_layer: 0,
            overlays: HashMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn children(&self) -> &[SceneChild] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of the first node of the second layer.
    pub fn second_layer(&self) -> usize {
        self.second_layer
    }

    /// Number of overlay nodes at the front of the list.
    pub fn content_start(&self) -> usize {
        self.overlays.len()
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|child| child.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn add_content(&mut self, node: ContentNode) -> NodeId {
        let id = self.allocate_id();
        let emissive = node.is_emissive();
        let child = SceneChild {
            id,
            node: SceneNode::Content(node),
        };

        if emissive {
            self.children.insert(self.second_layer, child);
            self.second_layer += 1;
        } else {
            self.children.push(child);
        }
        id
    }

    pub fn add_connection(&mut self, connection: Connection) -> NodeId {
        let id = self.allocate_id();
        self.children.push(SceneChild {
            id,
            node: SceneNode::Connection(connection),
        });
        id
    }

    /// Remove a node, keeping the layer split in place.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let index = self.index_of(id)?;
        let child = self.children.remove(index);
        if index < self.second_layer {
            self.second_layer -= 1;
        }
        if let SceneNode::Overlay(overlay) = &child.node {
            self.overlays.remove(&overlay.slot());
        }
        debug!("Removed scene node {:?}", id);
        Some(child.node)
    }

    /// Add, replace in place, or remove the overlay in a slot.
    pub fn set_overlay(&mut self, slot: OverlaySlot, overlay: Option<Overlay>) {
        match (self.overlays.get(&slot).copied(), overlay) {
            (Some(id), Some(overlay)) => {
                if let Some(child) = self.children.iter_mut().find(|child| child.id == id) {
                    child.node = SceneNode::Overlay(overlay);
                }
            }
            (Some(id), None) => {
                self.remove(id);
            }
            (None, Some(overlay)) => {
                let id = self.allocate_id();
                self.children.insert(
                    0,
                    SceneChild {
                        id,
                        node: SceneNode::Overlay(overlay),
                    },
                );
                self.second_layer += 1;
                self.overlays.insert(slot, id);
            }
            (None, None) => {}
        }
    }

    pub fn overlay(&self, slot: OverlaySlot) -> Option<&Overlay> {
        let id = *self.overlays.get(&slot)?;
        match &self.children[self.index_of(id)?].node {
            SceneNode::Overlay(overlay) => Some(overlay),
            _ => None,
        }
    }

    pub fn overlay_mut(&mut self, slot: OverlaySlot) -> Option<&mut Overlay> {
        let id = *self.overlays.get(&slot)?;
        let index = self.index_of(id)?;
        match &mut self.children[index].node {
            SceneNode::Overlay(overlay) => Some(overlay),
            _ => None,
        }
    }

    pub fn content(&self, id: NodeId) -> Option<&ContentNode> {
        match &self.children[self.index_of(id)?].node {
            SceneNode::Content(node) => Some(node),
            _ => None,
        }
    }

    pub fn content_mut(&mut self, id: NodeId) -> Option<&mut ContentNode> {
        let index = self.index_of(id)?;
        match &mut self.children[index].node {
            SceneNode::Content(node) => Some(node),
            _ => None,
        }
    }

    pub fn connection(&self, id: NodeId) -> Option<&Connection> {
        match &self.children[self.index_of(id)?].node {
            SceneNode::Connection(connection) => Some(connection),
            _ => None,
        }
    }

    pub fn connection_mut(&mut self, id: NodeId) -> Option<&mut Connection> {
        let index = self.index_of(id)?;
        match &mut self.children[index].node {
            SceneNode::Connection(connection) => Some(connection),
            _ => None,
        }
    }

    pub fn contents(&self) -> impl Iterator<Item = (NodeId, &ContentNode)> {
        self.children.iter().filter_map(|child| match &child.node {
            SceneNode::Content(node) => Some((child.id, node)),
            _ => None,
        })
    }

    pub fn connections(&self) -> impl Iterator<Item = (NodeId, &Connection)> {
        self.children.iter().filter_map(|child| match &child.node {
            SceneNode::Connection(connection) => Some((child.id, connection)),
            _ => None,
        })
    }

    pub fn find_by_block(&self, block: BlockId) -> Option<NodeId> {
        self.contents()
            .find(|(_, node)| node.block().id == block)
            .map(|(id, _)| id)
    }

    /// Drop every node. The lighting overlay survives when asked to.
    pub fn clear(&mut self, keep_lighting: bool) {
        let lighting = if keep_lighting {
            self.overlay(OverlaySlot::Lighting).cloned()
        } else {
            None
        };

        self.children.clear();
        self.overlays.clear();
        self.second_layer = 0;

        if lighting.is_some() {
            self.set_overlay(OverlaySlot::Lighting, lighting);
        }
    }

    /// Every intersection of `ray` with handles, content and connections.
    ///
    /// Handle length follows the camera distance so that handles keep a
    /// constant size on screen.
    pub fn intersections(&self, ray: &Ray, camera_position: Vector3<f32>, handle_fraction: f32) -> Vec<RayHit> {
        let mut hits = Vec::new();

        for child in &self.children {
            match &child.node {
                SceneNode::Overlay(Overlay::Handle(line)) => {
                    let length = line.world_length(camera_position, handle_fraction);
                    if let Some(point) = line.intersect_ray(ray, length) {
                        hits.push(RayHit {
                            target: HitTarget::Handle(line.axis),
                            local_point: point,
                            model_transform: cgmath::Matrix4::identity(),
                            node_transform: cgmath::Matrix4::identity(),
                        });
                    }
                }
                SceneNode::Overlay(_) => {}
                SceneNode::Content(node) => {
                    let Some(inverse) = node.transform().invert() else {
                        continue;
                    };
                    let geometry = node.geometry();
                    if let Some(hit) = geometry.intersect_ray(&ray.transformed(&inverse)) {
                        hits.push(RayHit {
                            target: HitTarget::Content(child.id),
                            local_point: hit.point,
                            model_transform: geometry.transform,
                            node_transform: node.transform(),
                        });
                    }
                }
                SceneNode::Connection(connection) => {
                    let Some(inverse) = connection.transform().invert() else {
                        continue;
                    };
                    let geometry = placeholder_model(Shape::Box);
                    if let Some(hit) = geometry.intersect_ray(&ray.transformed(&inverse)) {
                        hits.push(RayHit {
                            target: HitTarget::Connection(child.id),
                            local_point: hit.point,
                            model_transform: geometry.transform,
                            node_transform: connection.transform(),
                        });
                    }
                }
            }
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Block, ContentType, ViewerType};
    use crate::gfx::gizmos::{Axis, ManipulatorLine};
    use crate::gfx::scene::{ConnectionType, Lighting};
    use std::sync::Arc;

    fn content(id: u64, object_type: ContentType) -> ContentNode {
        let block = Arc::new(Block::new(id, 0, format!("block{}", id), object_type));
        ContentNode::new(block, ViewerType::System).unwrap()
    }

    #[test]
    fn test_emissive_content_goes_first() {
        let mut scene = Scene::new();
        let planet = scene.add_content(content(1, ContentType::Planet));
        let zone = scene.add_content(content(2, ContentType::ZoneSphere));
        let sun = scene.add_content(content(3, ContentType::Sun));

        let order: Vec<NodeId> = scene.children().iter().map(|child| child.id).collect();
        assert_eq!(order, vec![zone, sun, planet]);
        assert_eq!(scene.second_layer(), 2);

        scene.remove(zone);
        assert_eq!(scene.second_layer(), 1);
        scene.remove(planet);
        assert_eq!(scene.second_layer(), 1);
    }

    #[test]
    fn test_overlays_replace_in_place() {
        let mut scene = Scene::new();
        scene.add_content(content(1, ContentType::ZoneBox));
        scene.add_content(content(2, ContentType::Planet));

        let line = ManipulatorLine::new(Axis::X, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        scene.set_overlay(OverlaySlot::Handle(Axis::X), Some(Overlay::Handle(line)));
        scene.set_overlay(OverlaySlot::Lighting, Some(Overlay::Lighting(Lighting::default())));
        assert_eq!(scene.content_start(), 2);
        assert_eq!(scene.second_layer(), 3);

        let handle_id = scene.children()[1].id;
        let moved = ManipulatorLine::new(Axis::X, Vector3::new(5.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        scene.set_overlay(OverlaySlot::Handle(Axis::X), Some(Overlay::Handle(moved)));
        assert_eq!(scene.children()[1].id, handle_id);
        assert_eq!(scene.len(), 4);

        scene.set_overlay(OverlaySlot::Handle(Axis::X), None);
        assert_eq!(scene.content_start(), 1);
        assert_eq!(scene.second_layer(), 2);
        assert!(scene.overlay(OverlaySlot::Handle(Axis::X)).is_none());
    }

    #[test]
    fn test_clear_keeps_lighting() {
        let mut scene = Scene::new();
        scene.set_overlay(OverlaySlot::Lighting, Some(Overlay::Lighting(Lighting::default())));
        scene.add_content(content(1, ContentType::Sun));
        scene.add_connection(Connection::new(NodeId(1), NodeId(2), ConnectionType::None, ConnectionType::None));

        scene.clear(true);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.second_layer(), 1);
        assert!(scene.overlay(OverlaySlot::Lighting).is_some());

        scene.clear(false);
        assert!(scene.is_empty());
        assert_eq!(scene.second_layer(), 0);
    }

    #[test]
    fn test_find_by_block() {
        let mut scene = Scene::new();
        let id = scene.add_content(content(42, ContentType::Station));
        assert_eq!(scene.find_by_block(BlockId(42)), Some(id));
        assert_eq!(scene.find_by_block(BlockId(7)), None);
    }

    #[test]
    fn test_intersections_report_content_and_handles() {
        let mut scene = Scene::new();
        let mut node = content(1, ContentType::Station);
        node.set_position(Vector3::new(0.0, 0.0, -10.0));
        node.set_scale(Vector3::new(4.0, 4.0, 4.0));
        let id = scene.add_content(node);

        let ray = Ray::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let hits = scene.intersections(&ray, ray.origin, 0.15);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, HitTarget::Content(id));
        // front face of the scaled box
        assert!((hits[0].world_point().z + 8.0).abs() < 1e-4);
    }
}
