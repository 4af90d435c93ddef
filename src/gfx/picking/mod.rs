//! # Object Picking System
//!
//! Resolves a screen point to the content node the user meant to click, or to
//! a manipulator handle grab.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: the camera turns the screen point into a world ray
//! 2. **Enumerate hits**: the scene reports every intersection along the ray,
//!    with the hit point in mesh space and the transforms that place it
//! 3. **Handles first**: a manipulator handle hit wins outright when allowed
//! 4. **Priority, then distance**: otherwise the candidate with the highest
//!    selection priority wins; ties go to the nearest (or farthest) hit
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sysdesigner::gfx::picking::{ObjectPicker, PickOutcome};
//! # fn demo(scene: &sysdesigner::gfx::scene::Scene, camera: &sysdesigner::gfx::camera::FlyCamera) {
//! let picker = ObjectPicker::new(0.15);
//! if let PickOutcome::Content { node, point } = picker.pick((400.0, 300.0), camera, scene, false, true) {
//!     println!("picked {:?} at {:?}", node, point);
//! }
//! # }
//! ```

use cgmath::{InnerSpace, Matrix4, MetricSpace, Vector3, Vector4, Zero};

use crate::gfx::camera::FlyCamera;
use crate::gfx::gizmos::Axis;
use crate::gfx::scene::{NodeId, Scene};
use crate::gfx::transform;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Same ray expressed in another space.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Ray {
        Ray::new(
            transform::transform_point(matrix, self.origin),
            transform::transform_vector(matrix, self.direction),
        )
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Unit cube from -0.5 to 0.5.
    pub fn unit() -> Self {
        Self::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5))
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed: Vec<[f32; 3]> = corners
            .iter()
            .map(|corner| {
                let p = matrix * Vector4::new(corner.x, corner.y, corner.z, 1.0);
                [p.x / p.w, p.y / p.w, p.z / p.w]
            })
            .collect();

        Self::from_vertices(&transformed)
    }
}

/// What a ray intersection landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A content node backed by a block.
    Content(NodeId),
    /// A universe connection line; never selectable.
    Connection(NodeId),
    /// One of the manipulator handles.
    Handle(Axis),
}

/// One intersection reported by the scene.
///
/// `local_point` is in mesh space; the model-hierarchy transform and then
/// the node's scene transform carry it to world space.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub target: HitTarget,
    pub local_point: Vector3<f32>,
    pub model_transform: Matrix4<f32>,
    pub node_transform: Matrix4<f32>,
}

impl RayHit {
    pub fn world_point(&self) -> Vector3<f32> {
        let model = transform::transform_point(&self.model_transform, self.local_point);
        transform::transform_point(&self.node_transform, model)
    }
}

/// A selectable node hit, ready for priority resolution.
#[derive(Debug, Clone, Copy)]
pub struct HitCandidate {
    pub node: NodeId,
    pub priority: i32,
    pub point: Vector3<f32>,
}

/// Result of a pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    Nothing,
    /// A manipulator handle was hit; the caller starts a session on `Axis`.
    Handle(Axis),
    Content { node: NodeId, point: Vector3<f32> },
}

/// Highest priority wins; equal priorities compare squared camera distance.
pub fn select_best<I>(candidates: I, camera_position: Vector3<f32>, prefer_farthest: bool) -> Option<HitCandidate>
where
    I: IntoIterator<Item = HitCandidate>,
{
    let mut best: Option<(HitCandidate, f32)> = None;

    for candidate in candidates {
        let distance = camera_position.distance2(candidate.point);
        let replace = match &best {
            None => true,
            Some((current, current_distance)) => {
                candidate.priority > current.priority
                    || (candidate.priority == current.priority
                        && if prefer_farthest {
                            distance > *current_distance
                        } else {
                            distance < *current_distance
                        })
            }
        };

        if replace {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Object picker for 3D mouse selection
#[derive(Debug, Clone)]
pub struct ObjectPicker {
    /// Handle length as a fraction of the camera distance.
    handle_fraction: f32,
}

impl ObjectPicker {
    pub fn new(handle_fraction: f32) -> Self {
        Self { handle_fraction }
    }

    /// Pick from the scene at a screen position.
    ///
    /// `allow_handles` enables manipulator grabs; `prefer_farthest` flips the
    /// distance tie-break used for additive multi-select.
    pub fn pick(
        &self,
        screen_pos: (f32, f32),
        camera: &FlyCamera,
        scene: &Scene,
        prefer_farthest: bool,
        allow_handles: bool,
    ) -> PickOutcome {
        let ray = camera.screen_to_ray(screen_pos);
        let hits = scene.intersections(&ray, camera.position, self.handle_fraction);
        self.resolve(&hits, camera.position, scene, prefer_farthest, allow_handles)
    }

    /// Resolve enumerated hits into a single outcome.
    pub fn resolve(
        &self,
        hits: &[RayHit],
        camera_position: Vector3<f32>,
        scene: &Scene,
        prefer_farthest: bool,
        allow_handles: bool,
    ) -> PickOutcome {
        if allow_handles {
            let handle = hits
                .iter()
                .filter_map(|hit| match hit.target {
                    HitTarget::Handle(axis) => Some((axis, camera_position.distance2(hit.world_point()))),
                    _ => None,
                })
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((axis, _)) = handle {
                return PickOutcome::Handle(axis);
            }
        }

        let candidates = hits.iter().filter_map(|hit| {
            let HitTarget::Content(node) = hit.target else {
                return None;
            };
            // decoration geometry has no block to select
            let content = scene.content(node)?;
            Some(HitCandidate {
                node,
                priority: content.block().object_type.selection_priority(),
                point: hit.world_point(),
            })
        });

        match select_best(candidates, camera_position, prefer_farthest) {
            Some(best) => PickOutcome::Content {
                node: best.node,
                point: best.point,
            },
            None => PickOutcome::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u64, priority: i32, z: f32) -> HitCandidate {
        HitCandidate {
            node: NodeId(id),
            priority,
            point: Vector3::new(0.0, 0.0, z),
        }
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_aabb_transform_and_union() {
        let moved = Aabb::unit().transform(&Matrix4::from_translation(Vector3::new(10.0, 0.0, 0.0)));
        assert_eq!(moved.center(), Vector3::new(10.0, 0.0, 0.0));

        let both = Aabb::unit().union(&moved);
        assert_eq!(both.min.x, -0.5);
        assert_eq!(both.max.x, 10.5);
    }

    #[test]
    fn test_higher_priority_wins_regardless_of_distance() {
        let camera = Vector3::zero();
        let near_zone = candidate(1, 1, 5.0);
        let far_station = candidate(2, 2, 500.0);

        for prefer_farthest in [false, true] {
            let best = select_best([near_zone, far_station], camera, prefer_farthest).unwrap();
            assert_eq!(best.node, NodeId(2));
            let best = select_best([far_station, near_zone], camera, prefer_farthest).unwrap();
            assert_eq!(best.node, NodeId(2));
        }
    }

    #[test]
    fn test_tie_break_by_distance() {
        let camera = Vector3::zero();
        let near = candidate(10, 2, 10.0);
        let far = candidate(20, 2, 20.0);

        assert_eq!(select_best([far, near], camera, false).unwrap().node, NodeId(10));
        assert_eq!(select_best([near, far], camera, true).unwrap().node, NodeId(20));
    }

    #[test]
    fn test_nothing_to_select() {
        assert!(select_best(Vec::new(), Vector3::zero(), false).is_none());
    }

    #[test]
    fn test_world_point_applies_model_then_node_transform() {
        let hit = RayHit {
            target: HitTarget::Content(NodeId(1)),
            local_point: Vector3::new(1.0, 0.0, 0.0),
            model_transform: Matrix4::from_scale(2.0),
            node_transform: Matrix4::from_translation(Vector3::new(0.0, 5.0, 0.0)),
        };
        assert_eq!(hit.world_point(), Vector3::new(2.0, 5.0, 0.0));
    }
}
