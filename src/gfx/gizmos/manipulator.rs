//! # Manipulator Handles
//!
//! Axis lines drawn through the selected node while a manipulation mode is
//! active. Each line starts at the node's position and points along one of
//! its local axes; grabbing a line starts a manipulation session on that axis.

use cgmath::{InnerSpace, MetricSpace, Vector3};

use crate::data::{ContentType, ViewerType};
use crate::gfx::picking::Ray;
use crate::gfx::transform;
use crate::manipulation::ManipulationMode;

/// Pick tolerance as a fraction of the handle length.
const PICK_RADIUS: f32 = 0.08;

/// Local axis of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// Keep only this axis' component of a vector.
    pub fn constrain(self, v: Vector3<f32>) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::new(v.x, 0.0, 0.0),
            Axis::Y => Vector3::new(0.0, v.y, 0.0),
            Axis::Z => Vector3::new(0.0, 0.0, v.z),
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            Axis::X => [1.0, 0.2, 0.2, 1.0],
            Axis::Y => [0.2, 1.0, 0.2, 1.0],
            Axis::Z => [0.2, 0.2, 1.0, 1.0],
        }
    }
}

/// Highlight of the handle being dragged.
pub const ACTIVE_HANDLE_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Number of handles to show for the selected node.
///
/// The universe map only supports translation. In system view every mode
/// gets three handles except scaling, which is limited by the kind's
/// legal axis count.
pub fn handle_count(viewer: ViewerType, mode: ManipulationMode, object_type: ContentType) -> usize {
    if !viewer.supports_manipulation() || mode == ManipulationMode::None {
        return 0;
    }
    if viewer == ViewerType::Universe && mode != ManipulationMode::Translate {
        return 0;
    }
    if mode == ManipulationMode::Scale || viewer == ViewerType::Universe {
        object_type.axis_count().min(3)
    } else {
        3
    }
}

/// One axis handle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulatorLine {
    pub axis: Axis,
    pub origin: Vector3<f32>,
    /// Unit direction of the node's local axis.
    pub direction: Vector3<f32>,
    pub color: [f32; 4],
}

impl ManipulatorLine {
    pub fn new(axis: Axis, position: Vector3<f32>, rotation: Vector3<f32>) -> Self {
        let mut line = Self {
            axis,
            origin: position,
            direction: axis.unit(),
            color: axis.color(),
        };
        line.update(position, rotation);
        line
    }

    /// Follow the node. The color is left alone.
    pub fn update(&mut self, position: Vector3<f32>, rotation: Vector3<f32>) {
        let rotation = transform::rotation_matrix(rotation);
        self.origin = position;
        self.direction = transform::transform_vector(&rotation, self.axis.unit()).normalize();
    }

    pub fn set_active(&mut self, active: bool) {
        self.color = if active { ACTIVE_HANDLE_COLOR } else { self.axis.color() };
    }

    pub fn is_active(&self) -> bool {
        self.color == ACTIVE_HANDLE_COLOR
    }

    /// On-screen size stays constant, so the world length grows with distance.
    pub fn world_length(&self, camera_position: Vector3<f32>, fraction: f32) -> f32 {
        camera_position.distance(self.origin) * fraction
    }

    pub fn end(&self, length: f32) -> Vector3<f32> {
        self.origin + self.direction * length
    }

    /// Closest point on the handle if the ray passes within pick tolerance.
    pub fn intersect_ray(&self, ray: &Ray, length: f32) -> Option<Vector3<f32>> {
        if length <= 0.0 {
            return None;
        }

        let w0 = ray.origin - self.origin;
        let b = ray.direction.dot(self.direction);
        let d = ray.direction.dot(w0);
        let e = self.direction.dot(w0);
        let denom = 1.0 - b * b;
        if denom.abs() < 1e-6 {
            return None;
        }

        let s = ((e - b * d) / denom).clamp(0.0, length);
        let on_segment = self.origin + self.direction * s;
        let t = (on_segment - ray.origin).dot(ray.direction).max(0.0);
        let on_ray = ray.point_at(t);

        if on_ray.distance(on_segment) <= length * PICK_RADIUS {
            Some(on_segment)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_counts() {
        use ManipulationMode as M;

        assert_eq!(handle_count(ViewerType::System, M::Translate, ContentType::Planet), 3);
        assert_eq!(handle_count(ViewerType::System, M::Rotate, ContentType::ZoneSphere), 3);
        assert_eq!(handle_count(ViewerType::System, M::Scale, ContentType::ZoneSphere), 1);
        assert_eq!(handle_count(ViewerType::System, M::Scale, ContentType::ZoneRing), 2);
        assert_eq!(handle_count(ViewerType::System, M::Scale, ContentType::Planet), 0);
        assert_eq!(handle_count(ViewerType::System, M::None, ContentType::ZoneBox), 0);
        assert_eq!(handle_count(ViewerType::Universe, M::Translate, ContentType::System), 2);
        assert_eq!(handle_count(ViewerType::Universe, M::Rotate, ContentType::System), 0);
        assert_eq!(handle_count(ViewerType::ModelPreview, M::Translate, ContentType::Ship), 0);
    }

    #[test]
    fn test_line_follows_rotation() {
        let line = ManipulatorLine::new(Axis::X, Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 90.0));
        assert!((line.direction - Vector3::unit_y()).magnitude() < 1e-5);
        assert_eq!(line.origin, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_ray_picks_handle() {
        let line = ManipulatorLine::new(Axis::X, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        let down = Vector3::new(0.0, 0.0, -1.0);

        let hit = line.intersect_ray(&Ray::new(Vector3::new(5.0, 0.1, 10.0), down), 10.0);
        let point = hit.expect("ray passes close to the handle");
        assert!((point.x - 5.0).abs() < 1e-4);

        // beyond the end of the handle
        assert!(line.intersect_ray(&Ray::new(Vector3::new(15.0, 0.0, 10.0), down), 10.0).is_none());
        // too far to the side
        assert!(line.intersect_ray(&Ray::new(Vector3::new(5.0, 3.0, 10.0), down), 10.0).is_none());
    }

    #[test]
    fn test_active_color() {
        let mut line = ManipulatorLine::new(Axis::Z, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        line.set_active(true);
        assert!(line.is_active());
        line.update(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        assert!(line.is_active());
        line.set_active(false);
        assert_eq!(line.color, Axis::Z.color());
    }
}
