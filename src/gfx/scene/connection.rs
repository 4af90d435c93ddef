use cgmath::{Deg, InnerSpace, Matrix4, Rad, Vector3, Zero};

use crate::gfx::camera::TransformUniform;
use crate::gfx::scene::NodeId;
use crate::gfx::transform;

/// How one end of a connection reaches the other system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionType {
    #[default]
    None,
    JumpGate,
    JumpHole,
    Both,
}

impl ConnectionType {
    pub fn from_flags(jump_gate: bool, jump_hole: bool) -> Self {
        match (jump_gate, jump_hole) {
            (true, true) => ConnectionType::Both,
            (true, false) => ConnectionType::JumpGate,
            (false, true) => ConnectionType::JumpHole,
            (false, false) => ConnectionType::None,
        }
    }
}

/// Line between two System nodes in the universe map.
///
/// The unit box it is drawn with is stretched along local X, so +X runs
/// from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    pub from_type: ConnectionType,
    pub to_type: ConnectionType,
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: Vector3<f32>,
    transform: Matrix4<f32>,
}

impl Connection {
    pub fn new(from: NodeId, to: NodeId, from_type: ConnectionType, to_type: ConnectionType) -> Self {
        Self {
            from,
            to,
            from_type,
            to_type,
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            transform: Matrix4::from_scale(1.0),
        }
    }

    /// Drawn thicker when either end has both a gate and a hole.
    pub fn is_double(&self) -> bool {
        self.from_type == ConnectionType::Both || self.to_type == ConnectionType::Both
    }

    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// Stretch between the two endpoint positions.
    ///
    /// The length is the full distance; the bearing only turns about Z.
    pub fn place(&mut self, from: Vector3<f32>, to: Vector3<f32>, width: f32) {
        let delta = to - from;
        let length = delta.magnitude();
        let bearing: Deg<f32> = Rad(delta.y.atan2(delta.x)).into();

        self.position = from + delta * 0.5;
        self.rotation = Vector3::new(0.0, 0.0, bearing.0);
        self.scale = Vector3::new(length, width, 1.0);
        self.transform = transform::compose(self.position, self.rotation, self.scale);
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

    pub fn transform(&self) -> Matrix4<f32> {
        self.transform
    }

    pub fn uniform(&self) -> TransformUniform {
        TransformUniform::from(self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    #[test]
    fn test_connection_type_from_flags() {
        assert_eq!(ConnectionType::from_flags(true, true), ConnectionType::Both);
        assert_eq!(ConnectionType::from_flags(true, false), ConnectionType::JumpGate);
        assert_eq!(ConnectionType::from_flags(false, true), ConnectionType::JumpHole);
        assert_eq!(ConnectionType::from_flags(false, false), ConnectionType::None);
    }

    #[test]
    fn test_placement_along_x() {
        let mut connection = Connection::new(NodeId(1), NodeId(2), ConnectionType::JumpGate, ConnectionType::JumpGate);
        connection.place(Vector3::new(0.0, 0.0, 0.0), Vector3::new(100.0, 0.0, 0.0), 0.3);

        assert_eq!(connection.position(), Vector3::new(50.0, 0.0, 0.0));
        assert!((connection.scale().x - 100.0).abs() < 1e-4);
        assert!((connection.scale().y - 0.3).abs() < 1e-6);
        assert!(connection.rotation().z.abs() < 1e-4);
        assert!(!connection.is_double());
    }

    #[test]
    fn test_length_includes_height_difference() {
        let mut connection = Connection::new(NodeId(1), NodeId(2), ConnectionType::JumpGate, ConnectionType::None);
        connection.place(Vector3::new(0.0, 0.0, 0.0), Vector3::new(60.0, 0.0, 80.0), 0.3);
        assert!((connection.scale().x - 100.0).abs() < 1e-3);
        assert_eq!(connection.position(), Vector3::new(30.0, 0.0, 40.0));

        // straight above: still a pickable, invertible box
        connection.place(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 50.0), 0.3);
        assert!((connection.scale().x - 50.0).abs() < 1e-4);
        assert!(connection.transform().invert().is_some());
    }

    #[test]
    fn test_local_x_points_from_to() {
        let from = Vector3::new(10.0, 10.0, 0.0);
        let to = Vector3::new(-20.0, -30.0, 0.0);
        let mut connection = Connection::new(NodeId(1), NodeId(2), ConnectionType::Both, ConnectionType::None);
        connection.place(from, to, 0.6);

        // the +X end of the unit box lands on `to`
        let end = transform::transform_point(&connection.transform(), Vector3::new(0.5, 0.0, 0.0));
        assert!((end - to).magnitude() < 1e-3);
        let start = transform::transform_point(&connection.transform(), Vector3::new(-0.5, 0.0, 0.0));
        assert!((start - from).magnitude() < 1e-3);
        assert!(connection.is_double());
    }

    #[test]
    fn test_other_end() {
        let connection = Connection::new(NodeId(1), NodeId(2), ConnectionType::None, ConnectionType::None);
        assert_eq!(connection.other_end(NodeId(1)), Some(NodeId(2)));
        assert_eq!(connection.other_end(NodeId(2)), Some(NodeId(1)));
        assert_eq!(connection.other_end(NodeId(3)), None);
    }
}
