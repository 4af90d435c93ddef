//! # Geometry
//!
//! Triangle geometry shared by loaded models and the placeholder shapes used
//! when no model is available. A [`Model`] is what the model cache hands out:
//! one or more meshes plus the model-hierarchy transform that places them
//! inside the owning content node.
//!
//! ## Usage
//!
//! ```rust
//! use sysdesigner::gfx::geometry::{generate_cube, Model};
//!
//! let model = Model::from_mesh(generate_cube());
//! assert_eq!(model.triangle_count(), 12);
//! ```

pub mod primitives;

use std::sync::{Arc, OnceLock};

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3};

pub use primitives::*;

use crate::data::Shape;
use crate::gfx::picking::{Aabb, Ray};
use crate::gfx::transform;

/// Shared, immutable handle to loaded geometry.
pub type GeometryHandle = Arc<Model>;

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

/// Ray/triangle hit in mesh-local space.
#[derive(Debug, Clone, Copy)]
pub struct MeshHit {
    /// Ray parameter at the hit.
    pub distance: f32,
    /// Barycentric-weighted hit point in mesh space.
    pub point: Vector3<f32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_vertices(&self.vertices)
    }

    /// Nearest triangle hit along `ray` (Möller–Trumbore, double sided).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<MeshHit> {
        let mut nearest: Option<MeshHit> = None;

        for triangle in self.indices.chunks_exact(3) {
            let p0 = Vector3::from(self.vertices[triangle[0] as usize]);
            let p1 = Vector3::from(self.vertices[triangle[1] as usize]);
            let p2 = Vector3::from(self.vertices[triangle[2] as usize]);

            let edge1 = p1 - p0;
            let edge2 = p2 - p0;
            let h = ray.direction.cross(edge2);
            let a = edge1.dot(h);
            if a.abs() < 1e-9 {
                continue;
            }

            let f = 1.0 / a;
            let s = ray.origin - p0;
            let u = f * s.dot(h);
            if !(0.0..=1.0).contains(&u) {
                continue;
            }

            let q = s.cross(edge1);
            let v = f * ray.direction.dot(q);
            if v < 0.0 || u + v > 1.0 {
                continue;
            }

            let t = f * edge2.dot(q);
            if t < 0.0 {
                continue;
            }

            if nearest.map_or(true, |hit| t < hit.distance) {
                let w = 1.0 - u - v;
                nearest = Some(MeshHit {
                    distance: t,
                    point: p0 * w + p1 * u + p2 * v,
                });
            }
        }

        nearest
    }
}

/// Geometry of one content node: meshes plus their model-hierarchy transform.
#[derive(Debug, Clone)]
pub struct Model {
    pub meshes: Vec<GeometryData>,
    pub transform: Matrix4<f32>,
}

impl Model {
    pub fn new(meshes: Vec<GeometryData>) -> Self {
        Self {
            meshes,
            transform: Matrix4::identity(),
        }
    }

    pub fn from_mesh(mesh: GeometryData) -> Self {
        Self::new(vec![mesh])
    }

    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    /// Unit placeholder for a shape kind.
    pub fn placeholder(shape: Shape) -> Self {
        let mesh = match shape {
            Shape::Box => generate_cube(),
            Shape::Sphere => generate_sphere(16, 8),
            Shape::Cylinder => generate_cylinder(1.0, 1.0, 16),
        };
        Self::from_mesh(mesh)
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(GeometryData::triangle_count).sum()
    }

    /// Bounds in the owning node's local space (model transform applied).
    pub fn bounds(&self) -> Aabb {
        self.meshes
            .iter()
            .map(GeometryData::bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(Aabb::unit)
            .transform(&self.transform)
    }

    /// Nearest hit of a node-local ray, returned in mesh space.
    ///
    /// The ray is moved into mesh space through the inverse model transform.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<MeshHit> {
        let inverse = self.transform.invert()?;
        let local = Ray::new(
            transform::transform_point(&inverse, ray.origin),
            transform::transform_vector(&inverse, ray.direction),
        );

        self.meshes
            .iter()
            .filter_map(|mesh| mesh.intersect_ray(&local))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Shared placeholder geometry for a shape.
pub fn placeholder_model(shape: Shape) -> GeometryHandle {
    static BOX: OnceLock<GeometryHandle> = OnceLock::new();
    static SPHERE: OnceLock<GeometryHandle> = OnceLock::new();
    static CYLINDER: OnceLock<GeometryHandle> = OnceLock::new();

    let cell = match shape {
        Shape::Box => &BOX,
        Shape::Sphere => &SPHERE,
        Shape::Cylinder => &CYLINDER,
    };
    cell.get_or_init(|| Arc::new(Model::placeholder(shape))).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_hit_point_on_face() {
        let cube = generate_cube();
        let ray = Ray::new(Vector3::new(0.1, 0.2, 5.0), Vector3::new(0.0, 0.0, -1.0));

        let hit = cube.intersect_ray(&ray).expect("ray should hit the cube");
        assert!((hit.point.z - 0.5).abs() < 1e-5);
        assert!((hit.point.x - 0.1).abs() < 1e-5);
        assert!((hit.distance - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_model_transform_moves_hits() {
        let model = Model::from_mesh(generate_cube())
            .with_transform(Matrix4::from_translation(Vector3::new(0.0, 0.0, 2.0)));
        let ray = Ray::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));

        let hit = model.intersect_ray(&ray).unwrap();
        // mesh space: front face of the untransformed cube
        assert!((hit.point.z - 0.5).abs() < 1e-5);
        assert!((model.bounds().max.z - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_placeholders_are_shared() {
        let a = placeholder_model(Shape::Cylinder);
        let b = placeholder_model(Shape::Cylinder);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &placeholder_model(Shape::Box)));
    }

    #[test]
    fn test_miss() {
        let model = Model::placeholder(Shape::Sphere);
        let ray = Ray::new(Vector3::new(5.0, 5.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(model.intersect_ray(&ray).is_none());
    }
}
