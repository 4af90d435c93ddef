//! # Graphics Module
//!
//! Scene-side graphics state for the designer: the camera, placeholder and
//! loaded geometry, the ordered scene list, manipulator handles and ray
//! picking. Nothing in here talks to a GPU; the rendering frontend reads
//! transforms and uniforms out of the scene and draws them.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Free-fly camera with animated look-at and zoom
//! - **Geometry** ([`geometry`]) - Triangle meshes, placeholder shapes, ray/triangle tests
//! - **Gizmos** ([`gizmos`]) - Axis handles that follow the selected node
//! - **Picking** ([`picking`]) - Screen point to node resolution
//! - **Resources** ([`resources`]) - Model loaders and the shared model cache
//! - **Scene Management** ([`scene`]) - Two-layer child list with overlays
//! - **Transform Math** ([`transform`]) - Position/rotation/scale composition
//!
//! ## Usage
//!
//! ```rust
//! use sysdesigner::gfx::{camera::FlyCamera, scene::Scene};
//!
//! let camera = FlyCamera::default();
//! let scene = Scene::new();
//! let ray = camera.screen_to_ray((400.0, 300.0));
//! assert!(scene.intersections(&ray, camera.position, 0.15).is_empty());
//! ```

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod picking;
pub mod resources;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use camera::FlyCamera;
pub use picking::{Aabb, ObjectPicker, PickOutcome, Ray};
pub use scene::Scene;
