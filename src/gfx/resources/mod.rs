//! Model resources
//!
//! Geometry loaders and the shared, append-only model cache.

pub mod loader;
pub mod model_cache;

// Re-export main types
pub use loader::{GeometryLoader, ObjLoader};
pub use model_cache::ModelCache;
