use std::collections::HashMap;

use log::debug;
use parking_lot::RwLock;

use crate::gfx::geometry::{GeometryHandle, Model};

/// Shared geometry keyed by case-insensitive model path.
///
/// Entries are only ever added; a handle that was handed out is never
/// replaced or mutated in place.
#[derive(Debug, Default)]
pub struct ModelCache {
    models: RwLock<HashMap<String, GeometryHandle>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &str) -> String {
        path.replace('\\', "/").to_lowercase()
    }

    pub fn get(&self, path: &str) -> Option<GeometryHandle> {
        let models = self.models.read();
        models.get(&Self::key(path)).cloned()
    }

    /// Insert a model and return the cached handle.
    ///
    /// If the path is already cached the existing handle wins.
    pub fn insert(&self, path: &str, model: Model) -> GeometryHandle {
        self.insert_handle(path, GeometryHandle::new(model))
    }

    pub fn insert_handle(&self, path: &str, handle: GeometryHandle) -> GeometryHandle {
        let mut models = self.models.write();
        models
            .entry(Self::key(path))
            .or_insert_with(|| {
                debug!("Caching model {}", path);
                handle
            })
            .clone()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
