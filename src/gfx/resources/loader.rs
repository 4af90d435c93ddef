use std::path::Path;

use cgmath::{InnerSpace, Vector3};
use log::debug;

use crate::error::{DesignerError, Result};
use crate::gfx::geometry::{GeometryData, Model};

/// Turns a model file into geometry.
///
/// The presenter only talks to this trait; parsing of any concrete binary
/// format lives behind it.
pub trait GeometryLoader: Send + Sync {
    /// Whether the loader understands files with this extension (lowercase, no dot).
    fn supports(&self, extension: &str) -> bool;

    fn load(&self, path: &Path) -> Result<Model>;
}

/// Wavefront OBJ loader built on `tobj`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader;

impl GeometryLoader for ObjLoader {
    fn supports(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("obj")
    }

    fn load(&self, path: &Path) -> Result<Model> {
        if !path.exists() {
            return Err(DesignerError::ModelNotFound(path.to_path_buf()));
        }

        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|err| DesignerError::ModelLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let meshes: Vec<GeometryData> = models
            .iter()
            .map(|m| {
                let mesh = &m.mesh;
                let vertices: Vec<[f32; 3]> = mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| [p[0], p[1], p[2]])
                    .collect();

                // Use normals from OBJ if available, otherwise calculate them
                let normals = if mesh.normals.len() == mesh.positions.len() {
                    mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect()
                } else {
                    face_normals(&vertices, &mesh.indices)
                };

                GeometryData {
                    vertices,
                    normals,
                    indices: mesh.indices.clone(),
                }
            })
            .collect();

        if meshes.iter().all(|mesh| mesh.indices.is_empty()) {
            return Err(DesignerError::ModelLoad {
                path: path.to_path_buf(),
                reason: "no triangles".to_string(),
            });
        }

        debug!("Loaded {} mesh(es) from {}", meshes.len(), path.display());
        Ok(Model::new(meshes))
    }
}

/// Per-vertex normals accumulated from the faces that share each vertex.
fn face_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vector3::new(0.0f32, 0.0, 0.0); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }
        let p0 = Vector3::from(vertices[a]);
        let normal = (Vector3::from(vertices[b]) - p0).cross(Vector3::from(vertices[c]) - p0);
        normals[a] += normal;
        normals[b] += normal;
        normals[c] += normal;
    }

    normals
        .into_iter()
        .map(|n| {
            if n.magnitude2() > 0.0 {
                n.normalize().into()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("sysdesigner-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_loads_triangle() {
        let path = temp_file(
            "triangle.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let model = ObjLoader.load(&path).unwrap();
        assert_eq!(model.triangle_count(), 1);
        assert_eq!(model.meshes[0].normals[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_file() {
        let err = ObjLoader.load(Path::new("/definitely/not/here.obj")).unwrap_err();
        assert!(matches!(err, DesignerError::ModelNotFound(_)));
    }

    #[test]
    fn test_supports_extension() {
        assert!(ObjLoader.supports("obj"));
        assert!(ObjLoader.supports("OBJ"));
        assert!(!ObjLoader.supports("cmp"));
    }
}
