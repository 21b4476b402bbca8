//! Model library for island objects and the creature.
//!
//! Models are identified by the content hash of their source file. Loading is
//! an external dependency that may fail at any time; every lookup resolves to
//! a [`ModelSlot`], which is either the loaded model or a procedural
//! primitive with the same footprint. The scene never fails to compose
//! because a model is missing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Content-addressed model ID computed from the source bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Metadata read from a glTF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub mesh_count: u32,
    pub node_count: u32,
    pub base_colors: Vec<[f32; 4]>,
}

/// Procedural stand-in drawn when a model is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Box { half_extents: [f32; 3] },
}

impl Primitive {
    pub fn cube(half_extent: f32) -> Self {
        Self::Box {
            half_extents: [half_extent; 3],
        }
    }

    /// Radius of the sphere enclosing the primitive.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Box { half_extents: [x, y, z] } => (x * x + y * y + z * z).sqrt(),
        }
    }
}

/// What the renderer draws for an object, resolved once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelSlot {
    Loaded(AssetId),
    Fallback(Primitive),
}

impl ModelSlot {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Errors from model operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("glTF parse error: {0}")]
    GltfParse(String),
    #[error("glTF document {0} has no meshes")]
    NoMeshes(PathBuf),
}

/// Model registry plus the per-key slot cache.
#[derive(Debug, Clone, Default)]
pub struct ModelLibrary {
    root: Option<PathBuf>,
    models: BTreeMap<AssetId, Model>,
    slots: BTreeMap<String, ModelSlot>,
}

impl ModelLibrary {
    /// A library with no model directory: every slot falls back.
    pub fn new() -> Self {
        Self::default()
    }

    /// A library that resolves `key` to `<root>/<key>.gltf`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn get(&self, id: AssetId) -> Option<&Model> {
        self.models.get(&id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Number of resolved keys that ended up on a fallback primitive.
    pub fn fallback_count(&self) -> usize {
        self.slots.values().filter(|s| s.is_fallback()).count()
    }

    /// Resolve the slot for `key`, loading the model on first use.
    ///
    /// Any failure is logged and produces `ModelSlot::Fallback(fallback)`.
    /// The outcome is cached, so a key is only ever attempted once.
    pub fn resolve(&mut self, key: &str, fallback: Primitive) -> ModelSlot {
        if let Some(slot) = self.slots.get(key) {
            return *slot;
        }
        let slot = match self.root.as_ref().map(|r| r.join(format!("{key}.gltf"))) {
            None => {
                tracing::debug!(key, "no model directory, using fallback");
                ModelSlot::Fallback(fallback)
            }
            Some(path) => match self.import_gltf(&path) {
                Ok(id) => ModelSlot::Loaded(id),
                Err(e) => {
                    tracing::warn!(key, path = %path.display(), error = %e, "model load failed, using fallback");
                    ModelSlot::Fallback(fallback)
                }
            },
        };
        self.slots.insert(key.to_string(), slot);
        slot
    }

    /// Read a glTF document's metadata and register it.
    pub fn import_gltf(&mut self, path: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let json: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| AssetError::GltfParse(e.to_string()))?;

        let mesh_count = json
            .get("meshes")
            .and_then(|m| m.as_array())
            .map_or(0, |m| m.len() as u32);
        if mesh_count == 0 {
            return Err(AssetError::NoMeshes(path.to_path_buf()));
        }
        let node_count = json
            .get("nodes")
            .and_then(|n| n.as_array())
            .map_or(0, |n| n.len() as u32);

        let base_colors = json
            .get("materials")
            .and_then(|m| m.as_array())
            .map(|materials| materials.iter().map(base_color).collect())
            .unwrap_or_default();

        let name = json
            .get("asset")
            .and_then(|a| a.get("extras"))
            .and_then(|e| e.get("title"))
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unnamed".into());

        let id = content_hash(&bytes);
        tracing::debug!(?id, name, mesh_count, "model imported");
        self.models.insert(
            id,
            Model {
                name,
                mesh_count,
                node_count,
                base_colors,
            },
        );
        Ok(id)
    }
}

fn base_color(material: &serde_json::Value) -> [f32; 4] {
    let mut color = [0.8f32, 0.8, 0.8, 1.0];
    if let Some(arr) = material
        .get("pbrMetallicRoughness")
        .and_then(|pbr| pbr.get("baseColorFactor"))
        .and_then(|c| c.as_array())
    {
        for (slot, v) in color.iter_mut().zip(arr) {
            if let Some(f) = v.as_f64() {
                *slot = f as f32;
            }
        }
    }
    color
}

fn content_hash(bytes: &[u8]) -> AssetId {
    let digest = Sha256::digest(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    AssetId(u64::from_le_bytes(head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PALM_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "meshes": [{ "name": "trunk" }, { "name": "leaves" }],
        "nodes": [{ "mesh": 0 }, { "mesh": 1 }],
        "materials": [{ "pbrMetallicRoughness": { "baseColorFactor": [0.2, 0.6, 0.1, 1.0] } }]
    }"#;

    fn write_model(dir: &Path, key: &str, body: &str) {
        let mut f = std::fs::File::create(dir.join(format!("{key}.gltf"))).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn no_root_falls_back() {
        let mut lib = ModelLibrary::new();
        let slot = lib.resolve("palmTree", Primitive::cube(1.0));
        assert_eq!(slot, ModelSlot::Fallback(Primitive::cube(1.0)));
        assert_eq!(lib.fallback_count(), 1);
    }

    #[test]
    fn loads_model_from_root() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "palmTree", PALM_GLTF);

        let mut lib = ModelLibrary::with_root(dir.path());
        let slot = lib.resolve("palmTree", Primitive::cube(1.0));
        let ModelSlot::Loaded(id) = slot else {
            panic!("expected loaded slot, got {slot:?}");
        };
        let model = lib.get(id).unwrap();
        assert_eq!(model.name, "palmTree");
        assert_eq!(model.mesh_count, 2);
        assert_eq!(model.node_count, 2);
        assert_eq!(model.base_colors, vec![[0.2, 0.6, 0.1, 1.0]]);
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut lib = ModelLibrary::with_root(dir.path());
        assert!(lib.resolve("donut", Primitive::cube(0.5)).is_fallback());
    }

    #[test]
    fn corrupt_or_empty_documents_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "broken", "{ not json");
        write_model(dir.path(), "hollow", r#"{ "asset": { "version": "2.0" } }"#);

        let mut lib = ModelLibrary::with_root(dir.path());
        assert!(lib.resolve("broken", Primitive::cube(1.0)).is_fallback());
        assert!(lib.resolve("hollow", Primitive::cube(1.0)).is_fallback());
        assert!(lib.is_empty());
    }

    #[test]
    fn identical_content_shares_id() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "a", PALM_GLTF);
        write_model(dir.path(), "b", PALM_GLTF);

        let mut lib = ModelLibrary::with_root(dir.path());
        let a = lib.resolve("a", Primitive::cube(1.0));
        let b = lib.resolve("b", Primitive::cube(1.0));
        assert_eq!(a, b);
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn resolution_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut lib = ModelLibrary::with_root(dir.path());
        assert!(lib.resolve("mailbox", Primitive::cube(1.0)).is_fallback());

        // A file appearing later does not change an already resolved slot.
        write_model(dir.path(), "mailbox", PALM_GLTF);
        assert!(lib.resolve("mailbox", Primitive::cube(1.0)).is_fallback());
    }

    #[test]
    fn primitive_bounds() {
        let r = Primitive::cube(1.0).bounding_radius();
        assert!((r - 3.0_f32.sqrt()).abs() < 1e-6);
    }
}
