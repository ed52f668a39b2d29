//! Scene document serialization
//!
//! A scene persists as a JSON document with an environment parameter
//! block and one node per placed instance. Transform fields are the
//! textual codec form, `"x, y, z"` strings, full precision, so an
//! export/import round trip reproduces the scene exactly.
//!
//! Reading is deliberately forgiving: documents written by hand or by
//! older exporters may carry arrays instead of strings, or drop blocks
//! entirely, and loading normalizes all of that instead of failing.

use crate::assets::TemplateCache;
use crate::codec;
use crate::foundation::math::Transform;
use crate::render::RenderBackend;
use crate::scene::SceneStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Default file name suggested for exported scenes
pub const EXPORT_FILE_NAME: &str = "scene_export.json";

/// Failure to read or write a scene document file
#[derive(Debug, Error)]
pub enum SceneLoadError {
    /// Filesystem failure
    #[error("scene file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not JSON at all
    #[error("scene file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Environment block of a scene document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentParams {
    /// Skybox image file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Ground texture set name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,

    /// Ground texture tiling repeat count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeats: Option<u32>,
}

/// One placed instance in a scene document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Display name of the instance
    pub name: String,

    /// Template the instance was derived from
    ///
    /// Import resolves assets through this field so a renamed instance
    /// still finds its model. Documents written before renaming existed
    /// omit it, in which case `name` doubles as the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Position as "x, y, z"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Rotation quaternion as "x, y, z, w"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<String>,

    /// Scale as "x, y, z"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
}

/// A complete serialized scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Environment parameters
    #[serde(default)]
    pub params: DocumentParams,

    /// Placed instances in registration order
    #[serde(default)]
    pub nodes: Vec<DocumentNode>,
}

/// What an import actually managed to place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Nodes placed into the scene
    pub placed: usize,
    /// Nodes skipped because their template failed to resolve or the
    /// node had no name
    pub skipped: usize,
}

impl SceneDocument {
    /// Parse a document from JSON text
    ///
    /// Structural surprises (missing blocks, array-valued transform
    /// fields, nodes without names) are normalized; only text that is not
    /// JSON at all is an error.
    pub fn from_json_str(text: &str) -> Result<Self, SceneLoadError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json_value(&value))
    }

    /// Normalize a parsed JSON value into a document
    pub fn from_json_value(value: &Value) -> Self {
        let Some(root) = value.as_object() else {
            log::warn!("scene document root is not an object, loading an empty scene");
            return Self::default();
        };

        let params = root
            .get("params")
            .and_then(Value::as_object)
            .map(|params| DocumentParams {
                file: params.get("file").and_then(Value::as_str).map(String::from),
                texture: params
                    .get("texture")
                    .and_then(Value::as_str)
                    .map(String::from),
                repeats: params
                    .get("repeats")
                    .and_then(Value::as_u64)
                    .map(|n| n as u32),
            })
            .unwrap_or_default();

        let nodes = root
            .get("nodes")
            .and_then(Value::as_array)
            .map(|nodes| {
                nodes
                    .iter()
                    .filter_map(|node| {
                        let node = node.as_object()?;
                        let name = node.get("name").and_then(Value::as_str)?.to_string();
                        Some(DocumentNode {
                            name,
                            template: node
                                .get("template")
                                .and_then(Value::as_str)
                                .map(String::from),
                            position: transform_field(node.get("position")),
                            rotation: transform_field(node.get("rotation")),
                            scale: transform_field(node.get("scale")),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { params, nodes }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, SceneLoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document to a file
    pub fn save_to_path(&self, path: &Path) -> Result<(), SceneLoadError> {
        std::fs::write(path, self.to_json_string()?)?;
        log::info!("exported scene to {}", path.display());
        Ok(())
    }

    /// Read and normalize a document from a file
    pub fn load_from_path(path: &Path) -> Result<Self, SceneLoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Accept a transform field as a string or as a numeric array
///
/// Array forms are re-encoded into the canonical comma-separated string
/// so the rest of the pipeline sees a single shape.
fn transform_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let components: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_f64().map(|n| n.to_string()))
                .collect();
            components.map(|c| c.join(", "))
        }
        _ => None,
    }
}

/// Snapshot the store into a document, in registration order
pub fn export(store: &SceneStore) -> SceneDocument {
    let environment = store.environment();
    let params = DocumentParams {
        file: environment.skybox_file.clone(),
        texture: Some(environment.ground_texture.clone()),
        repeats: Some(environment.ground_repeats),
    };

    let nodes = store
        .iter_ordered()
        .map(|(_, instance)| {
            let name = if instance.name.is_empty() {
                "unnamed".to_string()
            } else {
                instance.name.clone()
            };
            DocumentNode {
                name,
                template: Some(instance.template.clone()),
                position: Some(codec::encode_vec3(&instance.transform.position)),
                rotation: Some(codec::encode_quat(&instance.transform.rotation)),
                scale: Some(codec::encode_vec3(&instance.transform.scale)),
            }
        })
        .collect();

    SceneDocument { params, nodes }
}

/// Rebuild the store from a document
///
/// The store is cleared first, then each node's template is resolved
/// through the cache and placed at its recorded transform. A node whose
/// template fails to load is skipped with an error log; a malformed
/// transform field falls back to that component's identity. Environment
/// parameters apply last, and a skybox that fails to load keeps the
/// previous one.
pub async fn import(
    document: &SceneDocument,
    store: &mut SceneStore,
    cache: &TemplateCache,
    backend: &mut dyn RenderBackend,
) -> ImportSummary {
    store.clear(backend);
    let mut summary = ImportSummary::default();

    for node in &document.nodes {
        let template_name = node.template.as_deref().unwrap_or(&node.name);
        if template_name.trim().is_empty() {
            log::warn!("skipping scene node without a template name");
            summary.skipped += 1;
            continue;
        }

        let template = match cache.template(template_name).await {
            Ok(template) => template,
            Err(err) => {
                log::error!("skipping scene node {:?}: {err}", node.name);
                summary.skipped += 1;
                continue;
            }
        };

        let mut transform = Transform::identity();
        if let Some(text) = &node.position {
            match codec::decode_vec3(text) {
                Ok(position) => transform.position = position,
                Err(err) => log::warn!("node {:?} position {text:?}: {err}", node.name),
            }
        }
        if let Some(text) = &node.rotation {
            match codec::decode_quat(text) {
                Ok(rotation) => transform.rotation = rotation,
                Err(err) => log::warn!("node {:?} rotation {text:?}: {err}", node.name),
            }
        }
        if let Some(text) = &node.scale {
            match codec::decode_vec3(text) {
                Ok(scale) => transform.scale = scale,
                Err(err) => log::warn!("node {:?} scale {text:?}: {err}", node.name),
            }
        }

        let key = store.place(backend, &template, transform);
        if !node.name.trim().is_empty() {
            if let Some(instance) = store.instance_mut(key) {
                instance.name = node.name.clone();
            }
        }
        summary.placed += 1;
    }

    if let Some(texture) = &document.params.texture {
        store.environment_mut().ground_texture = texture.clone();
    }
    if let Some(repeats) = document.params.repeats {
        store.environment_mut().ground_repeats = repeats;
    }
    if let Some(file) = &document.params.file {
        match cache.environment_texture(file).await {
            Ok(_) => store.environment_mut().skybox_file = Some(file.clone()),
            Err(err) => log::error!("keeping current skybox, {file:?} failed to load: {err}"),
        }
    }

    summary
}
