//! Asset templates and the coalescing template cache
//!
//! A [`Template`] is an immutable, loaded model identified by name. The
//! actual decoding of model and texture files is the job of the
//! [`AssetSource`] collaborator; this module owns the memoization layer
//! that makes repeated placements and skybox switches cheap.

mod cache;

pub use cache::TemplateCache;

use crate::scene::PartMaterials;
use futures::future::BoxFuture;
use std::sync::Arc;
use thiserror::Error;

/// Asset resolution failure
///
/// Cloneable because in-flight loads are shared between concurrent
/// callers, each of which receives the same outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The model name is empty or not known to the asset source
    #[error("unknown template {0:?}")]
    UnknownTemplate(String),

    /// The asset source failed to produce the named asset
    #[error("failed to load {name:?}: {reason}")]
    LoadFailed {
        /// Asset name as requested
        name: String,
        /// Source-specific failure description
        reason: String,
    },
}

/// Immutable geometry shared by every instance of a template part
///
/// The editing core never inspects vertices; it only needs enough shape
/// metadata for backends and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Mesh label from the source file
    pub label: String,

    /// Number of vertices
    pub vertex_count: u32,

    /// Number of triangles
    pub triangle_count: u32,

    /// Radius of the bounding sphere around the mesh origin
    pub bounding_radius: f32,
}

/// One renderable piece of a template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePart {
    /// Shared, read-only geometry
    pub mesh: Arc<MeshData>,

    /// Materials as authored; a part may carry one or several
    pub materials: PartMaterials,
}

/// An immutable, loaded model used as a blueprint for instances
///
/// Owned by the [`TemplateCache`]; shared read-only by all instances
/// derived from it and never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Model name the template was resolved from
    pub name: String,

    /// Renderable parts; may be empty for degenerate models
    pub parts: Vec<TemplatePart>,
}

/// A loaded equirectangular environment texture for the skybox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentTexture {
    /// Source file name
    pub file: String,

    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,
}

/// Collaborator that resolves asset names to loaded data
///
/// Implementations perform the actual I/O and decoding (glTF, HDR, ...).
/// Loads are asynchronous so they never stall the frame loop; the cache
/// takes care of deduplicating concurrent requests.
pub trait AssetSource {
    /// Load the model with the given name
    fn load_model(&self, name: &str) -> BoxFuture<'static, Result<Template, AssetError>>;

    /// Load the environment texture with the given file name
    fn load_environment_texture(
        &self,
        file: &str,
    ) -> BoxFuture<'static, Result<EnvironmentTexture, AssetError>>;
}
