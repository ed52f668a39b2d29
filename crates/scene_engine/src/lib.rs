//! # Scene Engine
//!
//! The editing core of an interactive 3D scene-authoring tool: place,
//! select, move, duplicate, delete, and persist instances of pre-defined
//! models, alongside environment parameters and a procedurally orbiting
//! sun light.
//!
//! The crate deliberately stops at the editing layer. Rasterization,
//! windowing, asset decoding, widget toolkits, and camera navigation are
//! collaborators reached through traits:
//!
//! - [`assets::AssetSource`] resolves model and skybox names to loaded data
//! - [`render::RenderBackend`] owns GPU resources and answers ray queries
//! - [`selection::SelectionPanel`] mirrors the active selection in a UI
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use scene_engine::prelude::*;
//!
//! # fn collaborators() -> (Arc<dyn scene_engine::assets::AssetSource + Send + Sync>,
//! #     Box<dyn scene_engine::render::RenderBackend>,
//! #     Box<dyn scene_engine::selection::SelectionPanel>) { unimplemented!() }
//! let (source, backend, panel) = collaborators();
//! let mut session = EditorSession::new(source, backend, panel, EditorConfig::default());
//!
//! futures::executor::block_on(async {
//!     session.add_model("oak1", Vec3::new(0.0, 5.0, 10.0), Vec3::new(0.0, 0.0, -1.0))
//!         .await
//!         .expect("oak1 should resolve");
//! });
//!
//! let light = session.tick(0.016);
//! println!("sun at {:?}", light.position);
//! ```

pub mod assets;
pub mod codec;
pub mod config;
pub mod document;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod selection;
pub mod session;
pub mod sun;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetSource, Template, TemplateCache, TemplatePart},
        codec::MalformedTransform,
        config::{CameraParams, EditorConfig},
        document::{ImportSummary, SceneDocument, SceneLoadError, EXPORT_FILE_NAME},
        foundation::math::{Quat, Ray, Transform, Vec3},
        render::{HeadlessBackend, RayHit, RenderBackend},
        scene::{
            EnvironmentParams, Instance, InstanceKey, Material, PartKey, PartMaterials,
            SceneError, SceneStore, SubPart,
        },
        selection::{SelectionController, SelectionInfo, SelectionPanel, TransformField},
        session::{EditorKey, EditorSession},
        sun::{SunLight, SunParams, SunState},
    };
}
