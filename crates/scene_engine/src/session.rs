//! Editor session
//!
//! Ties the store, template cache, selection controller, sun, and render
//! backend together behind the operations a host application maps its
//! input to: spawn a model, click, drag, duplicate, delete, adjust the
//! environment, export and import.

use crate::assets::{AssetError, AssetSource, TemplateCache};
use crate::codec::MalformedTransform;
use crate::config::{CameraParams, EditorConfig};
use crate::document::{self, ImportSummary, SceneDocument};
use crate::foundation::math::{Ray, Vec3};
use crate::render::RenderBackend;
use crate::scene::{EnvironmentParams, InstanceKey, PartKey, SceneError, SceneStore};
use crate::selection::{SelectionController, SelectionPanel, TransformField};
use crate::sun::{SunLight, SunParams, SunState};
use std::sync::Arc;

/// Editing actions bound to keys by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Toggle pointer-drag move mode
    ToggleMove,
    /// Duplicate the selected instance
    Duplicate,
    /// Delete the selected instance
    Delete,
}

/// One editing session over a single scene
pub struct EditorSession {
    store: SceneStore,
    cache: TemplateCache,
    selection: SelectionController,
    backend: Box<dyn RenderBackend>,
    config: EditorConfig,
    camera: CameraParams,
    sun_params: SunParams,
    sun_state: SunState,
    move_mode: bool,
}

impl EditorSession {
    /// Create a session over an empty scene
    pub fn new(
        source: Arc<dyn AssetSource + Send + Sync>,
        backend: Box<dyn RenderBackend>,
        panel: Box<dyn SelectionPanel>,
        config: EditorConfig,
    ) -> Self {
        Self {
            store: SceneStore::new(config.duplicate_offset),
            cache: TemplateCache::new(source),
            selection: SelectionController::new(config.highlight.clone(), panel),
            backend,
            config,
            camera: CameraParams::default(),
            sun_params: SunParams::default(),
            sun_state: SunState::default(),
            move_mode: false,
        }
    }

    /// Spawn a new instance of a model ahead of the camera
    ///
    /// The spawn point sits `spawn_distance` along the camera's forward
    /// direction, dropped to ground level. The new instance comes back
    /// selected so the panel immediately reflects it.
    pub async fn add_model(
        &mut self,
        name: &str,
        camera_position: Vec3,
        camera_forward: Vec3,
    ) -> Result<InstanceKey, SceneError> {
        let template = self.cache.template(name).await?;

        let forward = camera_forward
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0));
        let mut spawn = camera_position + forward * self.config.spawn_distance;
        spawn.y = 0.0;

        let key = self.store.place(
            self.backend.as_mut(),
            &template,
            crate::foundation::math::Transform::from_position(spawn),
        );
        self.select_first_part(key);
        Ok(key)
    }

    /// Resolve a pointer click: select what was hit, or clear
    ///
    /// Hits come back distance-sorted from the backend; the nearest one
    /// that maps to a selectable instance wins. A click that resolves to
    /// nothing deselects.
    pub fn pointer_click(&mut self, ray: &Ray) {
        let hits = self.backend.ray_cast(ray);
        for hit in hits {
            if let Some(instance) = self.store.resolve_hit(hit.part) {
                self.selection.select(&mut self.store, instance, hit.part);
                return;
            }
        }
        self.selection.deselect(&mut self.store);
    }

    /// Drag the selection along the ground while move mode is active
    pub fn pointer_move(&mut self, ray: &Ray) {
        if !self.move_mode || self.selection.selected().is_none() {
            return;
        }
        if let Some(target) = ray.intersect_ground_plane() {
            self.selection.move_pointer_target(&mut self.store, target);
        }
    }

    /// Dispatch a bound editing key
    pub fn key(&mut self, key: EditorKey) {
        match key {
            EditorKey::ToggleMove => {
                self.move_mode = !self.move_mode;
                log::debug!("move mode {}", if self.move_mode { "on" } else { "off" });
            }
            EditorKey::Duplicate => {
                self.duplicate_selected();
            }
            EditorKey::Delete => self.delete_selected(),
        }
    }

    /// Duplicate the selected instance; the copy becomes the selection
    ///
    /// Deselects first so the copy inherits the instance's real
    /// materials rather than the highlight.
    pub fn duplicate_selected(&mut self) -> Option<InstanceKey> {
        let (instance, _) = self.selection.selected()?;
        self.selection.deselect(&mut self.store);
        match self.store.duplicate(self.backend.as_mut(), instance) {
            Ok(clone) => {
                self.select_first_part(clone);
                Some(clone)
            }
            Err(err) => {
                log::error!("duplicate failed: {err}");
                None
            }
        }
    }

    /// Delete the selected instance
    pub fn delete_selected(&mut self) {
        let Some((instance, _)) = self.selection.selected() else {
            return;
        };
        self.selection.notice_removed(instance);
        self.store.remove(self.backend.as_mut(), instance);
    }

    /// Remove every placed instance
    pub fn clear_scene(&mut self) {
        self.selection.deselect(&mut self.store);
        self.store.clear(self.backend.as_mut());
    }

    /// Apply a textual transform edit from the panel to the selection
    pub fn edit_selected(
        &mut self,
        field: TransformField,
        text: &str,
    ) -> Result<(), MalformedTransform> {
        self.selection
            .apply_transform_edit(&mut self.store, field, text)
    }

    /// Rename the selected instance
    pub fn rename_selected(&mut self, name: &str) {
        self.selection.rename(&mut self.store, name);
    }

    /// Switch the skybox, keeping the current one if the load fails
    pub async fn set_skybox(&mut self, file: &str) -> Result<(), AssetError> {
        match self.cache.environment_texture(file).await {
            Ok(_) => {
                self.store.environment_mut().skybox_file = Some(file.to_string());
                Ok(())
            }
            Err(err) => {
                log::error!("keeping current skybox, {file:?} failed to load: {err}");
                Err(err)
            }
        }
    }

    /// Switch the ground texture set and its tiling repeat count
    pub fn set_ground(&mut self, texture: &str, repeats: u32) {
        let environment = self.store.environment_mut();
        environment.ground_texture = texture.to_string();
        environment.ground_repeats = repeats;
    }

    /// Toggle WASD camera translation for the host's controller
    pub fn set_camera_mode(&mut self, wasd_movement: bool) {
        self.camera.wasd_movement = wasd_movement;
        log::debug!("wasd movement {}", if wasd_movement { "on" } else { "off" });
    }

    /// Replace the sun parameters; the light updates without time passing
    pub fn set_sun_params(&mut self, params: SunParams) -> SunLight {
        self.sun_params = params;
        self.sun_light_now()
    }

    /// Derive the light for the current angle without advancing it
    pub fn sun_light_now(&self) -> SunLight {
        let (_, light) = crate::sun::orbit(self.sun_state.angle, 0.0, &self.sun_params);
        light
    }

    /// Advance simulation time and return the sun light for this frame
    pub fn tick(&mut self, delta: f32) -> SunLight {
        self.sun_state.advance(delta, &self.sun_params)
    }

    /// Snapshot the scene as a serializable document
    pub fn export_document(&self) -> SceneDocument {
        document::export(&self.store)
    }

    /// Replace the scene with a document's content
    pub async fn import_document(&mut self, document: &SceneDocument) -> ImportSummary {
        self.selection.deselect(&mut self.store);
        document::import(document, &mut self.store, &self.cache, self.backend.as_mut()).await
    }

    /// Currently selected instance and sub-part
    pub fn selection(&self) -> Option<(InstanceKey, PartKey)> {
        self.selection.selected()
    }

    /// Whether pointer drags move the selection
    pub fn move_mode(&self) -> bool {
        self.move_mode
    }

    /// The scene store, read only
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Current environment parameters
    pub fn environment(&self) -> &EnvironmentParams {
        self.store.environment()
    }

    /// Static editor configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Camera integration parameters
    pub fn camera(&self) -> &CameraParams {
        &self.camera
    }

    /// Sun orbit parameters
    pub fn sun_params(&self) -> &SunParams {
        &self.sun_params
    }

    fn select_first_part(&mut self, key: InstanceKey) {
        let part = self
            .store
            .instance(key)
            .and_then(|instance| instance.parts.first().copied());
        if let Some(part) = part {
            self.selection.select(&mut self.store, key, part);
        }
    }
}
