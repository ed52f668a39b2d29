//! Scene entity store
//!
//! Owns the mutable set of placed instances. Placement deep-clones a
//! template's parts into fresh sub-parts, registers them with the render
//! backend, and tags each one selectable with a back-reference to the new
//! instance. Removal is the exact inverse and releases the per-part
//! backend resources.

use super::environment::EnvironmentParams;
use super::instance::{Instance, InstanceKey, PartKey, SubPart};
use crate::assets::{AssetError, Template};
use crate::foundation::math::Transform;
use crate::render::RenderBackend;
use slotmap::SlotMap;
use thiserror::Error;

/// Horizontal offset applied to duplicated instances so the original and
/// the copy do not overlap visually
pub const DEFAULT_DUPLICATE_OFFSET: f32 = 1.0;

/// Scene mutation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The operation referenced an instance the store does not own
    #[error("instance is not registered in the scene store")]
    InvalidInstance,

    /// Template resolution failed
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// The mutable set of placed instances plus the current environment
pub struct SceneStore {
    instances: SlotMap<InstanceKey, Instance>,
    parts: SlotMap<PartKey, SubPart>,
    /// Registration order, the deterministic traversal order for export
    order: Vec<InstanceKey>,
    environment: EnvironmentParams,
    duplicate_offset: f32,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(DEFAULT_DUPLICATE_OFFSET)
    }
}

impl SceneStore {
    /// Create an empty store with the given duplicate offset
    pub fn new(duplicate_offset: f32) -> Self {
        Self {
            instances: SlotMap::with_key(),
            parts: SlotMap::with_key(),
            order: Vec::new(),
            environment: EnvironmentParams::default(),
            duplicate_offset,
        }
    }

    /// Place a new instance of a template at the given transform
    ///
    /// This is the commit phase of placement; resolving the template is
    /// the cache's asynchronous job and happens before this call, so a
    /// scene clear between the two phases is well-defined. Every
    /// renderable part is tagged selectable with a back-reference to the
    /// new instance and uploaded to the backend.
    pub fn place(
        &mut self,
        backend: &mut dyn RenderBackend,
        template: &Template,
        transform: Transform,
    ) -> InstanceKey {
        let key = self.instances.insert(Instance {
            name: template.name.clone(),
            template: template.name.clone(),
            transform,
            parts: Vec::with_capacity(template.parts.len()),
        });

        for template_part in &template.parts {
            let part_key = self.parts.insert(SubPart {
                owner: key,
                mesh: template_part.mesh.clone(),
                materials: template_part.materials.clone(),
                selectable: true,
                cast_shadow: true,
                receive_shadow: true,
            });
            self.instances[key].parts.push(part_key);
            backend.upload_part(part_key, &self.parts[part_key]);
        }

        self.order.push(key);
        log::debug!(
            "placed {:?} ({} parts) at {:?}",
            template.name,
            template.parts.len(),
            self.instances[key].transform.position
        );
        key
    }

    /// Place a new instance at the origin with identity orientation and
    /// unit scale
    pub fn place_default(
        &mut self,
        backend: &mut dyn RenderBackend,
        template: &Template,
    ) -> InstanceKey {
        self.place(backend, template, Transform::identity())
    }

    /// Remove an instance and release its backend resources
    ///
    /// Returns `false` without effect when the instance is not currently
    /// registered; removal never fails.
    pub fn remove(&mut self, backend: &mut dyn RenderBackend, key: InstanceKey) -> bool {
        let Some(instance) = self.instances.remove(key) else {
            return false;
        };

        for part_key in instance.parts {
            if self.parts.remove(part_key).is_some() {
                backend.release_part(part_key);
            }
        }
        self.order.retain(|registered| *registered != key);
        log::debug!("removed instance {:?}", instance.name);
        true
    }

    /// Duplicate an instance, preserving per-instance customization
    ///
    /// The clone is offset along x by the configured duplicate offset so
    /// the original and the copy stay visually distinguishable. Cloning
    /// copies the instance, not its template, so a renamed display name
    /// survives.
    pub fn duplicate(
        &mut self,
        backend: &mut dyn RenderBackend,
        key: InstanceKey,
    ) -> Result<InstanceKey, SceneError> {
        let source = self.instances.get(key).ok_or(SceneError::InvalidInstance)?;

        let mut transform = source.transform.clone();
        transform.position.x += self.duplicate_offset;

        let cloned_parts: Vec<SubPart> = source
            .parts
            .iter()
            .filter_map(|part_key| self.parts.get(*part_key).cloned())
            .collect();

        let clone_key = self.instances.insert(Instance {
            name: source.name.clone(),
            template: source.template.clone(),
            transform,
            parts: Vec::with_capacity(cloned_parts.len()),
        });

        for mut part in cloned_parts {
            part.owner = clone_key;
            let part_key = self.parts.insert(part);
            self.instances[clone_key].parts.push(part_key);
            backend.upload_part(part_key, &self.parts[part_key]);
        }

        self.order.push(clone_key);
        Ok(clone_key)
    }

    /// Remove every registered instance
    ///
    /// Environment parameters and anything the store never owned (ground
    /// plane, lights) are untouched.
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        let registered: Vec<InstanceKey> = self.order.clone();
        for key in registered {
            self.remove(backend, key);
        }
    }

    /// Owning instance of a selectable sub-part hit by a ray
    ///
    /// Returns `None` for unknown parts and for parts not tagged
    /// selectable. Callers pass the nearest hit of a distance-sorted
    /// intersection list.
    pub fn resolve_hit(&self, part: PartKey) -> Option<InstanceKey> {
        let sub_part = self.parts.get(part)?;
        if !sub_part.selectable {
            return None;
        }
        self.instances.contains_key(sub_part.owner).then_some(sub_part.owner)
    }

    /// Whether the instance is currently registered
    pub fn contains(&self, key: InstanceKey) -> bool {
        self.instances.contains_key(key)
    }

    /// Shared access to an instance
    pub fn instance(&self, key: InstanceKey) -> Option<&Instance> {
        self.instances.get(key)
    }

    /// Mutable access to an instance
    pub fn instance_mut(&mut self, key: InstanceKey) -> Option<&mut Instance> {
        self.instances.get_mut(key)
    }

    /// Shared access to a sub-part
    pub fn part(&self, key: PartKey) -> Option<&SubPart> {
        self.parts.get(key)
    }

    /// Mutable access to a sub-part
    pub fn part_mut(&mut self, key: PartKey) -> Option<&mut SubPart> {
        self.parts.get_mut(key)
    }

    /// Number of registered instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Number of live sub-parts across all instances
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Instances in registration order
    pub fn iter_ordered(&self) -> impl Iterator<Item = (InstanceKey, &Instance)> {
        self.order
            .iter()
            .filter_map(|key| self.instances.get(*key).map(|instance| (*key, instance)))
    }

    /// Current environment parameters
    pub fn environment(&self) -> &EnvironmentParams {
        &self.environment
    }

    /// Mutable environment parameters
    pub fn environment_mut(&mut self) -> &mut EnvironmentParams {
        &mut self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{MeshData, TemplatePart};
    use crate::foundation::math::Vec3;
    use crate::render::HeadlessBackend;
    use crate::scene::{Material, PartMaterials};
    use std::sync::Arc;

    fn template(name: &str, part_count: usize) -> Template {
        let parts = (0..part_count)
            .map(|i| TemplatePart {
                mesh: Arc::new(MeshData {
                    label: format!("{name}_{i}"),
                    vertex_count: 24,
                    triangle_count: 12,
                    bounding_radius: 1.0,
                }),
                materials: PartMaterials::Single(Material::default()),
            })
            .collect();
        Template {
            name: name.to_string(),
            parts,
        }
    }

    #[test]
    fn test_place_then_remove_restores_counts() {
        let mut store = SceneStore::default();
        let mut backend = HeadlessBackend::new();
        let oak = template("oak1", 2);

        let key = store.place_default(&mut backend, &oak);
        assert_eq!(store.instance_count(), 1);
        assert_eq!(store.part_count(), 2);
        assert_eq!(backend.resident_parts(), 2);

        assert!(store.remove(&mut backend, key));
        assert_eq!(store.instance_count(), 0);
        assert_eq!(store.part_count(), 0, "no leaked sub-part tags");
        assert_eq!(backend.resident_parts(), 0, "backend resources released");
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = SceneStore::default();
        let mut backend = HeadlessBackend::new();
        let key = store.place_default(&mut backend, &template("oak1", 1));
        assert!(store.remove(&mut backend, key));
        assert!(!store.remove(&mut backend, key), "second remove is a no-op");
    }

    #[test]
    fn test_duplicate_offsets_x_and_preserves_rename() {
        let mut store = SceneStore::default();
        let mut backend = HeadlessBackend::new();
        let key = store.place(
            &mut backend,
            &template("oak1", 1),
            Transform::from_position(Vec3::new(2.0, 0.0, -4.0)),
        );
        store.instance_mut(key).unwrap().name = "my favourite oak".to_string();

        let clone = store.duplicate(&mut backend, key).unwrap();

        assert_eq!(store.instance_count(), 2);
        let cloned = store.instance(clone).unwrap();
        assert_eq!(cloned.name, "my favourite oak");
        assert_eq!(cloned.template, "oak1");
        assert_eq!(
            cloned.transform.position,
            Vec3::new(2.0 + DEFAULT_DUPLICATE_OFFSET, 0.0, -4.0)
        );
        // Both are selectable through their sub-parts
        let original_part = store.instance(key).unwrap().parts[0];
        let clone_part = cloned.parts[0];
        assert_eq!(store.resolve_hit(original_part), Some(key));
        assert_eq!(store.resolve_hit(clone_part), Some(clone));
    }

    #[test]
    fn test_duplicate_unowned_fails() {
        let mut store = SceneStore::default();
        let mut backend = HeadlessBackend::new();
        let key = store.place_default(&mut backend, &template("oak1", 1));
        store.remove(&mut backend, key);

        assert_eq!(
            store.duplicate(&mut backend, key),
            Err(SceneError::InvalidInstance)
        );
    }

    #[test]
    fn test_degenerate_template_places_but_cannot_be_picked() {
        let mut store = SceneStore::default();
        let mut backend = HeadlessBackend::new();
        let key = store.place_default(&mut backend, &template("empty", 0));

        assert!(store.contains(key));
        assert_eq!(store.part_count(), 0);
        // Still duplicable
        let clone = store.duplicate(&mut backend, key).unwrap();
        assert!(store.contains(clone));
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = SceneStore::default();
        let mut backend = HeadlessBackend::new();
        store.place_default(&mut backend, &template("oak1", 1));
        store.place_default(&mut backend, &template("birch1", 3));

        store.clear(&mut backend);

        assert_eq!(store.instance_count(), 0);
        assert_eq!(store.part_count(), 0);
        assert_eq!(backend.resident_parts(), 0);
    }

    #[test]
    fn test_iter_ordered_follows_registration_order() {
        let mut store = SceneStore::default();
        let mut backend = HeadlessBackend::new();
        let a = store.place_default(&mut backend, &template("oak1", 1));
        let b = store.place_default(&mut backend, &template("birch1", 1));
        let c = store.place_default(&mut backend, &template("pine1", 1));
        store.remove(&mut backend, b);

        let names: Vec<&str> = store
            .iter_ordered()
            .map(|(_, instance)| instance.name.as_str())
            .collect();
        assert_eq!(names, vec!["oak1", "pine1"]);
        assert_eq!(
            store.iter_ordered().map(|(key, _)| key).collect::<Vec<_>>(),
            vec![a, c]
        );
    }

    #[test]
    fn test_resolve_hit_ignores_unselectable_parts() {
        let mut store = SceneStore::default();
        let mut backend = HeadlessBackend::new();
        let key = store.place_default(&mut backend, &template("stone1", 1));
        let part = store.instance(key).unwrap().parts[0];

        store.part_mut(part).unwrap().selectable = false;
        assert_eq!(store.resolve_hit(part), None);
    }
}
