//! Single-selection controller
//!
//! Tracks at most one selected instance. Selecting swaps the hit
//! sub-part's materials for the highlight material while keeping a
//! verbatim copy of the originals, so deselection restores exactly what
//! was there, including per-instance edits made while selected was
//! another object's state.

use crate::codec::{self, MalformedTransform, VEC3_ARITY};
use crate::foundation::math::Vec3;
use crate::scene::{InstanceKey, Material, PartKey, PartMaterials, SceneStore};

/// Which transform component a panel edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformField {
    /// World-space position, three components
    Position,
    /// Rotation as Euler angles in radians, three components
    Rotation,
    /// Non-uniform scale, three components
    Scale,
}

/// Snapshot of the selected instance for display in a parameter panel
///
/// All fields are pre-formatted strings rounded to two decimals; the
/// panel shows values, it does not own them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionInfo {
    /// Display name of the instance
    pub name: String,
    /// Position as "x, y, z"
    pub position: String,
    /// Rotation as Euler angles "x, y, z"
    pub rotation: String,
    /// Scale as "x, y, z"
    pub scale: String,
}

/// Receiver for selection lifecycle notifications
///
/// `None` means the selection was cleared and the panel should empty
/// itself.
pub trait SelectionPanel {
    /// The selection changed or its displayed values were refreshed
    fn selection_changed(&mut self, info: Option<&SelectionInfo>);
}

enum State {
    Idle,
    Selected {
        instance: InstanceKey,
        part: PartKey,
        saved: PartMaterials,
    },
}

/// Controller enforcing the single-selection invariant
pub struct SelectionController {
    state: State,
    highlight: Material,
    panel: Box<dyn SelectionPanel>,
}

impl SelectionController {
    /// Create an idle controller with the given highlight material
    pub fn new(highlight: Material, panel: Box<dyn SelectionPanel>) -> Self {
        Self {
            state: State::Idle,
            highlight,
            panel,
        }
    }

    /// Currently selected instance and its hit sub-part, if any
    pub fn selected(&self) -> Option<(InstanceKey, PartKey)> {
        match &self.state {
            State::Idle => None,
            State::Selected { instance, part, .. } => Some((*instance, *part)),
        }
    }

    /// Select an instance through one of its sub-parts
    ///
    /// Re-selecting the exact same sub-part is a no-op. Selecting a
    /// different one first restores the previous selection's materials,
    /// then saves and highlights the new sub-part.
    pub fn select(&mut self, store: &mut SceneStore, instance: InstanceKey, part: PartKey) {
        if let State::Selected {
            instance: current,
            part: current_part,
            ..
        } = &self.state
        {
            if *current == instance && *current_part == part {
                return;
            }
        }
        self.restore(store);

        let Some(sub_part) = store.part_mut(part) else {
            log::warn!("select on a sub-part that is no longer live");
            self.state = State::Idle;
            self.panel.selection_changed(None);
            return;
        };
        let saved = sub_part.materials.clone();
        sub_part.materials = saved.filled_with(&self.highlight);
        self.state = State::Selected {
            instance,
            part,
            saved,
        };

        let info = self.describe(store);
        self.panel.selection_changed(info.as_ref());
    }

    /// Clear the selection, restoring the saved materials
    ///
    /// A no-op without a panel notification when nothing is selected.
    pub fn deselect(&mut self, store: &mut SceneStore) {
        if matches!(self.state, State::Idle) {
            return;
        }
        self.restore(store);
        self.state = State::Idle;
        self.panel.selection_changed(None);
    }

    /// The given instance left the scene
    ///
    /// If it was the selection, the state is cleared without touching any
    /// materials; the sub-part is gone and there is nothing to restore.
    pub fn notice_removed(&mut self, instance: InstanceKey) {
        if let State::Selected {
            instance: current, ..
        } = &self.state
        {
            if *current == instance {
                self.state = State::Idle;
                self.panel.selection_changed(None);
            }
        }
    }

    /// Apply a textual transform edit from the panel to the selection
    ///
    /// All three fields take three components; rotation is interpreted as
    /// Euler angles in radians. Malformed input is rejected whole, the
    /// instance keeps its previous value and the panel is not refreshed.
    pub fn apply_transform_edit(
        &mut self,
        store: &mut SceneStore,
        field: TransformField,
        text: &str,
    ) -> Result<(), MalformedTransform> {
        let Some((instance, _)) = self.selected() else {
            return Ok(());
        };
        let values = codec::decode(text, VEC3_ARITY).map_err(|err| {
            log::debug!("rejected transform edit {text:?}: {err}");
            err
        })?;
        if let Some(instance) = store.instance_mut(instance) {
            match field {
                TransformField::Position => {
                    instance.transform.position = Vec3::new(values[0], values[1], values[2]);
                }
                TransformField::Rotation => {
                    instance
                        .transform
                        .set_euler_angles(values[0], values[1], values[2]);
                }
                TransformField::Scale => {
                    instance.transform.scale = Vec3::new(values[0], values[1], values[2]);
                }
            }
        }
        Ok(())
    }

    /// Drag the selection to a new ground target, keeping its height
    pub fn move_pointer_target(&mut self, store: &mut SceneStore, target: Vec3) {
        let Some((key, _)) = self.selected() else {
            return;
        };
        if let Some(instance) = store.instance_mut(key) {
            let y = instance.transform.position.y;
            instance.transform.position = Vec3::new(target.x, y, target.z);
        }
        let info = self.describe(store);
        self.panel.selection_changed(info.as_ref());
    }

    /// Rename the selected instance
    pub fn rename(&mut self, store: &mut SceneStore, name: &str) {
        let Some((key, _)) = self.selected() else {
            return;
        };
        if let Some(instance) = store.instance_mut(key) {
            instance.name = name.to_string();
        }
        let info = self.describe(store);
        self.panel.selection_changed(info.as_ref());
    }

    /// Panel snapshot of the current selection
    pub fn describe(&self, store: &SceneStore) -> Option<SelectionInfo> {
        let (key, _) = self.selected()?;
        let instance = store.instance(key)?;
        Some(SelectionInfo {
            name: instance.name.clone(),
            position: codec::display_vec3(&instance.transform.position),
            rotation: codec::display_euler(instance.transform.euler_angles()),
            scale: codec::display_vec3(&instance.transform.scale),
        })
    }

    fn restore(&mut self, store: &mut SceneStore) {
        if let State::Selected { part, saved, .. } = &self.state {
            if let Some(sub_part) = store.part_mut(*part) {
                sub_part.materials = saved.clone();
            }
        }
    }
}
