//! Placed instances and their renderable sub-parts

use super::material::PartMaterials;
use crate::assets::MeshData;
use crate::foundation::math::Transform;
use slotmap::new_key_type;
use std::sync::Arc;

new_key_type! {
    /// Opaque handle of a placed instance
    pub struct InstanceKey;

    /// Opaque handle of a renderable sub-part
    pub struct PartKey;
}

/// A placed, user-visible object
///
/// Created by placement, duplication, or scene import; destroyed by
/// explicit deletion or scene clear. The sub-part keys index into the
/// store's part table; an instance with zero parts is valid but cannot
/// be picked with the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Display name, defaults to the template name
    pub name: String,

    /// Name of the template this instance was derived from
    pub template: String,

    /// World transform
    pub transform: Transform,

    /// Owned sub-parts, in template order
    pub parts: Vec<PartKey>,
}

/// A renderable piece of an instance, eligible for pointer picking
#[derive(Debug, Clone, PartialEq)]
pub struct SubPart {
    /// Back-reference to the owning instance
    pub owner: InstanceKey,

    /// Shared, read-only geometry
    pub mesh: Arc<MeshData>,

    /// Current materials; swapped for the highlight while selected
    pub materials: PartMaterials,

    /// Whether the pointer can pick this part
    pub selectable: bool,

    /// Whether the part casts shadows
    pub cast_shadow: bool,

    /// Whether the part receives shadows
    pub receive_shadow: bool,
}
