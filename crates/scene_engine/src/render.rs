//! Render backend contract
//!
//! The editing core never talks to a graphics API directly. It hands
//! per-part upload and release notifications plus ray queries to whatever
//! backend the host application plugs in. [`HeadlessBackend`] is the
//! no-graphics implementation used by tests and batch tooling.

use crate::foundation::math::Ray;
use crate::scene::{PartKey, SubPart};
use std::collections::HashSet;

/// A single ray intersection against a resident sub-part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The sub-part the ray struck
    pub part: PartKey,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
}

/// Host-provided rendering integration
///
/// Implementations own GPU-side state keyed by [`PartKey`]. `ray_cast`
/// must return hits sorted by ascending distance; the picking path takes
/// the nearest resolvable hit.
pub trait RenderBackend {
    /// A sub-part entered the scene and needs GPU resources
    fn upload_part(&mut self, key: PartKey, part: &SubPart);

    /// A sub-part left the scene; its GPU resources can be reclaimed
    fn release_part(&mut self, key: PartKey);

    /// Intersect a ray against all resident sub-parts
    fn ray_cast(&self, ray: &Ray) -> Vec<RayHit>;
}

/// Backend that tracks residency without owning any graphics state
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    resident: HashSet<PartKey>,
}

impl HeadlessBackend {
    /// Create an empty headless backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently resident sub-parts
    pub fn resident_parts(&self) -> usize {
        self.resident.len()
    }

    /// Whether a specific sub-part is resident
    pub fn is_resident(&self, key: PartKey) -> bool {
        self.resident.contains(&key)
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload_part(&mut self, key: PartKey, _part: &SubPart) {
        self.resident.insert(key);
    }

    fn release_part(&mut self, key: PartKey) {
        self.resident.remove(&key);
    }

    fn ray_cast(&self, _ray: &Ray) -> Vec<RayHit> {
        // No geometry without a GPU, so nothing to hit
        Vec::new()
    }
}
