//! Plain-data materials
//!
//! Materials are CPU-side parameter records; GPU representation is the
//! render backend's concern. Keeping them plain data lets the selection
//! controller capture and restore them bit-for-bit.

/// Surface material parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name for diagnostics
    pub name: String,

    /// RGBA base color
    pub base_color: [f32; 4],

    /// Metallic factor, 0.0 to 1.0
    pub metallic: f32,

    /// Roughness factor, 0.0 to 1.0
    pub roughness: f32,

    /// RGB emissive color
    pub emissive: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.0, 0.0, 0.0],
        }
    }
}

impl Material {
    /// Create a material with the given name and base color
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic,
            roughness,
            emissive: [0.0, 0.0, 0.0],
        }
    }

    /// The selection highlight: yellow with a faint emissive tint
    pub fn highlight() -> Self {
        Self {
            name: "selection_highlight".to_string(),
            base_color: [1.0, 1.0, 0.0, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.133, 0.133, 0.0],
        }
    }
}

/// Materials carried by one sub-part
///
/// Source models may assign either a single material or an array of
/// materials per mesh. The distinction is preserved so that selection
/// capture and restore reproduces exactly what was there before.
#[derive(Debug, Clone, PartialEq)]
pub enum PartMaterials {
    /// One material for the whole sub-part
    Single(Material),

    /// One material per primitive group
    Array(Vec<Material>),
}

impl PartMaterials {
    /// Replace every slot with the given material, preserving the shape
    ///
    /// An array of n materials becomes an array of n highlight copies,
    /// not a single material; the restore path depends on the shape
    /// staying intact.
    pub fn filled_with(&self, material: &Material) -> Self {
        match self {
            Self::Single(_) => Self::Single(material.clone()),
            Self::Array(existing) => Self::Array(vec![material.clone(); existing.len()]),
        }
    }

    /// Number of material slots
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Array(materials) => materials.len(),
        }
    }

    /// Whether the part carries no materials at all
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Array(materials) if materials.is_empty())
    }
}
