//! Editor configuration
//!
//! Plain data with sensible defaults; host applications override fields
//! as needed before constructing a session.

use crate::scene::Material;

/// Static editor configuration
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Model templates offered by the placement menu
    pub available_models: Vec<String>,

    /// Ground texture sets offered by the environment menu
    pub ground_textures: Vec<String>,

    /// Skybox image files offered by the environment menu
    pub skybox_files: Vec<String>,

    /// X offset applied to duplicated instances
    pub duplicate_offset: f32,

    /// Distance ahead of the camera at which new models spawn
    pub spawn_distance: f32,

    /// Material swapped onto the selected sub-part
    pub highlight: Material,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            available_models: [
                "birch1", "bush1", "bush2", "flowers1", "grass1", "log1", "oak1", "oak2",
                "oak3", "pine1", "spruce1", "stone1", "stone2", "stump1",
            ]
            .map(String::from)
            .to_vec(),
            ground_textures: [
                "aerial_grass_rock",
                "brown_mud_leaves_01",
                "forest_floor",
                "forrest_ground_01",
                "gravelly_sand",
            ]
            .map(String::from)
            .to_vec(),
            skybox_files: [
                "DaySkyHDRI019A_2K-TONEMAPPED.jpg",
                "DaySkyHDRI050A_2K-TONEMAPPED.jpg",
                "NightSkyHDRI009_2K-TONEMAPPED.jpg",
            ]
            .map(String::from)
            .to_vec(),
            duplicate_offset: 1.0,
            spawn_distance: 10.0,
            highlight: Material::highlight(),
        }
    }
}

/// Camera integration parameters
///
/// The session never moves the camera itself; the host's controller
/// reads these to decide how input maps to navigation. WASD movement
/// starts disabled and is opted into from the panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraParams {
    /// Whether WASD keys translate the camera
    pub wasd_movement: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_the_stock_catalog() {
        let config = EditorConfig::default();
        assert_eq!(config.available_models.len(), 14);
        assert_eq!(config.ground_textures.len(), 5);
        assert_eq!(config.skybox_files.len(), 3);
        assert!(config.available_models.contains(&"oak1".to_string()));
        assert_eq!(config.duplicate_offset, 1.0);
        assert_eq!(config.spawn_distance, 10.0);
    }
}
