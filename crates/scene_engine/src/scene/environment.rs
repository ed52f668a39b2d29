//! Environment parameters
//!
//! The scene-wide backdrop: skybox file, ground texture, and its repeat
//! count. These are the only environment values that persist in exported
//! documents; sun tunables stay UI-local.

/// Current environment settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentParams {
    /// Skybox texture file name; `None` leaves the background unset
    pub skybox_file: Option<String>,

    /// Ground texture name
    pub ground_texture: String,

    /// Ground texture repeat count across the plane
    pub ground_repeats: u32,
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Self {
            skybox_file: Some("DaySkyHDRI019A_2K-TONEMAPPED.jpg".to_string()),
            ground_texture: "aerial_grass_rock".to_string(),
            ground_repeats: 100,
        }
    }
}
