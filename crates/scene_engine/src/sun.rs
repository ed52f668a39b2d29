//! Deterministic sun orbit
//!
//! The sun follows an elliptical orbit around the world origin, driven
//! purely by elapsed time. The model is a pure function of the current
//! angle and the orbit parameters, so replaying the same deltas always
//! produces the same lighting.

use crate::foundation::math::constants::{QUARTER_PI, TAU};
use crate::foundation::math::Vec3;

/// Orbit and lighting parameters, adjustable at runtime
#[derive(Debug, Clone, PartialEq)]
pub struct SunParams {
    /// Light intensity
    pub intensity: f32,
    /// Orbit radius along the x axis
    pub radius_x: f32,
    /// Orbit radius along the z axis
    pub radius_z: f32,
    /// Orbit height above the ground plane
    pub height: f32,
    /// Angular speed in radians per second
    pub speed: f32,
    /// Light color as linear RGB
    pub color: [f32; 3],
}

impl Default for SunParams {
    fn default() -> Self {
        Self {
            intensity: 1.5,
            radius_x: 60.0,
            radius_z: 60.0,
            height: 40.0,
            speed: 0.1,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Mutable orbit state, just the current angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunState {
    /// Current orbit angle in radians, kept in `[0, 2π)`
    pub angle: f32,
}

impl Default for SunState {
    fn default() -> Self {
        Self { angle: QUARTER_PI }
    }
}

/// Directional light derived from the orbit
#[derive(Debug, Clone, PartialEq)]
pub struct SunLight {
    /// World-space light position
    pub position: Vec3,
    /// Point the light looks at, always the world origin
    pub target: Vec3,
    /// Light intensity
    pub intensity: f32,
    /// Light color as linear RGB
    pub color: [f32; 3],
}

/// Advance the orbit by `delta` seconds and derive the light
///
/// The angle only moves for a positive delta and a nonzero speed; a
/// zero delta recomputes the light for the current angle, which is how
/// parameter edits take effect immediately while paused.
pub fn orbit(angle: f32, delta: f32, params: &SunParams) -> (f32, SunLight) {
    let angle = if delta > 0.0 && params.speed != 0.0 {
        (angle + params.speed * delta).rem_euclid(TAU)
    } else {
        angle
    };
    let light = SunLight {
        position: Vec3::new(
            params.radius_x * angle.cos(),
            params.height,
            params.radius_z * angle.sin(),
        ),
        target: Vec3::zeros(),
        intensity: params.intensity,
        color: params.color,
    };
    (angle, light)
}

impl SunState {
    /// Advance this state in place, returning the derived light
    pub fn advance(&mut self, delta: f32, params: &SunParams) -> SunLight {
        let (angle, light) = orbit(self.angle, delta, params);
        self.angle = angle;
        light
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_angle_and_position() {
        let params = SunParams::default();
        let mut state = SunState::default();
        let light = state.advance(0.0, &params);

        assert_relative_eq!(state.angle, QUARTER_PI, epsilon = 1e-6);
        assert_relative_eq!(light.position.x, 60.0 * QUARTER_PI.cos(), epsilon = 1e-4);
        assert_relative_eq!(light.position.y, 40.0, epsilon = 1e-6);
        assert_relative_eq!(light.position.z, 60.0 * QUARTER_PI.sin(), epsilon = 1e-4);
        assert_eq!(light.target, Vec3::zeros());
    }

    #[test]
    fn test_zero_speed_freezes_the_orbit() {
        let params = SunParams {
            speed: 0.0,
            ..Default::default()
        };
        let mut state = SunState::default();
        for _ in 0..100 {
            state.advance(0.25, &params);
        }
        assert_relative_eq!(state.angle, QUARTER_PI, epsilon = 1e-6);
    }

    #[test]
    fn test_negative_delta_does_not_rewind() {
        let params = SunParams::default();
        let mut state = SunState::default();
        state.advance(-5.0, &params);
        assert_relative_eq!(state.angle, QUARTER_PI, epsilon = 1e-6);
    }

    #[test]
    fn test_full_period_returns_to_start() {
        let params = SunParams::default();
        let mut state = SunState::default();
        let period = TAU / params.speed;
        let steps = 1000;
        for _ in 0..steps {
            state.advance(period / steps as f32, &params);
        }
        // One full orbit in many small steps lands back on the start angle
        assert_relative_eq!(state.angle, QUARTER_PI, epsilon = 1e-2);
    }

    #[test]
    fn test_angle_stays_wrapped() {
        let params = SunParams {
            speed: 10.0,
            ..Default::default()
        };
        let mut state = SunState::default();
        for _ in 0..50 {
            state.advance(1.0, &params);
            assert!((0.0..TAU).contains(&state.angle));
        }
    }

    #[test]
    fn test_replay_is_deterministic() {
        let params = SunParams::default();
        let deltas = [0.016, 0.017, 0.2, 0.016, 1.5];

        let mut a = SunState::default();
        let mut b = SunState::default();
        for delta in deltas {
            a.advance(delta, &params);
        }
        for delta in deltas {
            b.advance(delta, &params);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_parameter_edit_takes_effect_without_time() {
        let params = SunParams {
            height: 80.0,
            intensity: 3.0,
            ..Default::default()
        };
        let (angle, light) = orbit(QUARTER_PI, 0.0, &params);
        assert_relative_eq!(angle, QUARTER_PI, epsilon = 1e-6);
        assert_relative_eq!(light.position.y, 80.0, epsilon = 1e-6);
        assert_relative_eq!(light.intensity, 3.0, epsilon = 1e-6);
    }
}
