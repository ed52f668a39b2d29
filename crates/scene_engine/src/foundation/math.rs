//! Math utilities and types
//!
//! Provides the fundamental math types used by the editing core. All
//! coordinates are Y-up right-handed; the ground lives in the y = 0 plane.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,

    /// Rotation as a unit quaternion
    pub rotation: Quat,

    /// Non-uniform scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Rotation as intrinsic Euler angles in radians, (x, y, z) order
    ///
    /// Used by the selection panel, which displays and edits rotation as
    /// three angles rather than quaternion components.
    pub fn euler_angles(&self) -> (f32, f32, f32) {
        self.rotation.euler_angles()
    }

    /// Set rotation from intrinsic Euler angles in radians, (x, y, z) order
    pub fn set_euler_angles(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler_angles(x, y, z);
    }
}

/// A ray in world space, used for picking and ground-plane placement
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,

    /// Ray direction, expected to be normalized
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the ground plane (y = 0)
    ///
    /// Returns `None` when the ray is parallel to the plane or the
    /// intersection lies behind the origin.
    pub fn intersect_ground_plane(&self) -> Option<Vec3> {
        if self.direction.y.abs() < f32::EPSILON {
            return None;
        }
        let t = -self.origin.y / self.direction.y;
        if t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi, one full orbit
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_transform_identity() {
        let transform = Transform::identity();

        assert_eq!(transform.position, Vec3::zeros());
        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = EPSILON);
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_euler_round_trip() {
        let mut transform = Transform::identity();
        transform.set_euler_angles(0.3, -1.1, 0.7);
        let (x, y, z) = transform.euler_angles();

        assert_relative_eq!(x, 0.3, epsilon = 1e-4);
        assert_relative_eq!(y, -1.1, epsilon = 1e-4);
        assert_relative_eq!(z, 0.7, epsilon = 1e-4);
    }

    #[test]
    fn test_ground_plane_intersection() {
        // Ray looking down from above hits the plane under its origin offset
        let ray = Ray::new(Vec3::new(2.0, 10.0, -3.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = ray.intersect_ground_plane().expect("downward ray hits ground");
        assert_relative_eq!(hit, Vec3::new(2.0, 0.0, -3.0), epsilon = EPSILON);

        // Parallel ray never intersects
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(ray.intersect_ground_plane().is_none());

        // Upward ray intersects behind the origin
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(ray.intersect_ground_plane().is_none());
    }

    #[test]
    fn test_slanted_ground_intersection() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let hit = ray.intersect_ground_plane().expect("slanted ray hits ground");
        assert_relative_eq!(hit, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_transform_matrix_translation() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.to_matrix();
        let origin = matrix.transform_point(&nalgebra::Point3::origin());

        assert_relative_eq!(origin.coords, Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }
}
