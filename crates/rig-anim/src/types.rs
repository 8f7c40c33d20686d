//! Common types for the rig animation system

use std::collections::BTreeMap;

use glam::{Mat4, Vec3};

/// Euler rotation in degrees, applied X then Y then Z
pub type Rotation = Vec3;

/// Per-bone rotation set produced by sampling a clip
///
/// Keyed by bone name; ordered so iteration (and therefore write-through to
/// the skeleton) is deterministic.
pub type Pose = BTreeMap<String, Rotation>;

/// Reference frame cadence (seconds)
pub const DEFAULT_TICK: f32 = 1.0 / 60.0;

/// Trait for types that can be linearly interpolated
pub trait Lerp: Clone {
    /// Linear interpolation between self and other
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    // Weighted form: exact at both endpoints and never overflows between
    // finite inputs.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Lerp for Vec3 {
    // Component-wise ramp. Angles are not wrapped: a 0 -> 360 key is a full turn.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            Lerp::lerp(&self.x, &other.x, t),
            Lerp::lerp(&self.y, &other.y, t),
            Lerp::lerp(&self.z, &other.z, t),
        )
    }
}

/// Build the local rotation matrix for an Euler rotation in degrees
pub fn rotation_matrix(rotation: Rotation) -> Mat4 {
    Mat4::from_rotation_x(rotation.x.to_radians())
        * Mat4::from_rotation_y(rotation.y.to_radians())
        * Mat4::from_rotation_z(rotation.z.to_radians())
}

/// Local bone transform: translate, rotate (X, Y, Z), then scale
pub fn local_transform(position: Vec3, rotation: Rotation, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position) * rotation_matrix(rotation) * Mat4::from_scale(scale)
}
