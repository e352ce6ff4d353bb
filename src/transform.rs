//! Rigid pose sample (translation / rotation / scale) and its weighted blend.

use serde::{Deserialize, Serialize};

use crate::interp::{lerp_vec3, nlerp_quat};

/// Transform representation for translation, rotation, and scale.
/// Rotation is a quaternion stored as (x, y, z, w).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0, 1.0, 1.0],
    };

    pub fn new(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: [f32; 4]) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(scale: [f32; 3]) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// Weighted blend from `self` toward `other`: component lerp for
    /// translation and scale, shortest-arc NLERP for rotation.
    pub fn interpolate(&self, other: &Transform, weight: f32) -> Transform {
        Transform {
            translation: lerp_vec3(self.translation, other.translation, weight),
            rotation: nlerp_quat(self.rotation, other.rotation, weight),
            scale: lerp_vec3(self.scale, other.scale, weight),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
