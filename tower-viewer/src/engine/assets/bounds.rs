use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds in world coordinates.
/// Used for model recentering, largest-mesh detection and camera framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsData {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundsData {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// World-space bounds of a local `Aabb` placed by `transform`.
    /// All eight corners are transformed so rotated meshes stay enclosed.
    pub fn from_aabb(aabb: &Aabb, transform: &GlobalTransform) -> Self {
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in 0..8 {
            let sign = Vec3::new(
                if corner & 1 == 0 { -1.0 } else { 1.0 },
                if corner & 2 == 0 { -1.0 } else { 1.0 },
                if corner & 4 == 0 { -1.0 } else { 1.0 },
            );
            let world = transform.transform_point(center + half * sign);
            min = min.min(world);
            max = max.max(world);
        }
        Self { min, max }
    }

    /// Union of all bounds, `None` when the iterator is empty.
    pub fn union_all(bounds: impl IntoIterator<Item = BoundsData>) -> Option<Self> {
        bounds.into_iter().reduce(|acc, next| acc.union(&next))
    }

    pub fn union(&self, other: &BoundsData) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Calculate center point for recentering and camera framing.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Calculate size dimensions for radius and framing distance.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn volume(&self) -> f32 {
        let size = self.size();
        size.x * size.y * size.z
    }

    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }
}
