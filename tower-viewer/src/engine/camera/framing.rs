use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use constants::camera::{
    FRAMING_ANIMATION_SECS, FRAMING_DISTANCE_FACTOR, FRAMING_MIN_DISTANCE_FACTOR, FRAMING_OFFSET,
};

use super::animation::{AnimationCompletion, CameraAnimator, CameraPose};
use super::viewport_camera::OrbitCamera;
use crate::engine::assets::bounds::BoundsData;

/// Pose that fits `bounds` in a camera with vertical field of view `fov`.
pub fn frame_bounds(bounds: &BoundsData, fov: f32) -> CameraPose {
    let center = bounds.center();
    let max_dim = bounds.max_dimension();
    let distance = (max_dim / (fov / 2.0).sin()).abs() * FRAMING_DISTANCE_FACTOR;
    let distance = distance.max(max_dim * FRAMING_MIN_DISTANCE_FACTOR);
    CameraPose {
        position: center + FRAMING_OFFSET * distance,
        target: center,
    }
}

/// Animated camera moves toward meshes or back to the start pose.
#[derive(SystemParam)]
pub struct CameraFraming<'w, 's> {
    orbit: Res<'w, OrbitCamera>,
    animator: ResMut<'w, CameraAnimator>,
    mesh_bounds: Query<'w, 's, (&'static Aabb, &'static GlobalTransform)>,
}

impl CameraFraming<'_, '_> {
    /// World-space union of the meshes' bounds; meshes without bounds are skipped.
    pub fn union_bounds(&self, entities: &[Entity]) -> Option<BoundsData> {
        BoundsData::union_all(entities.iter().filter_map(|&entity| {
            self.mesh_bounds
                .get(entity)
                .ok()
                .map(|(aabb, transform)| BoundsData::from_aabb(aabb, transform))
        }))
    }

    /// Animate to frame `entities`; auto-rotation resumes on arrival.
    pub fn frame_meshes(&mut self, entities: &[Entity]) -> bool {
        let Some(bounds) = self.union_bounds(entities) else {
            return false;
        };
        let destination = frame_bounds(&bounds, self.orbit.fov);
        self.animator.start(
            self.orbit.pose(),
            destination,
            FRAMING_ANIMATION_SECS,
            AnimationCompletion::ResumeAutoRotate,
        );
        true
    }

    pub fn return_to_initial(&mut self) {
        self.animator.start(
            self.orbit.pose(),
            CameraPose::INITIAL,
            FRAMING_ANIMATION_SECS,
            AnimationCompletion::ResumeAutoRotate,
        );
    }
}
