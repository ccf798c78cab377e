//! Viewport camera: orbit controls, animated moves, auto-rotation and compass.
//!
//! The [`OrbitCamera`](viewport_camera::OrbitCamera) resource is the single
//! source of truth for the pose; the camera entity's transform follows it.

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;

/// Cancellable pose interpolation with completion events.
pub mod animation;

/// Idle rotation and its resume timer.
pub mod auto_rotate;

/// Compass heading derived from the camera azimuth.
pub mod compass;

/// Fitting the camera to mesh bounds.
pub mod framing;

/// Arrow/WASD/Home/End and button-driven vertical navigation.
pub mod vertical_nav;

/// Orbit camera resource, mouse controller and camera entity.
pub mod viewport_camera;

pub use animation::{AnimationCompletion, CameraAnimationFinished, CameraAnimator, CameraPose};
pub use auto_rotate::AutoRotate;
pub use compass::CompassHeading;
pub use framing::CameraFraming;
pub use vertical_nav::{VerticalDirection, VerticalNavRequest};
pub use viewport_camera::{OrbitCamera, ViewerCamera};

/// Orders camera work inside a frame: input, then animation, then output.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CameraSet {
    Input,
    Animate,
    Publish,
}

pub struct ViewerCameraPlugin;

impl Plugin for ViewerCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamera>()
            .init_resource::<CameraAnimator>()
            .init_resource::<AutoRotate>()
            .init_resource::<CompassHeading>()
            .add_event::<CameraAnimationFinished>()
            .add_event::<VerticalNavRequest>()
            .configure_sets(
                Update,
                (CameraSet::Input, CameraSet::Animate, CameraSet::Publish).chain(),
            )
            .add_systems(Startup, viewport_camera::spawn_camera)
            .add_systems(
                Update,
                (
                    viewport_camera::camera_controller,
                    vertical_nav::keyboard_vertical_navigation,
                    vertical_nav::handle_vertical_nav_requests,
                )
                    .chain()
                    .in_set(CameraSet::Input)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                (
                    animation::drive_camera_animation,
                    animation::handle_animation_finished,
                    auto_rotate::tick_auto_rotate,
                    auto_rotate::apply_auto_rotate,
                )
                    .chain()
                    .in_set(CameraSet::Animate),
            )
            .add_systems(
                Update,
                (
                    viewport_camera::sync_camera_transform,
                    compass::update_compass,
                    auto_rotate::publish_auto_rotate,
                )
                    .in_set(CameraSet::Publish),
            );
    }
}
