use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, DOLLY_SENSITIVITY, INITIAL_CAMERA_POSITION,
    INITIAL_CAMERA_TARGET, MAX_POLAR_ANGLE, MIN_POLAR_ANGLE, PAN_SENSITIVITY,
    ROTATE_SENSITIVITY,
};

use super::animation::{CameraAnimator, CameraPose};
use super::auto_rotate::AutoRotate;

/// Marker for the single viewport camera.
#[derive(Component)]
pub struct ViewerCamera;

/// Orbit camera state: the camera at `position` always looks at `target`.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub min_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            position: INITIAL_CAMERA_POSITION,
            target: INITIAL_CAMERA_TARGET,
            fov: CAMERA_FOV_DEGREES.to_radians(),
            min_distance: CAMERA_NEAR,
        }
    }
}

impl OrbitCamera {
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: self.target,
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Orbit around the target. Polar angle is measured from +Y and clamped.
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let azimuth = offset.x.atan2(offset.z) + delta_azimuth;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + delta_polar)
            .clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
        self.position = self.target
            + radius
                * Vec3::new(
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                    polar.sin() * azimuth.cos(),
                );
    }

    /// Spin around the vertical axis through the target, keeping elevation.
    pub fn rotate_azimuth(&mut self, angle: f32) {
        let offset = self.position - self.target;
        self.position = self.target + Quat::from_rotation_y(angle) * offset;
    }

    /// Screen-space pan; moves position and target together.
    pub fn pan(&mut self, screen_delta: Vec2) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        let scale = self.distance() * PAN_SENSITIVITY;
        let shift = (-right * screen_delta.x + up * screen_delta.y) * scale;
        self.position += shift;
        self.target += shift;
    }

    /// Move toward (positive) or away from the target, never closer than `min_distance`.
    pub fn dolly(&mut self, amount: f32) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        let factor = (1.0 - amount * DOLLY_SENSITIVITY).max(0.05);
        let next = (distance * factor).max(self.min_distance);
        self.position = self.target + offset / distance * next;
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, Vec3::Y)
    }
}

pub fn spawn_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: orbit.fov,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.transform(),
        ViewerCamera,
        Name::new("camera:viewport"),
    ));
}

/// Mouse orbit controls. Any interaction pauses auto-rotation and cancels
/// an in-flight camera animation; releasing schedules the auto-rotate resume.
pub fn camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mut animator: ResMut<CameraAnimator>,
    mut auto_rotate: ResMut<AutoRotate>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    const DRAG_BUTTONS: [MouseButton; 3] =
        [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    if mouse_button.any_just_pressed(DRAG_BUTTONS) || scroll_accum.abs() > f32::EPSILON {
        auto_rotate.interaction_started();
        animator.cancel();
    }

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(
                -mouse_delta.x * ROTATE_SENSITIVITY,
                -mouse_delta.y * ROTATE_SENSITIVITY,
            );
        } else if mouse_button.any_pressed([MouseButton::Right, MouseButton::Middle]) {
            orbit.pan(mouse_delta);
        }
    }

    if scroll_accum.abs() > f32::EPSILON {
        orbit.dolly(scroll_accum);
        auto_rotate.interaction_ended();
    }

    if mouse_button.any_just_released(DRAG_BUTTONS) && !mouse_button.any_pressed(DRAG_BUTTONS) {
        auto_rotate.interaction_ended();
    }
}

pub fn sync_camera_transform(
    orbit: Res<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<ViewerCamera>>,
) {
    if !orbit.is_changed() {
        return;
    }
    for mut transform in &mut cameras {
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_keeps_distance_and_clamps_polar() {
        let mut orbit = OrbitCamera {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            ..default()
        };
        orbit.rotate(0.5, -10.0);
        assert!((orbit.distance() - 10.0).abs() < 1e-3);
        let polar = (orbit.position.y / orbit.distance()).acos();
        assert!((polar - MIN_POLAR_ANGLE).abs() < 1e-4);
    }

    #[test]
    fn dolly_respects_min_distance() {
        let mut orbit = OrbitCamera {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            min_distance: 8.0,
            ..default()
        };
        orbit.dolly(100.0);
        assert!((orbit.distance() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_position_and_target_together() {
        let mut orbit = OrbitCamera::default();
        let before = orbit.position - orbit.target;
        orbit.pan(Vec2::new(12.0, -4.0));
        let after = orbit.position - orbit.target;
        assert!((before - after).length() < 1e-3);
        assert_ne!(orbit.target, INITIAL_CAMERA_TARGET);
    }

    #[test]
    fn azimuth_rotation_keeps_elevation() {
        let mut orbit = OrbitCamera::default();
        let height = orbit.position.y;
        orbit.rotate_azimuth(1.0);
        assert!((orbit.position.y - height).abs() < 1e-3);
    }
}
