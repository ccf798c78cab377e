use std::str::FromStr;

use bevy::prelude::*;
use constants::camera::{
    BUTTON_VERTICAL_STEP, KEYBOARD_VERTICAL_STEP, VERTICAL_NAV_ANIMATION_SECS,
    VERTICAL_NAV_BOTTOM, VERTICAL_NAV_TOP,
};
use serde::{Deserialize, Serialize};

use super::animation::{AnimationCompletion, CameraAnimator};
use super::auto_rotate::AutoRotate;
use super::viewport_camera::OrbitCamera;
use crate::error::ViewerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalDirection {
    Up,
    Down,
    Top,
    Bottom,
}

impl VerticalDirection {
    /// New orbit-target height after moving from `y` by `step`.
    pub fn apply(self, y: f32, step: f32) -> f32 {
        match self {
            Self::Up => y + step,
            Self::Down => y - step,
            Self::Top => VERTICAL_NAV_TOP,
            Self::Bottom => VERTICAL_NAV_BOTTOM,
        }
    }

    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Self::Up),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Self::Down),
            KeyCode::Home => Some(Self::Top),
            KeyCode::End => Some(Self::Bottom),
            _ => None,
        }
    }
}

impl FromStr for VerticalDirection {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ViewerError::UnknownDirection(s.to_string())),
        }
    }
}

/// Button-driven vertical move, animated over a short duration.
#[derive(Event, Debug, Clone, Copy)]
pub struct VerticalNavRequest(pub VerticalDirection);

/// Keyboard moves jump the orbit target immediately.
pub fn keyboard_vertical_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut orbit: ResMut<OrbitCamera>,
    mut animator: ResMut<CameraAnimator>,
    mut auto_rotate: ResMut<AutoRotate>,
) {
    for direction in keyboard
        .get_just_pressed()
        .filter_map(|&key| VerticalDirection::from_key(key))
    {
        animator.cancel();
        auto_rotate.pause();
        orbit.target.y = direction.apply(orbit.target.y, KEYBOARD_VERTICAL_STEP);
    }
}

pub fn handle_vertical_nav_requests(
    mut requests: EventReader<VerticalNavRequest>,
    orbit: Res<OrbitCamera>,
    mut animator: ResMut<CameraAnimator>,
    mut auto_rotate: ResMut<AutoRotate>,
) {
    for VerticalNavRequest(direction) in requests.read() {
        let from = orbit.pose();
        let mut to = from;
        to.target.y = direction.apply(from.target.y, BUTTON_VERTICAL_STEP);
        auto_rotate.pause();
        animator.start(
            from,
            to,
            VERTICAL_NAV_ANIMATION_SECS,
            AnimationCompletion::Nothing,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::animation::{CameraAnimationFinished, drive_camera_animation};
    use std::time::Duration;

    #[test]
    fn directions_step_or_jump() {
        assert_eq!(VerticalDirection::Up.apply(10.0, 20.0), 30.0);
        assert_eq!(VerticalDirection::Down.apply(10.0, 30.0), -20.0);
        assert_eq!(VerticalDirection::Top.apply(10.0, 20.0), VERTICAL_NAV_TOP);
        assert_eq!(VerticalDirection::Bottom.apply(10.0, 20.0), VERTICAL_NAV_BOTTOM);
    }

    #[test]
    fn parses_direction_names() {
        assert_eq!("UP".parse::<VerticalDirection>().ok(), Some(VerticalDirection::Up));
        assert!(matches!(
            "sideways".parse::<VerticalDirection>(),
            Err(ViewerError::UnknownDirection(_))
        ));
    }

    #[test]
    fn button_navigation_animates_target_only() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<OrbitCamera>()
            .init_resource::<CameraAnimator>()
            .init_resource::<AutoRotate>()
            .add_event::<VerticalNavRequest>()
            .add_event::<CameraAnimationFinished>()
            .add_systems(
                Update,
                (handle_vertical_nav_requests, drive_camera_animation).chain(),
            );

        let start = app.world().resource::<OrbitCamera>().pose();
        app.world_mut()
            .send_event(VerticalNavRequest(VerticalDirection::Up));
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(1));
        app.update();

        let orbit = app.world().resource::<OrbitCamera>();
        assert_eq!(orbit.position, start.position);
        assert!((orbit.target.y - (start.target.y + BUTTON_VERTICAL_STEP)).abs() < 1e-3);
        assert!(!app.world().resource::<AutoRotate>().enabled);
    }
}
