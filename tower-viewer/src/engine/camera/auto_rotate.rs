use std::f32::consts::TAU;
use std::time::Duration;

use bevy::prelude::*;
use constants::camera::{AUTO_ROTATE_RESUME_SECS, AUTO_ROTATE_SPEED};
use serde_json::json;

use super::animation::CameraAnimator;
use super::viewport_camera::OrbitCamera;
use crate::rpc::web_rpc::WebRpcInterface;

/// Idle spin around the model, paused while the user drives the camera.
#[derive(Resource, Debug)]
pub struct AutoRotate {
    pub enabled: bool,
    resume_timer: Option<Timer>,
}

impl Default for AutoRotate {
    fn default() -> Self {
        Self {
            enabled: true,
            resume_timer: None,
        }
    }
}

impl AutoRotate {
    pub fn paused() -> Self {
        Self {
            enabled: false,
            resume_timer: None,
        }
    }

    pub fn interaction_started(&mut self) {
        self.enabled = false;
        self.resume_timer = None;
    }

    /// (Re)arm the single-shot resume timer.
    pub fn interaction_ended(&mut self) {
        self.resume_timer = Some(Timer::from_seconds(
            AUTO_ROTATE_RESUME_SECS,
            TimerMode::Once,
        ));
    }

    /// Stop without scheduling a resume.
    pub fn pause(&mut self) {
        self.enabled = false;
        self.resume_timer = None;
    }

    pub fn resume(&mut self) {
        self.enabled = true;
        self.resume_timer = None;
    }

    pub fn resume_pending(&self) -> bool {
        self.resume_timer.is_some()
    }

    /// Returns true when the resume timer fired during this tick.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.resume_timer.as_mut() else {
            return false;
        };
        if timer.tick(delta).finished() {
            self.resume();
            return true;
        }
        false
    }
}

/// Radians per second; a speed of 1.0 is one revolution per minute.
pub fn auto_rotate_rate() -> f32 {
    TAU / 60.0 * AUTO_ROTATE_SPEED
}

pub fn tick_auto_rotate(time: Res<Time>, mut auto_rotate: ResMut<AutoRotate>) {
    if auto_rotate.resume_pending() && auto_rotate.tick(time.delta()) {
        debug!("Auto-rotate resumed after idle period");
    }
}

pub fn apply_auto_rotate(
    time: Res<Time>,
    auto_rotate: Res<AutoRotate>,
    animator: Res<CameraAnimator>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if !auto_rotate.enabled || animator.is_animating() {
        return;
    }
    orbit.rotate_azimuth(-auto_rotate_rate() * time.delta_secs());
}

pub fn publish_auto_rotate(
    auto_rotate: Res<AutoRotate>,
    mut last_published: Local<Option<bool>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if *last_published == Some(auto_rotate.enabled) {
        return;
    }
    *last_published = Some(auto_rotate.enabled);
    rpc_interface.send_notification(
        "auto_rotate_changed",
        json!({ "enabled": auto_rotate.enabled }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resumes_after_idle_delay() {
        let mut auto_rotate = AutoRotate::default();
        auto_rotate.interaction_started();
        assert!(!auto_rotate.enabled);

        auto_rotate.interaction_ended();
        assert!(!auto_rotate.tick(Duration::from_secs(3)));
        assert!(!auto_rotate.enabled);
        assert!(auto_rotate.tick(Duration::from_secs(2)));
        assert!(auto_rotate.enabled);
    }

    #[test]
    fn new_interaction_resets_timer() {
        let mut auto_rotate = AutoRotate::default();
        auto_rotate.interaction_started();
        auto_rotate.interaction_ended();
        auto_rotate.tick(Duration::from_secs(4));

        auto_rotate.interaction_started();
        auto_rotate.interaction_ended();
        assert!(!auto_rotate.tick(Duration::from_secs(4)));
        assert!(!auto_rotate.enabled);
        assert!(auto_rotate.tick(Duration::from_secs(1)));
    }

    #[test]
    fn pause_does_not_schedule_resume() {
        let mut auto_rotate = AutoRotate::default();
        auto_rotate.interaction_ended();
        auto_rotate.pause();
        assert!(!auto_rotate.tick(Duration::from_secs(60)));
        assert!(!auto_rotate.enabled);
    }
}
