use bevy::prelude::*;
use constants::camera::{INITIAL_CAMERA_POSITION, INITIAL_CAMERA_TARGET};

use super::auto_rotate::AutoRotate;
use super::viewport_camera::OrbitCamera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub const INITIAL: Self = Self {
        position: INITIAL_CAMERA_POSITION,
        target: INITIAL_CAMERA_TARGET,
    };

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

/// What to do once an animation reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCompletion {
    Nothing,
    ResumeAutoRotate,
}

/// Fired when an animation completes. Superseded or cancelled animations never fire.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraAnimationFinished {
    pub generation: u64,
    pub completion: AnimationCompletion,
}

#[derive(Debug, Clone)]
struct ActiveAnimation {
    generation: u64,
    from: CameraPose,
    to: CameraPose,
    duration_secs: f32,
    elapsed_secs: f32,
    completion: AnimationCompletion,
}

/// Single-slot camera animation driver.
///
/// Every start or cancel bumps the generation, so the replaced animation can
/// neither write the pose again nor report completion.
#[derive(Resource, Debug, Default)]
pub struct CameraAnimator {
    generation: u64,
    active: Option<ActiveAnimation>,
}

/// Result of advancing the animator by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    pub pose: CameraPose,
    pub finished: Option<CameraAnimationFinished>,
}

impl CameraAnimator {
    pub fn start(
        &mut self,
        from: CameraPose,
        to: CameraPose,
        duration_secs: f32,
        completion: AnimationCompletion,
    ) -> u64 {
        self.generation += 1;
        self.active = Some(ActiveAnimation {
            generation: self.generation,
            from,
            to,
            duration_secs,
            elapsed_secs: 0.0,
            completion,
        });
        self.generation
    }

    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Destination of the in-flight animation.
    pub fn destination(&self) -> Option<CameraPose> {
        self.active.as_ref().map(|animation| animation.to)
    }

    pub fn step(&mut self, delta_secs: f32) -> Option<AnimationStep> {
        let animation = self.active.as_mut()?;
        animation.elapsed_secs += delta_secs;
        let progress = if animation.duration_secs <= 0.0 {
            1.0
        } else {
            (animation.elapsed_secs / animation.duration_secs).min(1.0)
        };
        let pose = animation
            .from
            .lerp(&animation.to, ease_out_cubic(progress));

        if progress < 1.0 {
            return Some(AnimationStep {
                pose,
                finished: None,
            });
        }

        let finished = self.active.take().map(|done| CameraAnimationFinished {
            generation: done.generation,
            completion: done.completion,
        });
        Some(AnimationStep { pose, finished })
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

pub fn drive_camera_animation(
    time: Res<Time>,
    mut animator: ResMut<CameraAnimator>,
    mut orbit: ResMut<OrbitCamera>,
    mut finished: EventWriter<CameraAnimationFinished>,
) {
    let Some(step) = animator.step(time.delta_secs()) else {
        return;
    };
    orbit.set_pose(step.pose);
    if let Some(event) = step.finished {
        finished.write(event);
    }
}

pub fn handle_animation_finished(
    mut events: EventReader<CameraAnimationFinished>,
    mut auto_rotate: ResMut<AutoRotate>,
) {
    for event in events.read() {
        if event.completion == AnimationCompletion::ResumeAutoRotate {
            auto_rotate.resume();
        }
    }
}
