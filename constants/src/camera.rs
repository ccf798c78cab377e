use bevy::math::Vec3;

/// Camera position applied on every mount.
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(454.01, -28.79, 874.75);

/// Orbit target applied on every mount.
pub const INITIAL_CAMERA_TARGET: Vec3 = Vec3::new(12.01, -59.59, 0.0);

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 42.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 20_000.0;

/// Duration of reset and filter framing transitions.
pub const FRAMING_ANIMATION_SECS: f32 = 2.0;

/// Duration of button-driven vertical navigation.
pub const VERTICAL_NAV_ANIMATION_SECS: f32 = 0.5;

/// OrbitControls-style auto-rotate speed: one revolution every `60 / speed` seconds.
pub const AUTO_ROTATE_SPEED: f32 = 0.5;

/// Inactivity delay before auto-rotation resumes after user interaction.
pub const AUTO_ROTATE_RESUME_SECS: f32 = 5.0;

/// Minimum compass change (degrees) before a new heading is published.
pub const COMPASS_PUBLISH_THRESHOLD_DEGREES: f32 = 0.5;

/// Keyboard vertical navigation step.
pub const KEYBOARD_VERTICAL_STEP: f32 = 20.0;

/// Button vertical navigation step.
pub const BUTTON_VERTICAL_STEP: f32 = 30.0;

/// Approximate top floor target height.
pub const VERTICAL_NAV_TOP: f32 = 200.0;

/// Ground level target height.
pub const VERTICAL_NAV_BOTTOM: f32 = -400.0;

pub const MIN_POLAR_ANGLE: f32 = 0.1;
pub const MAX_POLAR_ANGLE: f32 = std::f32::consts::PI * 0.49;

pub const ROTATE_SENSITIVITY: f32 = 0.005;
pub const PAN_SENSITIVITY: f32 = 0.0015;
pub const DOLLY_SENSITIVITY: f32 = 0.1;

/// Distance multiplier applied when framing a set of meshes.
pub const FRAMING_DISTANCE_FACTOR: f32 = 1.2;

/// Minimum framing distance as a multiple of the largest box dimension.
pub const FRAMING_MIN_DISTANCE_FACTOR: f32 = 2.0;

/// Camera offset direction (scaled by distance) used when framing meshes.
pub const FRAMING_OFFSET: Vec3 = Vec3::new(0.3, 0.4, 0.9);

/// Uniform scale applied to the model wrapper.
pub const MODEL_SCALE: f32 = 1.0;

/// Minimum orbit distance as a fraction of the framed radius.
pub const MIN_DISTANCE_RADIUS_FACTOR: f32 = 0.2;
