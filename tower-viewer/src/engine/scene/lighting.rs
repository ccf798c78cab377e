use bevy::prelude::*;

const AMBIENT_BRIGHTNESS: f32 = 700.0;
const KEY_LIGHT_ILLUMINANCE: f32 = 8_000.0;
const FILL_LIGHT_ILLUMINANCE: f32 = 3_000.0;

/// Soft ambient plus a key and a fill light on opposite sides of the model.
pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: KEY_LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("light:key"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: FILL_LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-10.0, 10.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("light:fill"),
    ));
}
