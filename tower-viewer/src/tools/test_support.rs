use bevy::prelude::*;
use bevy::render::primitives::Aabb;

use crate::engine::assets::mesh_metadata::MeshMetadata;
use crate::engine::camera::{CameraAnimator, OrbitCamera};
use crate::engine::highlight::MeshAnnotations;
use crate::engine::scene::mesh_index::MeshIndex;
use crate::tools::filter::{ApplyFilters, ResetFilters, handle_apply_filters, handle_reset_filters};
use crate::tools::selection::{
    FloorSelectRequest, MeshInteraction, handle_floor_select_requests, handle_mesh_interactions,
};
use crate::tools::session::ViewerSession;

/// Headless app with the selection and filter controllers and no renderer.
pub fn viewer_app() -> App {
    let mut app = App::new();
    app.init_resource::<Assets<StandardMaterial>>()
        .init_resource::<MeshAnnotations>()
        .init_resource::<MeshIndex>()
        .init_resource::<MeshMetadata>()
        .init_resource::<ViewerSession>()
        .init_resource::<OrbitCamera>()
        .init_resource::<CameraAnimator>()
        .add_event::<MeshInteraction>()
        .add_event::<FloorSelectRequest>()
        .add_event::<ApplyFilters>()
        .add_event::<ResetFilters>()
        .add_systems(
            Update,
            (
                handle_mesh_interactions,
                handle_floor_select_requests,
                handle_apply_filters,
                handle_reset_filters,
            )
                .chain(),
        );
    app
}

/// Spawn named unit-cube meshes ten units apart, each with its own material.
pub fn spawn_meshes(app: &mut App, names: &[&str]) -> Vec<Entity> {
    let world = app.world_mut();
    let root = world.spawn_empty().id();
    let mut entities = Vec::with_capacity(names.len());
    for i in 0..names.len() {
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                emissive: LinearRgba::BLACK,
                ..default()
            });
        let entity = world
            .spawn((
                MeshMaterial3d(material),
                Aabb::from_min_max(Vec3::ZERO, Vec3::ONE),
                GlobalTransform::from_translation(Vec3::X * (i as f32 * 10.0)),
            ))
            .id();
        entities.push(entity);
    }

    {
        let mut index = world.resource_mut::<MeshIndex>();
        index.reset(root);
        for (&name, &entity) in names.iter().zip(&entities) {
            index.insert(Some(name), entity);
        }
    }
    world.insert_resource(ViewerSession::for_scene(root));
    entities
}

pub fn load_metadata(app: &mut App, json: serde_json::Value) {
    let metadata: MeshMetadata = serde_json::from_value(json).unwrap();
    app.world_mut().insert_resource(metadata);
}

pub fn emissive(app: &App, entity: Entity) -> LinearRgba {
    let handle = &app
        .world()
        .get::<MeshMaterial3d<StandardMaterial>>(entity)
        .unwrap()
        .0;
    app.world()
        .resource::<Assets<StandardMaterial>>()
        .get(handle)
        .unwrap()
        .emissive
}

pub fn session(app: &App) -> &ViewerSession {
    app.world().resource::<ViewerSession>()
}
