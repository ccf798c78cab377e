use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use constants::camera::{CAMERA_NEAR, MIN_DISTANCE_RADIUS_FACTOR, MODEL_SCALE};
use serde_json::json;

use super::mesh_index::MeshIndex;
use super::model::ModelRoot;
use crate::engine::assets::bounds::BoundsData;
use crate::engine::camera::OrbitCamera;
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

/// The single mesh with the greatest bounding volume.
#[derive(Debug, Clone, PartialEq)]
pub struct LargestMesh {
    pub name: String,
    /// Center after recentering the model.
    pub center: Vec3,
    pub size: Vec3,
    pub radius: f32,
    pub max_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelBoundsReport {
    /// Translation that moves the model's center to the origin.
    pub offset: Vec3,
    pub size: Vec3,
    pub radius: f32,
    pub max_height: f32,
    pub largest_mesh: Option<LargestMesh>,
}

impl ModelBoundsReport {
    pub fn min_camera_distance(&self) -> f32 {
        let radius = self
            .largest_mesh
            .as_ref()
            .map_or(self.radius, |largest| largest.radius);
        (radius * MIN_DISTANCE_RADIUS_FACTOR).max(CAMERA_NEAR)
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "offset": self.offset.to_array(),
            "size": self.size.to_array(),
            "radius": self.radius,
            "maxHeight": self.max_height,
            "largestMesh": self.largest_mesh.as_ref().map(|largest| json!({
                "name": largest.name,
                "center": largest.center.to_array(),
                "size": largest.size.to_array(),
                "radius": largest.radius,
                "maxHeight": largest.max_height,
            })),
        })
    }
}

/// Bounds of the whole model and of its largest mesh, in world units after `scale`.
pub fn calculate_model_bounds<'a>(
    meshes: impl IntoIterator<Item = (&'a str, BoundsData)>,
    scale: f32,
) -> Option<ModelBoundsReport> {
    let meshes: Vec<(&str, BoundsData)> = meshes.into_iter().collect();
    let model = BoundsData::union_all(meshes.iter().map(|(_, bounds)| *bounds))?;
    let center = model.center();
    let size = model.size();

    let largest_mesh = meshes
        .iter()
        .max_by(|(_, a), (_, b)| a.volume().total_cmp(&b.volume()))
        .map(|(name, bounds)| {
            let mesh_size = bounds.size() * scale;
            LargestMesh {
                name: name.to_string(),
                center: (bounds.center() - center) * scale,
                size: mesh_size,
                radius: mesh_size.x.max(mesh_size.z) / 2.0,
                max_height: mesh_size.y,
            }
        });

    Some(ModelBoundsReport {
        offset: -center * scale,
        size: size * scale,
        radius: size.x.max(size.z) / 2.0 * scale,
        max_height: size.y * scale,
        largest_mesh,
    })
}

/// Bounds computed for the current scene root; recomputed only for a new root.
#[derive(Resource, Debug, Default)]
pub struct ModelBounds {
    pub root: Option<Entity>,
    pub report: Option<ModelBoundsReport>,
}

/// Recenter the model once every indexed mesh has its bounds.
pub fn compute_model_bounds(
    index: Res<MeshIndex>,
    mut memo: ResMut<ModelBounds>,
    meshes: Query<(&Aabb, &GlobalTransform)>,
    mut roots: Query<&mut Transform, With<ModelRoot>>,
    mut orbit: ResMut<OrbitCamera>,
    mut progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(root) = index.root() else {
        return;
    };
    if memo.root == Some(root) {
        return;
    }

    // Aabbs are attached in PostUpdate, some frames after the scene spawns.
    let mut collected = Vec::with_capacity(index.len());
    for (entity, name) in index.iter() {
        let Ok((aabb, transform)) = meshes.get(entity) else {
            return;
        };
        collected.push((name, BoundsData::from_aabb(aabb, transform)));
    }

    memo.root = Some(root);
    memo.report = calculate_model_bounds(collected, MODEL_SCALE);
    progress.bounds_computed = true;

    let Some(report) = memo.report.as_ref() else {
        warn!("Model has no meshes, skipping recentering");
        return;
    };

    if let Ok(mut transform) = roots.get_mut(root) {
        transform.translation = report.offset;
        transform.scale = Vec3::splat(MODEL_SCALE);
    }
    orbit.min_distance = report.min_camera_distance();

    info!(
        "Model bounds computed: radius {:.1}, height {:.1}, largest mesh {:?}",
        report.radius,
        report.max_height,
        report.largest_mesh.as_ref().map(|largest| largest.name.as_str())
    );
    rpc_interface.send_notification("model_bounds", report.to_json());
}
