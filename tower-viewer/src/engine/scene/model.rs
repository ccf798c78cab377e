use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::path::MODEL_PATH;
use serde_json::json;

use super::mesh_index::MeshIndex;
use crate::engine::highlight::MeshAnnotations;
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::session::ViewerSession;

/// Wrapper entity the model scene is spawned under; recentered once bounds are known.
#[derive(Component)]
pub struct ModelRoot;

pub fn spawn_model(mut commands: Commands, asset_server: Res<AssetServer>) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(MODEL_PATH));
    info!("Loading model scene from {}", MODEL_PATH);
    commands
        .spawn((
            SceneRoot(scene),
            Transform::default(),
            Visibility::default(),
            ModelRoot,
            Name::new("model:root"),
        ))
        .observe(index_scene_meshes);
}

/// Mesh name as authored: the glTF node name carried by the primitive's parent,
/// falling back to the primitive's own name.
pub fn mesh_name<'a>(
    entity: Entity,
    names: &'a Query<&Name>,
    parents: &Query<&ChildOf>,
) -> Option<&'a str> {
    parents
        .get(entity)
        .ok()
        .and_then(|child_of| names.get(child_of.parent()).ok())
        .or_else(|| names.get(entity).ok())
        .map(Name::as_str)
}

/// Index every mesh of a freshly spawned scene and start a new session for it.
pub fn index_scene_meshes(
    trigger: Trigger<SceneInstanceReady>,
    children: Query<&Children>,
    meshes: Query<(), With<Mesh3d>>,
    names: Query<&Name>,
    parents: Query<&ChildOf>,
    mut index: ResMut<MeshIndex>,
    mut session: ResMut<ViewerSession>,
    mut annotations: ResMut<MeshAnnotations>,
    mut progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let root = trigger.target();
    index.reset(root);
    for entity in children.iter_descendants(root) {
        if meshes.contains(entity) {
            index.insert(mesh_name(entity, &names, &parents), entity);
        }
    }

    *session = ViewerSession::for_scene(root);
    annotations.clear();
    progress.scene_ready = true;

    info!("Model scene ready with {} meshes", index.len());
    rpc_interface.send_notification("meshes_loaded", json!({ "names": index.names() }));
}
