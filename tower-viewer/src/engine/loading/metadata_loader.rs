use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::METADATA_PATH;

use super::progress::LoadingProgress;
use crate::engine::assets::mesh_metadata::MeshMetadata;
use crate::error::ViewerError;

#[derive(Resource, Default)]
pub struct MetadataLoader {
    handle: Option<Handle<MeshMetadata>>,
}

pub fn start_metadata_load(
    mut metadata_loader: ResMut<MetadataLoader>,
    asset_server: Res<AssetServer>,
) {
    metadata_loader.handle = Some(asset_server.load(METADATA_PATH));
}

/// Publish the metadata as a resource once loaded. A failed load is logged
/// and leaves the (empty) metadata in place; there is no retry.
pub fn poll_metadata_load(
    metadata_loader: Res<MetadataLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    metadata_assets: Res<Assets<MeshMetadata>>,
) {
    if loading_progress.metadata_settled() {
        return;
    }
    let Some(handle) = metadata_loader.handle.as_ref() else {
        return;
    };

    if let Some(metadata) = metadata_assets.get(handle) {
        info!("Mesh metadata loaded for {} meshes", metadata.len());
        commands.insert_resource(metadata.clone());
        loading_progress.metadata_loaded = true;
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
        let err = ViewerError::MetadataLoad {
            path: METADATA_PATH.to_string(),
            reason: err.to_string(),
        };
        error!("{err}");
        loading_progress.metadata_failed = true;
    }
}
