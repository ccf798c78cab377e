use bevy::asset::AssetMetaCheck;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::mesh_metadata::MeshMetadata;
use crate::engine::camera::ViewerCameraPlugin;
use crate::engine::core::app_state::{AppState, publish_loading_progress, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::metadata_loader::{
    MetadataLoader, poll_metadata_load, start_metadata_load,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::model::spawn_model;
use crate::engine::scene::model_bounds::{ModelBounds, compute_model_bounds};
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::SelectionToolsPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MeshPickingPlugin)
        // Registers MeshMetadata as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<MeshMetadata>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(ViewerCameraPlugin)
        .add_plugins(SelectionToolsPlugin);

    app.init_resource::<LoadingProgress>()
        .init_resource::<MetadataLoader>()
        .init_resource::<ModelBounds>();

    app.add_systems(Startup, (spawn_lighting, spawn_model, start_metadata_load))
        .add_systems(
            Update,
            (poll_metadata_load, compute_model_bounds, publish_loading_progress).chain(),
        )
        .add_systems(
            Update,
            transition_to_running
                .after(compute_model_bounds)
                .run_if(in_state(AppState::Loading)),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
