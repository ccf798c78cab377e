use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Leave `Loading` once the model is mounted and recentred.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.model_ready() {
        info!("→ Model ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

/// Push loading milestones to the front end whenever they change.
pub fn publish_loading_progress(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !loading_progress.is_changed() {
        return;
    }
    match serde_json::to_value(&*loading_progress) {
        Ok(params) => rpc_interface.send_notification("loading_progress", params),
        Err(err) => error!("Failed to serialise loading progress: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn lifecycle_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .init_resource::<WebRpcInterface>()
            .add_systems(
                Update,
                (
                    transition_to_running.run_if(in_state(AppState::Loading)),
                    publish_loading_progress,
                ),
            );
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn runs_once_scene_and_bounds_are_ready() {
        let mut app = lifecycle_app();
        app.update();
        assert_eq!(state(&app), AppState::Loading);

        app.world_mut().resource_mut::<LoadingProgress>().scene_ready = true;
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Loading);

        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .bounds_computed = true;
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Running);
    }

    #[test]
    fn progress_changes_are_published() {
        let mut app = lifecycle_app();
        app.update();
        let initial = app.world().resource::<WebRpcInterface>().notifications().len();
        assert_eq!(initial, 1);

        app.update();
        assert_eq!(
            app.world().resource::<WebRpcInterface>().notifications().len(),
            1
        );

        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .metadata_failed = true;
        app.update();
        let rpc = app.world().resource::<WebRpcInterface>();
        let last = rpc.notifications().last().unwrap();
        assert_eq!(last.method, "loading_progress");
        assert_eq!(last.params["metadataFailed"], true);
    }
}
