use bevy::prelude::*;
use serde::Serialize;

use crate::engine::assets::mesh_metadata::MeshMeta;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::filter::FilterCriteria;

/// What the side panel shows for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDetails {
    /// Metadata key the details were resolved from.
    #[serde(rename = "meshName")]
    pub base_name: String,
    pub meta: Option<MeshMeta>,
}

/// Interaction state of the currently mounted model.
///
/// Rebuilt whenever a new scene instance becomes ready, so nothing carries
/// over from a previous mount.
#[derive(Resource, Debug, Default)]
pub struct ViewerSession {
    pub scene_root: Option<Entity>,
    /// Meshes highlighted by the last click or floor selection, in selection order.
    pub selected: Vec<Entity>,
    /// Meshes highlighted by the last filter application.
    pub filtered: Vec<Entity>,
    pub hovered: Option<Entity>,
    pub hovered_mesh_name: Option<String>,
    /// Selected mesh names joined with `", "`.
    pub selected_mesh_name: Option<String>,
    pub selected_floor: Option<i32>,
    pub details: Option<SelectionDetails>,
    pub active_filters: Option<FilterCriteria>,
}

impl ViewerSession {
    pub fn for_scene(root: Entity) -> Self {
        Self {
            scene_root: Some(root),
            ..default()
        }
    }

    pub fn is_hovered(&self, entity: Entity) -> bool {
        self.hovered == Some(entity)
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            hovered_mesh_name: self.hovered_mesh_name.clone(),
            selected_mesh_name: self.selected_mesh_name.clone(),
            selected_floor: self.selected_floor,
            details: self.details.clone(),
            active_filters: self.active_filters.clone(),
        }
    }
}

/// Serialisable view of the session for the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub hovered_mesh_name: Option<String>,
    pub selected_mesh_name: Option<String>,
    pub selected_floor: Option<i32>,
    pub details: Option<SelectionDetails>,
    pub active_filters: Option<FilterCriteria>,
}

/// Send `selection_changed` whenever the visible selection state differs from
/// what the front end last received.
pub fn publish_selection_state(
    session: Res<ViewerSession>,
    mut last: Local<Option<SelectionSnapshot>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !session.is_changed() {
        return;
    }
    let snapshot = session.snapshot();
    if last.as_ref() == Some(&snapshot) {
        return;
    }
    match serde_json::to_value(&snapshot) {
        Ok(params) => rpc_interface.send_notification("selection_changed", params),
        Err(err) => {
            error!("Failed to serialise selection: {err}");
            return;
        }
    }
    *last = Some(snapshot);
}
