//! Interaction controllers acting on the loaded model.
//!
//! Pointer events from mesh picking become [`MeshInteraction`](selection::MeshInteraction)
//! events; floor-calendar picks and filter criteria arrive over RPC. Every
//! controller writes the shared [`ViewerSession`](session::ViewerSession),
//! which is published to the front end as `selection_changed`.
//!
//! ```text
//! Picking observers ─> MeshInteraction ─┐
//! RPC select_floor ──> FloorSelectRequest ─┼─> SelectionContext ─> Highlighter
//! RPC apply/reset ───> ApplyFilters / ResetFilters ─┘        └─> CameraFraming
//! ```

use bevy::prelude::*;

use crate::engine::assets::mesh_metadata::MeshMetadata;
use crate::engine::camera::CameraSet;
use crate::engine::highlight::MeshAnnotations;
use crate::engine::scene::mesh_index::MeshIndex;

/// Filter criteria, matching and tone resolution.
pub mod filter;

/// Property and floor-plan navigation payloads for the front-end router.
pub mod navigation;

/// Hover, click and floor-calendar selection with group resolution.
pub mod selection;

/// Per-mount interaction state and its published snapshot.
pub mod session;

#[cfg(test)]
pub mod test_support;

use filter::{ApplyFilters, ResetFilters};
use selection::{FloorSelectRequest, MeshInteraction};
use session::ViewerSession;

/// Selection and filter controllers with their picking observers.
pub struct SelectionToolsPlugin;

impl Plugin for SelectionToolsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeshAnnotations>()
            .init_resource::<MeshIndex>()
            .init_resource::<MeshMetadata>()
            .init_resource::<ViewerSession>()
            .add_event::<MeshInteraction>()
            .add_event::<FloorSelectRequest>()
            .add_event::<ApplyFilters>()
            .add_event::<ResetFilters>()
            .add_observer(selection::on_pointer_over)
            .add_observer(selection::on_pointer_out)
            .add_observer(selection::on_pointer_click)
            .add_systems(
                Update,
                (
                    selection::handle_mesh_interactions,
                    selection::handle_floor_select_requests,
                    filter::handle_apply_filters,
                    filter::handle_reset_filters,
                )
                    .chain()
                    .before(CameraSet::Animate),
            )
            .add_systems(
                Update,
                (
                    selection::hydrate_selection_details,
                    session::publish_selection_state,
                )
                    .chain()
                    .after(filter::handle_reset_filters),
            );
    }
}
