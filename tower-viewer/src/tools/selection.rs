//! Hover, click and floor-calendar selection of model meshes.

use bevy::ecs::system::SystemParam;
use bevy::picking::events::{Click, Out, Over, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use constants::meshes::{LINKED_FLOORS, LinkedFloors, MESH_GROUPS};

use crate::engine::assets::mesh_metadata::{MeshMeta, MeshMetadata};
use crate::engine::camera::CameraFraming;
use crate::engine::highlight::{HighlightStyle, Highlighter};
use crate::engine::scene::mesh_index::{MeshIndex, base_mesh_name, companion_name};
use crate::tools::session::{SelectionDetails, ViewerSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshInteractionKind {
    Over,
    Out,
    Click,
}

/// Pointer interaction on a single mesh, forwarded from picking observers.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshInteraction {
    pub entity: Entity,
    pub kind: MeshInteractionKind,
}

/// Floor picked from the floor calendar, with the mesh it maps to.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct FloorSelectRequest {
    pub floor: i32,
    pub mesh_name: String,
}

/// Meshes to select together, in selection order, plus their metadata key.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelection {
    pub meshes: Vec<(Entity, String)>,
    pub base_name: String,
    pub group: Option<&'static [&'static str]>,
}

impl ResolvedSelection {
    pub fn entities(&self) -> Vec<Entity> {
        self.meshes.iter().map(|(entity, _)| *entity).collect()
    }

    pub fn joined_names(&self) -> String {
        self.meshes
            .iter()
            .map(|(_, name)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn linked_floors(&self) -> Option<&'static LinkedFloors> {
        self.group.and_then(linked_floors_for_group)
    }
}

pub fn find_mesh_group(name: &str) -> Option<&'static [&'static str]> {
    MESH_GROUPS
        .iter()
        .copied()
        .find(|group| group.contains(&name))
}

pub fn linked_floors_for_group(group: &[&str]) -> Option<&'static LinkedFloors> {
    LINKED_FLOORS.iter().find(|linked| linked.covers_group(group))
}

pub fn linked_floors_for_floor(floor: i32) -> Option<&'static LinkedFloors> {
    LINKED_FLOORS.iter().find(|linked| linked.covers_floor(floor))
}

fn lookup_all(index: &MeshIndex, names: &[&str]) -> Vec<(Entity, String)> {
    names
        .iter()
        .filter_map(|&name| index.lookup(name).map(|entity| (entity, name.to_string())))
        .collect()
}

/// Selection for a click on `clicked`: the clicked mesh first, then its group
/// members in table order, or else its companion.
pub fn resolve_click(clicked: Entity, name: &str, index: &MeshIndex) -> ResolvedSelection {
    let group = find_mesh_group(name);
    let mut meshes = vec![(clicked, name.to_string())];
    match group {
        Some(group) => meshes.extend(
            lookup_all(index, group)
                .into_iter()
                .filter(|(_, member)| member != name),
        ),
        None => {
            let companion = companion_name(name);
            if let Some(entity) = index.lookup(&companion) {
                meshes.push((entity, companion));
            }
        }
    }
    ResolvedSelection {
        meshes,
        base_name: group.map_or_else(|| base_mesh_name(name).to_string(), |g| g[0].to_string()),
        group,
    }
}

/// Selection for a floor-calendar pick. Linked floors always select their
/// whole linked group. Returns `None` when nothing resolvable is in the scene.
pub fn resolve_floor(floor: i32, mesh_name: &str, index: &MeshIndex) -> Option<ResolvedSelection> {
    let linked_group = linked_floors_for_floor(floor)
        .and_then(|linked| linked.meta_meshes.first())
        .and_then(|&meta_mesh| find_mesh_group(meta_mesh));
    if let Some(group) = linked_group {
        let meshes = lookup_all(index, group);
        if !meshes.is_empty() {
            return Some(ResolvedSelection {
                meshes,
                base_name: group[0].to_string(),
                group: Some(group),
            });
        }
    }

    let group = find_mesh_group(mesh_name);
    let meshes = match group {
        Some(group) => lookup_all(index, group),
        None => {
            let companion = companion_name(mesh_name);
            lookup_all(index, &[mesh_name, companion.as_str()])
        }
    };
    if meshes.is_empty() {
        return None;
    }
    Some(ResolvedSelection {
        meshes,
        base_name: group.map_or_else(|| base_mesh_name(mesh_name).to_string(), |g| g[0].to_string()),
        group,
    })
}

/// Merge the unit lists of linked metadata entries, first occurrence of an id wins.
pub fn merge_linked_meta(linked: &LinkedFloors, metadata: &MeshMetadata) -> Option<MeshMeta> {
    let metas: Vec<&MeshMeta> = linked
        .meta_meshes
        .iter()
        .filter_map(|name| metadata.get(name))
        .collect();
    match metas.as_slice() {
        [] => None,
        [single] => Some((*single).clone()),
        [first, ..] => Some(MeshMeta {
            floor: linked.display_floor().unwrap_or(first.floor),
            property: MeshMeta::merge_units(metas.iter().copied()),
        }),
    }
}

/// Metadata shown for a selection whose metadata key is `base_name`.
pub fn resolve_details(
    base_name: &str,
    group: Option<&[&str]>,
    metadata: &MeshMetadata,
) -> SelectionDetails {
    let meta = match group.and_then(linked_floors_for_group) {
        Some(linked) => merge_linked_meta(linked, metadata),
        None => metadata.get(base_name).cloned(),
    };
    SelectionDetails {
        base_name: base_name.to_string(),
        meta,
    }
}

/// Shared access for the selection and filter controllers.
#[derive(SystemParam)]
pub struct SelectionContext<'w, 's> {
    pub session: ResMut<'w, ViewerSession>,
    pub index: Res<'w, MeshIndex>,
    pub metadata: Res<'w, MeshMetadata>,
    pub highlighter: Highlighter<'w, 's>,
}

/// Drop the selected flag on every previously selected mesh.
pub fn clear_selected(session: &mut ViewerSession, highlighter: &mut Highlighter) {
    let hovered = session.hovered;
    for entity in std::mem::take(&mut session.selected) {
        highlighter.set_selected(entity, false);
        highlighter.refresh(entity, hovered == Some(entity));
    }
}

/// Drop the filtered flag on every previously filtered mesh.
pub fn clear_filtered(session: &mut ViewerSession, highlighter: &mut Highlighter) {
    let hovered = session.hovered;
    for entity in std::mem::take(&mut session.filtered) {
        highlighter.set_filtered(entity, None);
        highlighter.refresh(entity, hovered == Some(entity));
    }
}

impl SelectionContext<'_, '_> {
    /// Replace the selection wholesale and publish names and details.
    pub fn select(&mut self, resolved: &ResolvedSelection) -> SelectionDetails {
        clear_selected(&mut self.session, &mut self.highlighter);
        for (entity, _) in &resolved.meshes {
            self.highlighter.set_selected(*entity, true);
            self.highlighter.set_highlight(*entity, HighlightStyle::SELECTION);
        }
        self.session.selected = resolved.entities();
        self.session.selected_mesh_name = Some(resolved.joined_names());

        let details = resolve_details(&resolved.base_name, resolved.group, &self.metadata);
        self.session.details = Some(details.clone());
        details
    }

    pub fn hover(&mut self, entity: Entity) {
        let Some(name) = self.index.name_of(entity).map(str::to_string) else {
            return;
        };
        if self.index.is_blocked(&name) {
            return;
        }
        let keeps_highlight =
            self.highlighter.is_selected(entity) || self.highlighter.is_filtered(entity);
        if !keeps_highlight {
            self.highlighter.set_highlight(entity, HighlightStyle::HOVER);
        }
        self.session.hovered = Some(entity);
        self.session.hovered_mesh_name = Some(name);
    }

    pub fn unhover(&mut self, entity: Entity) {
        let Some(name) = self.index.name_of(entity) else {
            return;
        };
        if self.index.is_blocked(name) {
            return;
        }
        let keeps_highlight =
            self.highlighter.is_selected(entity) || self.highlighter.is_filtered(entity);
        if !keeps_highlight {
            self.highlighter.clear_highlight(entity);
        }
        self.session.hovered = None;
        self.session.hovered_mesh_name = None;
    }

    pub fn click(&mut self, entity: Entity) {
        let Some(name) = self.index.name_of(entity).map(str::to_string) else {
            return;
        };
        if self.index.is_blocked(&name) {
            return;
        }
        let resolved = resolve_click(entity, &name, &self.index);
        let details = self.select(&resolved);

        let floor = details
            .meta
            .as_ref()
            .or_else(|| self.metadata.get(&resolved.base_name))
            .map(|meta| meta.floor);
        if floor.is_some() {
            self.session.selected_floor = floor;
        }
        info!("Selected {}", resolved.joined_names());
    }

    /// Floor-calendar selection. Returns the entities to frame with the camera.
    ///
    /// Linked floors only swap the selection: filter highlights stay and the
    /// camera does not move. Any other floor also clears filter highlights.
    pub fn select_floor(&mut self, request: &FloorSelectRequest) -> Option<Vec<Entity>> {
        let resolved = resolve_floor(request.floor, &request.mesh_name, &self.index);
        let linked = resolved.as_ref().is_some_and(|resolved| {
            linked_floors_for_floor(request.floor).is_some() && resolved.linked_floors().is_some()
        });
        if !linked {
            clear_filtered(&mut self.session, &mut self.highlighter);
        }
        let Some(resolved) = resolved else {
            clear_selected(&mut self.session, &mut self.highlighter);
            warn!(
                "Floor {} has no selectable mesh named {}",
                request.floor, request.mesh_name
            );
            return None;
        };

        self.select(&resolved);
        self.session.selected_floor = Some(
            resolved
                .linked_floors()
                .and_then(LinkedFloors::display_floor)
                .unwrap_or(request.floor),
        );
        info!("Selected floor {}: {}", request.floor, resolved.joined_names());
        (!linked).then(|| resolved.entities())
    }
}

pub fn handle_mesh_interactions(
    mut interactions: EventReader<MeshInteraction>,
    mut ctx: SelectionContext,
) {
    for interaction in interactions.read() {
        match interaction.kind {
            MeshInteractionKind::Over => ctx.hover(interaction.entity),
            MeshInteractionKind::Out => ctx.unhover(interaction.entity),
            MeshInteractionKind::Click => ctx.click(interaction.entity),
        }
    }
}

pub fn handle_floor_select_requests(
    mut requests: EventReader<FloorSelectRequest>,
    mut ctx: SelectionContext,
    mut framing: CameraFraming,
) {
    for request in requests.read() {
        if let Some(entities) = ctx.select_floor(request) {
            framing.frame_meshes(&entities);
        }
    }
}

/// Re-resolve the published details when metadata arrives after a selection.
pub fn hydrate_selection_details(metadata: Res<MeshMetadata>, mut session: ResMut<ViewerSession>) {
    if !metadata.is_changed() {
        return;
    }
    let Some(previous) = session.details.as_ref() else {
        return;
    };
    let details = resolve_details(
        &previous.base_name,
        find_mesh_group(&previous.base_name),
        &metadata,
    );
    if session.details.as_ref() != Some(&details) {
        session.details = Some(details);
    }
}

fn forward_pointer_event(
    entity: Entity,
    kind: MeshInteractionKind,
    meshes: &Query<(), With<Mesh3d>>,
    interactions: &mut EventWriter<MeshInteraction>,
) -> bool {
    if !meshes.contains(entity) {
        return false;
    }
    interactions.write(MeshInteraction { entity, kind });
    true
}

pub fn on_pointer_over(
    mut trigger: Trigger<Pointer<Over>>,
    meshes: Query<(), With<Mesh3d>>,
    mut interactions: EventWriter<MeshInteraction>,
) {
    let entity = trigger.target();
    if forward_pointer_event(entity, MeshInteractionKind::Over, &meshes, &mut interactions) {
        trigger.propagate(false);
    }
}

pub fn on_pointer_out(
    mut trigger: Trigger<Pointer<Out>>,
    meshes: Query<(), With<Mesh3d>>,
    mut interactions: EventWriter<MeshInteraction>,
) {
    let entity = trigger.target();
    if forward_pointer_event(entity, MeshInteractionKind::Out, &meshes, &mut interactions) {
        trigger.propagate(false);
    }
}

pub fn on_pointer_click(
    mut trigger: Trigger<Pointer<Click>>,
    meshes: Query<(), With<Mesh3d>>,
    mut interactions: EventWriter<MeshInteraction>,
) {
    if trigger.event().button != PointerButton::Primary {
        return;
    }
    let entity = trigger.target();
    if forward_pointer_event(entity, MeshInteractionKind::Click, &meshes, &mut interactions) {
        trigger.propagate(false);
    }
}
