//! Emissive highlight overlays on individual meshes.
//!
//! Per-mesh state lives in the [`MeshAnnotations`] side table rather than on
//! the scene entities. The first highlight of a mesh snapshots its emissive
//! value and gives the mesh a private material clone, so highlighting never
//! bleeds into other meshes that share the source material.

use std::collections::HashMap;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use constants::highlight::{
    FILTER_INTENSITY, HOVER_COLOR, HOVER_INTENSITY, SELECTION_COLOR, SELECTION_INTENSITY,
    TONE_GREEN, TONE_RED, TONE_YELLOW,
};
use serde::Serialize;

/// Filter highlight colour category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightTone {
    Green,
    Yellow,
    Red,
}

impl HighlightTone {
    pub fn color(self) -> Color {
        match self {
            Self::Green => TONE_GREEN,
            Self::Yellow => TONE_YELLOW,
            Self::Red => TONE_RED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    pub color: Color,
    pub intensity: f32,
}

impl HighlightStyle {
    pub const HOVER: Self = Self {
        color: HOVER_COLOR,
        intensity: HOVER_INTENSITY,
    };

    pub const SELECTION: Self = Self {
        color: SELECTION_COLOR,
        intensity: SELECTION_INTENSITY,
    };

    pub fn filter(tone: HighlightTone) -> Self {
        Self {
            color: tone.color(),
            intensity: FILTER_INTENSITY,
        }
    }

    /// HDR emissive value written to the material.
    pub fn emissive(&self) -> LinearRgba {
        let linear = self.color.to_linear();
        LinearRgba::rgb(
            linear.red * self.intensity,
            linear.green * self.intensity,
            linear.blue * self.intensity,
        )
    }
}

/// Highlight bookkeeping for one mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshAnnotation {
    pub selected: bool,
    pub filtered: bool,
    pub filter_tone: Option<HighlightTone>,
    original_emissive: Option<LinearRgba>,
    cloned_material: Option<Handle<StandardMaterial>>,
}

impl MeshAnnotation {
    pub fn original_emissive(&self) -> Option<LinearRgba> {
        self.original_emissive
    }

    pub fn cloned_material(&self) -> Option<&Handle<StandardMaterial>> {
        self.cloned_material.as_ref()
    }

    /// Style that should currently be visible: selected > filtered > hovered > none.
    pub fn effective_style(&self, hovered: bool) -> Option<HighlightStyle> {
        if self.selected {
            return Some(HighlightStyle::SELECTION);
        }
        if self.filtered {
            return Some(HighlightStyle::filter(
                self.filter_tone.unwrap_or(HighlightTone::Yellow),
            ));
        }
        hovered.then_some(HighlightStyle::HOVER)
    }
}

/// Side table of highlight state keyed by mesh entity.
#[derive(Resource, Debug, Default)]
pub struct MeshAnnotations(HashMap<Entity, MeshAnnotation>);

impl MeshAnnotations {
    pub fn get(&self, entity: Entity) -> Option<&MeshAnnotation> {
        self.0.get(&entity)
    }

    pub fn entry(&mut self, entity: Entity) -> &mut MeshAnnotation {
        self.0.entry(entity).or_default()
    }

    pub fn is_selected(&self, entity: Entity) -> bool {
        self.get(entity).is_some_and(|a| a.selected)
    }

    pub fn is_filtered(&self, entity: Entity) -> bool {
        self.get(entity).is_some_and(|a| a.filtered)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Apply an emissive highlight, snapshotting and cloning on first use.
///
/// Returns `false` (and changes nothing) when the material cannot be resolved.
pub fn set_highlight(
    annotation: &mut MeshAnnotation,
    slot: &mut MeshMaterial3d<StandardMaterial>,
    materials: &mut Assets<StandardMaterial>,
    style: HighlightStyle,
) -> bool {
    let Some(current) = materials.get(&slot.0) else {
        return false;
    };
    let emissive = current.emissive;
    let private_copy = annotation
        .cloned_material
        .is_none()
        .then(|| current.clone());

    annotation.original_emissive.get_or_insert(emissive);
    if let Some(copy) = private_copy {
        let handle = materials.add(copy);
        slot.0 = handle.clone();
        annotation.cloned_material = Some(handle);
    }

    let Some(material) = materials.get_mut(&slot.0) else {
        return false;
    };
    material.emissive = style.emissive();
    true
}

/// Restore the snapshot emissive value. No-op without a snapshot.
pub fn clear_highlight(
    annotation: &MeshAnnotation,
    slot: &MeshMaterial3d<StandardMaterial>,
    materials: &mut Assets<StandardMaterial>,
) -> bool {
    let Some(original) = annotation.original_emissive else {
        return false;
    };
    let Some(material) = materials.get_mut(&slot.0) else {
        return false;
    };
    material.emissive = original;
    true
}

/// ECS access for highlighting meshes by entity.
#[derive(SystemParam)]
pub struct Highlighter<'w, 's> {
    pub annotations: ResMut<'w, MeshAnnotations>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    slots: Query<'w, 's, &'static mut MeshMaterial3d<StandardMaterial>>,
}

impl Highlighter<'_, '_> {
    pub fn set_highlight(&mut self, entity: Entity, style: HighlightStyle) -> bool {
        let Ok(mut slot) = self.slots.get_mut(entity) else {
            return false;
        };
        let annotation = self.annotations.entry(entity);
        set_highlight(annotation, &mut slot, &mut self.materials, style)
    }

    pub fn clear_highlight(&mut self, entity: Entity) -> bool {
        let (Some(annotation), Ok(slot)) = (self.annotations.get(entity), self.slots.get(entity))
        else {
            return false;
        };
        clear_highlight(annotation, slot, &mut self.materials)
    }

    pub fn set_selected(&mut self, entity: Entity, selected: bool) {
        self.annotations.entry(entity).selected = selected;
    }

    pub fn set_filtered(&mut self, entity: Entity, tone: Option<HighlightTone>) {
        let annotation = self.annotations.entry(entity);
        annotation.filtered = tone.is_some();
        annotation.filter_tone = tone;
    }

    pub fn is_selected(&self, entity: Entity) -> bool {
        self.annotations.is_selected(entity)
    }

    pub fn is_filtered(&self, entity: Entity) -> bool {
        self.annotations.is_filtered(entity)
    }

    /// Re-apply whichever style wins precedence for `entity`, or clear it.
    pub fn refresh(&mut self, entity: Entity, hovered: bool) {
        let style = self
            .annotations
            .get(entity)
            .and_then(|annotation| annotation.effective_style(hovered));
        match style {
            Some(style) => {
                self.set_highlight(entity, style);
            }
            None => {
                self.clear_highlight(entity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material_with_emissive(
        materials: &mut Assets<StandardMaterial>,
        emissive: LinearRgba,
    ) -> MeshMaterial3d<StandardMaterial> {
        MeshMaterial3d(materials.add(StandardMaterial {
            emissive,
            ..default()
        }))
    }

    #[test]
    fn clear_after_set_restores_original_and_is_idempotent() {
        let mut materials = Assets::<StandardMaterial>::default();
        let original = LinearRgba::rgb(0.1, 0.2, 0.3);
        let mut slot = material_with_emissive(&mut materials, original);
        let mut annotation = MeshAnnotation::default();

        assert!(set_highlight(
            &mut annotation,
            &mut slot,
            &mut materials,
            HighlightStyle::SELECTION
        ));
        assert_eq!(
            materials.get(&slot.0).unwrap().emissive,
            HighlightStyle::SELECTION.emissive()
        );

        assert!(clear_highlight(&annotation, &slot, &mut materials));
        assert_eq!(materials.get(&slot.0).unwrap().emissive, original);
        assert!(clear_highlight(&annotation, &slot, &mut materials));
        assert_eq!(materials.get(&slot.0).unwrap().emissive, original);
    }

    #[test]
    fn clear_without_snapshot_is_noop() {
        let mut materials = Assets::<StandardMaterial>::default();
        let original = LinearRgba::rgb(0.4, 0.0, 0.0);
        let slot = material_with_emissive(&mut materials, original);

        assert!(!clear_highlight(
            &MeshAnnotation::default(),
            &slot,
            &mut materials
        ));
        assert_eq!(materials.get(&slot.0).unwrap().emissive, original);
    }

    #[test]
    fn shared_material_is_cloned_once_and_left_untouched() {
        let mut materials = Assets::<StandardMaterial>::default();
        let shared = material_with_emissive(&mut materials, LinearRgba::BLACK);
        let shared_handle = shared.0.clone();
        let mut slot = shared.clone();
        let mut annotation = MeshAnnotation::default();

        set_highlight(
            &mut annotation,
            &mut slot,
            &mut materials,
            HighlightStyle::HOVER,
        );
        let cloned = slot.0.clone();
        assert_ne!(cloned, shared_handle);
        assert_eq!(materials.get(&shared_handle).unwrap().emissive, LinearRgba::BLACK);

        set_highlight(
            &mut annotation,
            &mut slot,
            &mut materials,
            HighlightStyle::SELECTION,
        );
        assert_eq!(slot.0, cloned);
        assert_eq!(annotation.cloned_material(), Some(&cloned));
        assert_eq!(annotation.original_emissive(), Some(LinearRgba::BLACK));
    }

    #[test]
    fn snapshot_is_taken_only_once() {
        let mut materials = Assets::<StandardMaterial>::default();
        let original = LinearRgba::rgb(0.0, 0.5, 0.0);
        let mut slot = material_with_emissive(&mut materials, original);
        let mut annotation = MeshAnnotation::default();

        set_highlight(&mut annotation, &mut slot, &mut materials, HighlightStyle::HOVER);
        set_highlight(&mut annotation, &mut slot, &mut materials, HighlightStyle::SELECTION);
        clear_highlight(&annotation, &slot, &mut materials);

        assert_eq!(materials.get(&slot.0).unwrap().emissive, original);
    }

    #[test]
    fn missing_material_is_noop() {
        let mut materials = Assets::<StandardMaterial>::default();
        let mut slot = MeshMaterial3d::<StandardMaterial>(Handle::default());
        let mut annotation = MeshAnnotation::default();

        assert!(!set_highlight(
            &mut annotation,
            &mut slot,
            &mut materials,
            HighlightStyle::HOVER
        ));
        assert!(annotation.original_emissive().is_none());
        assert!(annotation.cloned_material().is_none());
    }

    #[test]
    fn precedence_is_selected_then_filtered_then_hovered() {
        let mut annotation = MeshAnnotation {
            selected: true,
            filtered: true,
            filter_tone: Some(HighlightTone::Red),
            ..default()
        };
        assert_eq!(
            annotation.effective_style(true),
            Some(HighlightStyle::SELECTION)
        );

        annotation.selected = false;
        assert_eq!(
            annotation.effective_style(true),
            Some(HighlightStyle::filter(HighlightTone::Red))
        );

        annotation.filtered = false;
        assert_eq!(annotation.effective_style(true), Some(HighlightStyle::HOVER));
        assert_eq!(annotation.effective_style(false), None);
    }
}
