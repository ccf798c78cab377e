//! Filter Engine: highlight every mesh whose units match the criteria.

use std::collections::HashSet;

use bevy::prelude::*;
use constants::listing::{
    DEFAULT_PRICE_RANGE, PROPERTY_TYPE_SKY_VILLAS, RESIDENCE_DUPLEX, STATUS_AVAILABLE,
    STATUS_SOLD,
};
use constants::meshes::COMPANION_SUFFIX;
use serde::{Deserialize, Serialize};

use crate::engine::assets::mesh_metadata::{MeshMeta, MeshMetadata, StatusTone, UnitInfo};
use crate::engine::camera::CameraFraming;
use crate::engine::highlight::HighlightTone;
use crate::engine::scene::mesh_index::{MeshIndex, base_mesh_name};
use crate::tools::selection::{SelectionContext, clear_filtered, clear_selected};
use crate::tools::session::SelectionDetails;

fn default_price_range() -> (f64, f64) {
    DEFAULT_PRICE_RANGE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default = "default_price_range")]
    pub price_range: (f64, f64),
    #[serde(default)]
    pub residence_type: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            status: Vec::new(),
            price_range: DEFAULT_PRICE_RANGE,
            residence_type: Vec::new(),
            amenities: Vec::new(),
        }
    }
}

impl FilterCriteria {
    pub fn has_default_price_range(&self) -> bool {
        self.price_range == DEFAULT_PRICE_RANGE
    }

    /// True when any criterion differs from its inactive default.
    pub fn is_active(&self) -> bool {
        !self.status.is_empty()
            || !self.residence_type.is_empty()
            || !self.amenities.is_empty()
            || !self.has_default_price_range()
    }
}

#[derive(Event, Debug, Clone)]
pub struct ApplyFilters(pub FilterCriteria);

#[derive(Event, Debug, Clone, Default)]
pub struct ResetFilters;

/// Whether one unit passes the criteria.
pub fn matches_filter(unit: &UnitInfo, criteria: &FilterCriteria) -> bool {
    if !criteria.amenities.is_empty()
        && !criteria
            .amenities
            .iter()
            .any(|amenity| unit.amenities.contains(amenity))
    {
        return false;
    }

    // Amenity items carry no status, price or residence type.
    if unit.not_property {
        return criteria.status.is_empty()
            && criteria.residence_type.is_empty()
            && criteria.has_default_price_range();
    }

    if let Some(label) = unit.status_label() {
        if !criteria.status.is_empty() && !criteria.status.iter().any(|s| s == label) {
            return false;
        }
    }

    if let Some(price) = unit.price {
        let (min, max) = criteria.price_range;
        if price < min || price > max {
            return false;
        }
    }

    if !criteria.residence_type.is_empty() {
        let own_type = unit.residence_type.as_deref().unwrap_or(unit.id.as_str());
        let matches_type = criteria.residence_type.iter().any(|t| t == own_type);
        let sky_villa = criteria.residence_type.iter().any(|t| t == RESIDENCE_DUPLEX)
            && unit.property_type.as_deref() == Some(PROPERTY_TYPE_SKY_VILLAS);
        if !matches_type && !sky_villa {
            return false;
        }
    }

    true
}

/// Highlight tone for a matching mesh.
pub fn filter_tone(meta: &MeshMeta, criteria: &FilterCriteria) -> HighlightTone {
    if meta.property.is_empty() {
        return HighlightTone::Yellow;
    }

    if let Some(status) = criteria.status.first() {
        return match status.as_str() {
            STATUS_AVAILABLE => HighlightTone::Green,
            STATUS_SOLD => HighlightTone::Red,
            // Reserved, and the fallback for labels we do not know.
            _ => HighlightTone::Yellow,
        };
    }

    if !criteria.residence_type.is_empty() {
        let any_sold = meta
            .property
            .iter()
            .any(|unit| unit.status_label() == Some(STATUS_SOLD));
        return if any_sold {
            HighlightTone::Red
        } else {
            HighlightTone::Green
        };
    }

    let has_tone = |tone| meta.property.iter().any(|unit| unit.tone() == Some(tone));
    if has_tone(StatusTone::Red) {
        HighlightTone::Red
    } else if has_tone(StatusTone::Yellow) {
        HighlightTone::Yellow
    } else {
        HighlightTone::Green
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterMatch {
    pub entity: Entity,
    pub name: String,
    pub tone: HighlightTone,
}

/// Matching meshes and their companions, in metadata file order.
pub fn collect_filter_matches(
    metadata: &MeshMetadata,
    index: &MeshIndex,
    criteria: &FilterCriteria,
) -> Vec<FilterMatch> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();
    for (name, meta) in metadata.iter() {
        if !meta.property.iter().any(|unit| matches_filter(unit, criteria)) {
            continue;
        }
        let tone = filter_tone(meta, criteria);
        for candidate in [name.to_string(), format!("{name}{COMPANION_SUFFIX}")] {
            if let Some(entity) = index.lookup(&candidate) {
                if seen.insert(entity) {
                    matches.push(FilterMatch {
                        entity,
                        name: candidate,
                        tone,
                    });
                }
            }
        }
    }
    matches
}

impl SelectionContext<'_, '_> {
    /// Replace the filtered set. Returns the matches so callers can frame them.
    pub fn apply_filters(&mut self, criteria: &FilterCriteria) -> Vec<FilterMatch> {
        self.session.active_filters = Some(criteria.clone());
        if !self.index.is_ready() {
            return Vec::new();
        }

        clear_filtered(&mut self.session, &mut self.highlighter);
        if !criteria.is_active() {
            return Vec::new();
        }

        let matches = collect_filter_matches(&self.metadata, &self.index, criteria);
        for found in &matches {
            self.highlighter.set_filtered(found.entity, Some(found.tone));
            self.highlighter
                .refresh(found.entity, self.session.is_hovered(found.entity));
        }
        self.session.filtered = matches.iter().map(|found| found.entity).collect();
        info!("Filters matched {} meshes", matches.len());

        let Some(first) = matches.first() else {
            self.session.details = None;
            return matches;
        };
        let base_name = base_mesh_name(&first.name);
        if let Some(meta) = self.metadata.get(base_name) {
            self.session.details = Some(SelectionDetails {
                base_name: base_name.to_string(),
                meta: Some(meta.clone()),
            });
            self.session.selected_floor = Some(meta.floor);
        }
        matches
    }

    pub fn reset_filters(&mut self) {
        self.session.active_filters = None;
        clear_filtered(&mut self.session, &mut self.highlighter);
        clear_selected(&mut self.session, &mut self.highlighter);
        self.session.selected_floor = None;
        self.session.selected_mesh_name = None;
        self.session.details = None;
        info!("Filters reset");
    }
}

pub fn handle_apply_filters(
    mut requests: EventReader<ApplyFilters>,
    mut ctx: SelectionContext,
    mut framing: CameraFraming,
) {
    for ApplyFilters(criteria) in requests.read() {
        let matches = ctx.apply_filters(criteria);
        if !matches.is_empty() {
            let entities: Vec<Entity> = matches.iter().map(|found| found.entity).collect();
            framing.frame_meshes(&entities);
        }
    }
}

pub fn handle_reset_filters(
    mut requests: EventReader<ResetFilters>,
    mut ctx: SelectionContext,
    mut framing: CameraFraming,
) {
    if requests.read().count() == 0 {
        return;
    }
    ctx.reset_filters();
    framing.return_to_initial();
}
