//! Navigation payloads handed to the front-end router.

use constants::listing::PROPERTY_TYPE_SKY_VILLAS;
use constants::path::{
    FLOOR_PLAN_DEFAULT, FLOOR_PLAN_DUPLEX, FLOOR_PLAN_FOUR, FLOOR_PLAN_ONE, FLOOR_PLAN_ROUTE,
    FLOOR_PLAN_THREE, FLOOR_PLAN_TWO, PROPERTY_ROUTE,
};
use serde::Serialize;

use crate::engine::assets::mesh_metadata::{UnitInfo, UnitStatus};
use crate::error::ViewerError;
use crate::tools::session::{SelectionDetails, ViewerSession};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navigation<S> {
    pub route: &'static str,
    pub state: S,
}

/// Inline snapshot of a property card for units not yet listed in the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCard {
    pub id: String,
    pub beds: Option<String>,
    pub interior: Option<String>,
    pub facing: Option<String>,
    pub price: Option<f64>,
    pub residence_type: Option<String>,
    pub amenities: Vec<String>,
    pub image: Option<String>,
    pub property_type: Option<String>,
    pub status: Option<UnitStatus>,
    pub details: Option<String>,
}

impl From<&UnitInfo> for PropertyCard {
    fn from(unit: &UnitInfo) -> Self {
        Self {
            id: unit.id.clone(),
            beds: unit.beds.clone(),
            interior: unit.interior.clone(),
            facing: unit.facing.clone(),
            price: unit.price,
            residence_type: unit.residence_type.clone(),
            amenities: unit.amenities.clone(),
            image: unit.image.clone(),
            property_type: unit.property_type.clone(),
            status: unit.status.clone(),
            details: unit.details.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyState {
    Listed {
        #[serde(rename = "propertyId")]
        property_id: String,
    },
    Card {
        #[serde(rename = "cardData")]
        card_data: PropertyCard,
    },
}

pub fn property_navigation(unit: &UnitInfo) -> Navigation<PropertyState> {
    let state = match &unit.property_id {
        Some(id) => PropertyState::Listed {
            property_id: id.to_string(),
        },
        None => PropertyState::Card {
            card_data: PropertyCard::from(unit),
        },
    };
    Navigation {
        route: PROPERTY_ROUTE,
        state,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanState {
    pub selected_floor: Option<i32>,
    pub selected_mesh_meta: Option<SelectionDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glb_url: Option<&'static str>,
}

pub fn is_duplex(unit: &UnitInfo) -> bool {
    let mentions_duplex = |value: &str| value.to_ascii_lowercase().contains("duplex");
    unit.property_type.as_deref() == Some(PROPERTY_TYPE_SKY_VILLAS)
        || mentions_duplex(&unit.id)
        || unit.image.as_deref().is_some_and(mentions_duplex)
}

/// Floor-plan model for a unit.
pub fn floor_plan_model(unit: &UnitInfo) -> &'static str {
    if is_duplex(unit) {
        return FLOOR_PLAN_DUPLEX;
    }
    match unit.id.as_str() {
        "1NE" => FLOOR_PLAN_ONE,
        "2WO" => FLOOR_PLAN_TWO,
        "3HREE" => FLOOR_PLAN_THREE,
        "4OUR" => FLOOR_PLAN_FOUR,
        _ => FLOOR_PLAN_DEFAULT,
    }
}

/// Floor-plan view for the current selection, optionally focused on one unit.
pub fn floor_plan_navigation(
    session: &ViewerSession,
    unit: Option<&UnitInfo>,
) -> Navigation<FloorPlanState> {
    Navigation {
        route: FLOOR_PLAN_ROUTE,
        state: FloorPlanState {
            selected_floor: session.selected_floor,
            selected_mesh_meta: session.details.clone(),
            selected_property_id: unit.map(|unit| unit.id.clone()),
            glb_url: unit.map(floor_plan_model),
        },
    }
}

/// Unit with `id` among the currently displayed details.
pub fn find_unit<'a>(session: &'a ViewerSession, id: &str) -> Result<&'a UnitInfo, ViewerError> {
    session
        .details
        .as_ref()
        .and_then(|details| details.meta.as_ref())
        .and_then(|meta| meta.property.iter().find(|unit| unit.id == id))
        .ok_or_else(|| ViewerError::UnitNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::mesh_metadata::MeshMeta;
    use serde_json::json;

    fn unit(value: serde_json::Value) -> UnitInfo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn listed_property_navigates_by_id() {
        let nav = property_navigation(&unit(json!({"id": "A", "propertyId": 812})));
        assert_eq!(
            serde_json::to_value(&nav).unwrap(),
            json!({"route": "/v3/property", "state": {"propertyId": "812"}})
        );
    }

    #[test]
    fn unlisted_property_carries_card_snapshot() {
        let nav = property_navigation(&unit(json!({"id": "A", "beds": "3", "price": 4.5})));
        let value = serde_json::to_value(&nav).unwrap();
        assert_eq!(value["state"]["cardData"]["id"], "A");
        assert_eq!(value["state"]["cardData"]["price"], 4.5);
    }

    #[test]
    fn floor_plan_models() {
        assert_eq!(
            floor_plan_model(&unit(json!({"id": "x", "propertyType": "Sky Villas"}))),
            FLOOR_PLAN_DUPLEX
        );
        assert_eq!(
            floor_plan_model(&unit(json!({"id": "x", "image": "/img/Duplex-A.png"}))),
            FLOOR_PLAN_DUPLEX
        );
        assert_eq!(floor_plan_model(&unit(json!({"id": "3HREE"}))), FLOOR_PLAN_THREE);
        assert_eq!(floor_plan_model(&unit(json!({"id": "5IVE"}))), FLOOR_PLAN_DEFAULT);
    }

    #[test]
    fn finds_units_in_current_details() {
        let mut session = ViewerSession::default();
        assert!(matches!(
            find_unit(&session, "A"),
            Err(ViewerError::UnitNotFound(_))
        ));

        session.selected_floor = Some(9);
        session.details = Some(SelectionDetails {
            base_name: "Plane9".into(),
            meta: Some(MeshMeta {
                floor: 9,
                property: vec![unit(json!({"id": "1NE"}))],
            }),
        });
        let found = find_unit(&session, "1NE").unwrap();
        let nav = floor_plan_navigation(&session, Some(found));
        assert_eq!(nav.state.glb_url, Some(FLOOR_PLAN_ONE));
        assert_eq!(nav.state.selected_floor, Some(9));

        let explore = serde_json::to_value(floor_plan_navigation(&session, None)).unwrap();
        assert!(explore["state"].get("glbUrl").is_none());
        assert_eq!(explore["state"]["selectedMeshMeta"]["meshName"], "Plane9");
    }
}
