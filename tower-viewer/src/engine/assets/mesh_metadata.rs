use std::collections::{HashMap, HashSet};
use std::fmt;

use bevy::prelude::*;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Coarse status category used for filter highlight priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Green,
    Yellow,
    Red,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStatus {
    pub label: String,
    pub tone: StatusTone,
}

/// Backend identifier of a listed property; the metadata mixes numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// One property (or non-sellable amenity) associated with a mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UnitStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence_type: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default)]
    pub not_property: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
}

impl UnitInfo {
    pub fn status_label(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.label.as_str())
    }

    pub fn tone(&self) -> Option<StatusTone> {
        self.status.as_ref().map(|status| status.tone)
    }
}

/// Floor number and units attached to a single mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshMeta {
    pub floor: i32,
    #[serde(default)]
    pub property: Vec<UnitInfo>,
}

impl MeshMeta {
    /// Concatenate unit lists, keeping the first occurrence of each unit id.
    pub fn merge_units<'a>(metas: impl IntoIterator<Item = &'a MeshMeta>) -> Vec<UnitInfo> {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for meta in metas {
            for unit in &meta.property {
                if seen.insert(unit.id.clone()) {
                    merged.push(unit.clone());
                }
            }
        }
        merged
    }
}

/// Mesh metadata loaded once from JSON, keyed by mesh name.
///
/// Entries keep the order of the source file; filter evaluation walks them in
/// that order, so the first matching mesh is the first one listed.
#[derive(Asset, TypePath, Resource, Debug, Clone, Default)]
pub struct MeshMetadata {
    order: Vec<String>,
    entries: HashMap<String, MeshMeta>,
}

impl MeshMetadata {
    /// Add or replace an entry. A replaced entry keeps its original position.
    pub fn insert(&mut self, mesh_name: impl Into<String>, meta: MeshMeta) {
        let mesh_name = mesh_name.into();
        if self.entries.insert(mesh_name.clone(), meta).is_none() {
            self.order.push(mesh_name);
        }
    }

    pub fn get(&self, mesh_name: &str) -> Option<&MeshMeta> {
        self.entries.get(mesh_name)
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MeshMeta)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|meta| (name.as_str(), meta)))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

impl Serialize for MeshMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, meta) in self.iter() {
            map.serialize_entry(name, meta)?;
        }
        map.end()
    }
}

struct MeshMetadataVisitor;

impl<'de> Visitor<'de> for MeshMetadataVisitor {
    type Value = MeshMetadata;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of mesh names to floor and unit metadata")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut metadata = MeshMetadata::default();
        while let Some((name, meta)) = access.next_entry::<String, MeshMeta>()? {
            metadata.insert(name, meta);
        }
        Ok(metadata)
    }
}

impl<'de> Deserialize<'de> for MeshMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MeshMetadataVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_metadata() {
        let json = r#"{
            "Plane100": {
                "floor": 12,
                "property": [
                    {
                        "id": "A",
                        "status": {"label": "Available", "tone": "green"},
                        "price": 5,
                        "residenceType": "2WO",
                        "propertyType": "Apartments",
                        "propertyId": 42
                    },
                    {"id": "Gym", "notProperty": true, "amenities": ["Clubhouses"]}
                ]
            }
        }"#;

        let metadata: MeshMetadata = serde_json::from_str(json).expect("valid metadata");
        let meta = metadata.get("Plane100").expect("entry present");
        assert_eq!(meta.floor, 12);
        assert_eq!(meta.property.len(), 2);

        let unit = &meta.property[0];
        assert_eq!(unit.status_label(), Some("Available"));
        assert_eq!(unit.tone(), Some(StatusTone::Green));
        assert_eq!(unit.price, Some(5.0));
        assert_eq!(unit.residence_type.as_deref(), Some("2WO"));
        assert_eq!(unit.property_id, Some(PropertyId::Number(42)));

        let amenity = &meta.property[1];
        assert!(amenity.not_property);
        assert_eq!(amenity.amenities, vec!["Clubhouses".to_string()]);
        assert!(amenity.status.is_none());
    }

    #[test]
    fn unknown_tone_does_not_reject_the_file() {
        let json = r#"{"Plane1": {"floor": 3, "property": [
            {"id": "X", "status": {"label": "On hold", "tone": "blue"}}
        ]}}"#;
        let metadata: MeshMetadata = serde_json::from_str(json).expect("valid metadata");
        assert_eq!(
            metadata.get("Plane1").unwrap().property[0].tone(),
            Some(StatusTone::Unknown)
        );
    }

    #[test]
    fn merge_units_deduplicates_by_id_in_order() {
        let unit = |id: &str| UnitInfo {
            id: id.to_string(),
            ..default()
        };
        let lower = MeshMeta {
            floor: 54,
            property: vec![unit("D1"), unit("D2")],
        };
        let upper = MeshMeta {
            floor: 55,
            property: vec![unit("D2"), unit("D3")],
        };

        let merged = MeshMeta::merge_units([&lower, &upper]);
        let ids: Vec<&str> = merged.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["D1", "D2", "D3"]);
    }

    #[test]
    fn entries_keep_file_order() {
        let json = r#"{
            "Plane20": {"floor": 5},
            "Plane100": {"floor": 40},
            "Plane3": {"floor": 1}
        }"#;
        let metadata: MeshMetadata = serde_json::from_str(json).expect("valid metadata");
        let names: Vec<&str> = metadata.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Plane20", "Plane100", "Plane3"]);

        let round_trip = serde_json::to_string(&metadata).unwrap();
        assert!(round_trip.find("Plane20").unwrap() < round_trip.find("Plane100").unwrap());
    }

    #[test]
    fn property_id_displays_both_forms() {
        assert_eq!(PropertyId::Number(7).to_string(), "7");
        assert_eq!(PropertyId::Text("P-9".into()).to_string(), "P-9");
    }
}
