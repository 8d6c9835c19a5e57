use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{set_if_some, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub floor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct LocationCreate {
    pub name: String,
    pub floor: String,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub floor: Option<String>,
    pub building: Option<String>,
    pub description: Option<String>,
}

impl Resource for Location {
    const COLLECTION: &'static str = "locations";
    const KIND: &'static str = "Location";

    type Create = LocationCreate;
    type Patch = LocationPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(input: LocationCreate, id: String, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: input.name,
            floor: input.floor,
            building: input.building,
            description: input.description,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: LocationPatch, _now: OffsetDateTime) -> bool {
        let mut changed = false;
        changed |= set_if_some(&mut self.name, patch.name);
        changed |= set_if_some(&mut self.floor, patch.floor);
        changed |= set_if_some(&mut self.building, patch.building.map(Some));
        changed |= set_if_some(&mut self.description, patch.description.map(Some));
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let input: LocationCreate =
            serde_json::from_str(r#"{"name":"Chemistry Lab","floor":"2"}"#).unwrap();
        let loc = Location::create(input, "l1".into(), OffsetDateTime::UNIX_EPOCH);
        let json = serde_json::to_value(&loc).unwrap();
        assert!(json.get("building").is_none());
        assert_eq!(json["floor"], "2");
    }

    #[test]
    fn patch_sets_optional_building() {
        let mut loc = Location::create(
            LocationCreate {
                name: "Library".into(),
                floor: "G".into(),
                building: None,
                description: None,
            },
            "l2".into(),
            OffsetDateTime::UNIX_EPOCH,
        );
        assert!(loc.apply(
            LocationPatch {
                building: Some("Block A".into()),
                ..Default::default()
            },
            OffsetDateTime::UNIX_EPOCH,
        ));
        assert_eq!(loc.building.as_deref(), Some("Block A"));
        assert_eq!(loc.name, "Library");
    }
}
