use serde::{Deserialize, Serialize};

use super::{Entity, Facility, display_opt};

/// A numbered space belonging to one facility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<Facility>,
}

impl Room {
    pub fn new(id: Option<i64>, room_number: Option<i64>, facility: Option<Facility>) -> Self {
        Self {
            id,
            room_number,
            facility,
        }
    }
}

pub fn get_room_identifier(room: &Room) -> Option<i64> {
    room.id
}

impl Entity for Room {
    const RESOURCE: &'static str = "rooms";
    const NAME: &'static str = "Room";
    const TITLE: &'static str = "Rooms";
    const ROUTE: &'static str = "room";

    fn id(&self) -> Option<i64> {
        get_room_identifier(self)
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn label(&self) -> String {
        match (self.room_number, self.id) {
            (Some(number), _) => number.to_string(),
            (None, Some(id)) => id.to_string(),
            (None, None) => String::new(),
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", display_opt(self.id.as_ref())),
            ("Room Number", display_opt(self.room_number.as_ref())),
            (
                "Facility",
                self.facility.as_ref().map(Entity::label).unwrap_or_default(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_embeds_facility() {
        let json = serde_json::json!({
            "id": 4,
            "room_number": 210,
            "facility": {"id": 1, "facility_name": "North"}
        });
        let room: Room = serde_json::from_value(json).unwrap();
        assert_eq!(room.room_number, Some(210));
        assert_eq!(room.facility.unwrap().id, Some(1));
    }

    #[test]
    fn test_room_without_facility_deserializes() {
        let room: Room = serde_json::from_str(r#"{"id": 4, "room_number": 12}"#).unwrap();
        assert!(room.facility.is_none());
    }

    #[test]
    fn test_fields_show_facility_label() {
        let room = Room::new(Some(1), Some(7), Some(Facility::new(Some(2), Some("West".into()))));
        let fields = room.fields();
        assert_eq!(fields[2], ("Facility", "West".to_string()));
    }
}
