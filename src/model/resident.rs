use serde::{Deserialize, Serialize};

use super::{Entity, Room, display_opt};

/// A person assigned to one room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
}

impl Resident {
    pub fn new(
        id: Option<i64>,
        name: Option<String>,
        phone_number: Option<i64>,
        email: Option<String>,
        room: Option<Room>,
    ) -> Self {
        Self {
            id,
            name,
            phone_number,
            email,
            room,
        }
    }
}

pub fn get_resident_identifier(resident: &Resident) -> Option<i64> {
    resident.id
}

impl Entity for Resident {
    const RESOURCE: &'static str = "residents";
    const NAME: &'static str = "Resident";
    const TITLE: &'static str = "Residents";
    const ROUTE: &'static str = "resident";

    fn id(&self) -> Option<i64> {
        get_resident_identifier(self)
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn label(&self) -> String {
        self.name.clone().unwrap_or_default()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", display_opt(self.id.as_ref())),
            ("Name", display_opt(self.name.as_ref())),
            ("Phone Number", display_opt(self.phone_number.as_ref())),
            ("Email", display_opt(self.email.as_ref())),
            ("Room", self.room.as_ref().map(Entity::label).unwrap_or_default()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_email_deserializes_as_none() {
        let resident: Resident = serde_json::from_str(
            r#"{"id": 1, "name": "Ada", "phone_number": 5551234, "email": null, "room": {"id": 2}}"#,
        )
        .unwrap();
        assert_eq!(resident.email, None);
        assert_eq!(resident.room.and_then(|r| r.id), Some(2));
    }

    #[test]
    fn test_phone_number_accepts_thirteen_digits() {
        let resident: Resident =
            serde_json::from_str(r#"{"phone_number": 9999999999999}"#).unwrap();
        assert_eq!(resident.phone_number, Some(9_999_999_999_999));
    }

    #[test]
    fn test_resident_identifier() {
        assert_eq!(get_resident_identifier(&Resident::default()), None);
    }
}
