use crate::model::{Facility, Resident, Room};

use super::{Control, EntityForm, ValidationErrors, Validator};

pub const FACILITY_NAME_MAX_LENGTH: usize = 200;
pub const ROOM_NUMBER_MAX: i64 = 10_000;
pub const PHONE_NUMBER_MAX: i64 = 9_999_999_999_999;

#[derive(Debug, Clone)]
pub struct FacilityForm {
    pub id: Control<i64>,
    pub facility_name: Control<String>,
}

impl Default for FacilityForm {
    fn default() -> Self {
        Self {
            id: Control::new("id", &[]),
            facility_name: Control::new(
                "facility_name",
                &[
                    Validator::Required,
                    Validator::MaxLength(FACILITY_NAME_MAX_LENGTH),
                ],
            ),
        }
    }
}

impl EntityForm for FacilityForm {
    type Entity = Facility;

    fn update_form(&mut self, facility: &Facility) {
        self.id.set_value(facility.id);
        self.facility_name.set_value(facility.facility_name.clone());
    }

    fn create_from_form(&self) -> Facility {
        Facility {
            id: self.id.value().copied(),
            facility_name: self.facility_name.value().cloned(),
        }
    }

    fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.collect(&self.facility_name);
        errors
    }
}

#[derive(Debug, Clone)]
pub struct RoomForm {
    pub id: Control<i64>,
    pub room_number: Control<i64>,
    pub facility: Control<Facility>,
}

impl Default for RoomForm {
    fn default() -> Self {
        Self {
            id: Control::new("id", &[]),
            room_number: Control::new(
                "room_number",
                &[Validator::Required, Validator::Max(ROOM_NUMBER_MAX)],
            ),
            facility: Control::new("facility", &[Validator::Required]),
        }
    }
}

impl EntityForm for RoomForm {
    type Entity = Room;

    fn update_form(&mut self, room: &Room) {
        self.id.set_value(room.id);
        self.room_number.set_value(room.room_number);
        self.facility.set_value(room.facility.clone());
    }

    fn create_from_form(&self) -> Room {
        Room {
            id: self.id.value().copied(),
            room_number: self.room_number.value().copied(),
            facility: self.facility.value().cloned(),
        }
    }

    fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.collect(&self.room_number);
        errors.collect(&self.facility);
        errors
    }
}

#[derive(Debug, Clone)]
pub struct ResidentForm {
    pub id: Control<i64>,
    pub name: Control<String>,
    pub phone_number: Control<i64>,
    pub email: Control<String>,
    pub room: Control<Room>,
}

impl Default for ResidentForm {
    fn default() -> Self {
        Self {
            id: Control::new("id", &[]),
            name: Control::new("name", &[Validator::Required]),
            phone_number: Control::new(
                "phone_number",
                &[Validator::Required, Validator::Max(PHONE_NUMBER_MAX)],
            ),
            email: Control::new("email", &[]),
            room: Control::new("room", &[Validator::Required]),
        }
    }
}

impl EntityForm for ResidentForm {
    type Entity = Resident;

    fn update_form(&mut self, resident: &Resident) {
        self.id.set_value(resident.id);
        self.name.set_value(resident.name.clone());
        self.phone_number.set_value(resident.phone_number);
        self.email.set_value(resident.email.clone());
        self.room.set_value(resident.room.clone());
    }

    fn create_from_form(&self) -> Resident {
        Resident {
            id: self.id.value().copied(),
            name: self.name.value().cloned(),
            phone_number: self.phone_number.value().copied(),
            // An emptied email input means "no email".
            email: self.email.value().filter(|e| !e.is_empty()).cloned(),
            room: self.room.value().cloned(),
        }
    }

    fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.collect(&self.name);
        errors.collect(&self.phone_number);
        errors.collect(&self.email);
        errors.collect(&self.room);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ValidationError;

    #[test]
    fn test_empty_facility_form_is_invalid() {
        let form = FacilityForm::default();
        assert_eq!(form.errors().get("facility_name"), &[ValidationError::Required]);
    }

    #[test]
    fn test_facility_name_over_200_chars_is_invalid() {
        let mut form = FacilityForm::default();
        form.facility_name.set_input(&"x".repeat(201));
        assert!(!form.is_valid());
        form.facility_name.set_input(&"x".repeat(200));
        assert!(form.is_valid());
    }

    #[test]
    fn test_facility_form_round_trips_record() {
        let mut form = FacilityForm::default();
        let facility = Facility::new(Some(8), Some("Annex".into()));
        form.update_form(&facility);
        assert_eq!(form.create_from_form(), facility);
    }

    #[test]
    fn test_room_without_facility_is_invalid() {
        let mut form = RoomForm::default();
        form.room_number.set_input("101");
        let errors = form.errors();
        assert_eq!(errors.get("facility"), &[ValidationError::Required]);
        assert!(errors.get("room_number").is_empty());
    }

    #[test]
    fn test_room_with_disabled_preset_facility_is_valid() {
        let mut form = RoomForm::default();
        form.room_number.set_input("101");
        form.facility.set_value(Some(Facility::new(Some(1), Some("North".into()))));
        form.facility.disable();
        assert!(form.is_valid());
        assert_eq!(
            form.create_from_form().facility.and_then(|f| f.id),
            Some(1)
        );
    }

    #[test]
    fn test_resident_phone_number_bound() {
        let mut form = ResidentForm::default();
        form.name.set_input("Grace");
        form.room.set_value(Some(Room::new(Some(3), Some(12), None)));
        form.phone_number.set_input("10000000000000");
        assert_eq!(
            form.errors().get("phone_number"),
            &[ValidationError::Max {
                max: PHONE_NUMBER_MAX,
                actual: 10_000_000_000_000
            }]
        );
        form.phone_number.set_input("5551234");
        assert!(form.is_valid());
    }

    #[test]
    fn test_resident_empty_email_becomes_none() {
        let mut form = ResidentForm::default();
        form.email.set_input("");
        assert_eq!(form.create_from_form().email, None);
        form.email.set_input("grace@example.org");
        assert_eq!(
            form.create_from_form().email.as_deref(),
            Some("grace@example.org")
        );
    }

    #[test]
    fn test_validation_errors_display_lists_fields() {
        let form = ResidentForm::default();
        let text = form.errors().to_string();
        assert!(text.contains("name: This field is required."));
        assert!(text.contains("room: This field is required."));
    }
}
