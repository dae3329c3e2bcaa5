use serde::{Deserialize, Serialize};

use super::{Entity, display_opt};

/// A top-level named location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_name: Option<String>,
}

impl Facility {
    pub fn new(id: Option<i64>, facility_name: Option<String>) -> Self {
        Self { id, facility_name }
    }
}

pub fn get_facility_identifier(facility: &Facility) -> Option<i64> {
    facility.id
}

impl Entity for Facility {
    const RESOURCE: &'static str = "facilities";
    const NAME: &'static str = "Facility";
    const TITLE: &'static str = "Facilities";
    const ROUTE: &'static str = "facility";

    fn id(&self) -> Option<i64> {
        get_facility_identifier(self)
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn label(&self) -> String {
        match (&self.facility_name, self.id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => String::new(),
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", display_opt(self.id.as_ref())),
            ("Facility Name", display_opt(self.facility_name.as_ref())),
        ]
    }
}
