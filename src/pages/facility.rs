use crate::form::EntityForm;
use crate::model::Facility;
use crate::update::UpdateComponent;

use super::update::UpdatePage;

pub type FacilityUpdatePage = UpdatePage<Facility>;

impl UpdatePage<Facility> {
    pub async fn set_facility_name_input(&self, value: &str) {
        self.set_input(value, |u| &mut u.form_mut().facility_name).await
    }

    pub async fn get_facility_name_input(&self) -> String {
        self.get_input(|u| &mut u.form_mut().facility_name).await
    }

    pub async fn is_valid(&self) -> bool {
        self.app
            .with_update::<Facility, _>(|u| u.form().is_valid())
            .await
            .unwrap_or(false)
    }
}
