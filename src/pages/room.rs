use crate::model::{Entity, Room};
use crate::update::UpdateComponent;

use super::update::{UpdatePage, select};

pub type RoomUpdatePage = UpdatePage<Room>;

impl UpdatePage<Room> {
    pub async fn set_room_number_input(&self, value: &str) {
        self.set_input(value, |u| &mut u.form_mut().room_number).await
    }

    pub async fn get_room_number_input(&self) -> String {
        self.get_input(|u| &mut u.form_mut().room_number).await
    }

    /// Labels of the facility select, in display order.
    pub async fn facility_options(&self) -> Vec<String> {
        self.app
            .with_update::<Room, _>(|u| {
                u.facilities_shared_collection()
                    .iter()
                    .map(Entity::label)
                    .collect()
            })
            .await
            .unwrap_or_default()
    }

    pub async fn facility_select_last_option(&self) -> bool {
        self.app
            .with_update::<Room, _>(|u| {
                let choice = u.facility_options().last().cloned();
                select(&mut u.form_mut().facility, choice)
            })
            .await
            .unwrap_or(false)
    }

    pub async fn facility_select_option(&self, label: &str) -> bool {
        self.app
            .with_update::<Room, _>(|u| {
                let choice = u.facility_options().find_by_label(label).cloned();
                select(&mut u.form_mut().facility, choice)
            })
            .await
            .unwrap_or(false)
    }

    pub async fn get_facility_selected_option(&self) -> Option<String> {
        self.app
            .with_update::<Room, _>(|u| u.form().facility.value().map(Entity::label))
            .await
            .flatten()
    }

    pub async fn facility_select_disabled(&self) -> bool {
        self.app
            .with_update::<Room, _>(|u| u.form().facility.is_disabled())
            .await
            .unwrap_or(false)
    }
}
