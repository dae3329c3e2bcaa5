use crate::model::{Entity, Resident};
use crate::update::UpdateComponent;

use super::update::{UpdatePage, select};

pub type ResidentUpdatePage = UpdatePage<Resident>;

impl UpdatePage<Resident> {
    pub async fn set_name_input(&self, value: &str) {
        self.set_input(value, |u| &mut u.form_mut().name).await
    }

    pub async fn get_name_input(&self) -> String {
        self.get_input(|u| &mut u.form_mut().name).await
    }

    pub async fn set_phone_number_input(&self, value: &str) {
        self.set_input(value, |u| &mut u.form_mut().phone_number).await
    }

    pub async fn get_phone_number_input(&self) -> String {
        self.get_input(|u| &mut u.form_mut().phone_number).await
    }

    pub async fn set_email_input(&self, value: &str) {
        self.set_input(value, |u| &mut u.form_mut().email).await
    }

    pub async fn get_email_input(&self) -> String {
        self.get_input(|u| &mut u.form_mut().email).await
    }

    /// Labels of the room select, in display order.
    pub async fn room_options(&self) -> Vec<String> {
        self.app
            .with_update::<Resident, _>(|u| u.rooms_shared_collection().iter().map(Entity::label).collect())
            .await
            .unwrap_or_default()
    }

    pub async fn room_option_ids(&self) -> Vec<Option<i64>> {
        self.app
            .with_update::<Resident, _>(|u| u.rooms_shared_collection().iter().map(Entity::id).collect())
            .await
            .unwrap_or_default()
    }

    pub async fn room_select_last_option(&self) -> bool {
        self.app
            .with_update::<Resident, _>(|u| {
                let choice = u.room_options().last().cloned();
                select(&mut u.form_mut().room, choice)
            })
            .await
            .unwrap_or(false)
    }

    pub async fn room_select_option(&self, label: &str) -> bool {
        self.app
            .with_update::<Resident, _>(|u| {
                let choice = u.room_options().find_by_label(label).cloned();
                select(&mut u.form_mut().room, choice)
            })
            .await
            .unwrap_or(false)
    }

    pub async fn get_room_selected_option(&self) -> Option<String> {
        self.app
            .with_update::<Resident, _>(|u| u.form().room.value().map(Entity::label))
            .await
            .flatten()
    }
}
