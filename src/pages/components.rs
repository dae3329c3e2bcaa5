use std::marker::PhantomData;

use crate::app::{AdminApp, ScreenEntity};
use crate::errors::ClientError;
use crate::model::{Entity, Facility, Resident, Room};
use crate::views::ListView;

use super::DeleteDialogPage;

/// The list screen of `E`.
pub struct ComponentsPage<E> {
    app: AdminApp,
    _entity: PhantomData<fn() -> E>,
}

pub type FacilityComponentsPage = ComponentsPage<Facility>;
pub type RoomComponentsPage = ComponentsPage<Room>;
pub type ResidentComponentsPage = ComponentsPage<Resident>;

impl<E: ScreenEntity> ComponentsPage<E> {
    pub fn new(app: AdminApp) -> Self {
        Self {
            app,
            _entity: PhantomData,
        }
    }

    pub async fn is_displayed(&self) -> bool {
        self.app.with_list::<E, _>(|_| ()).await.is_some()
    }

    /// The list title, or `None` when another screen is shown.
    pub async fn get_title(&self) -> Option<String> {
        self.app
            .with_list::<E, _>(|list| list.title().to_string())
            .await
    }

    pub async fn count_delete_buttons(&self) -> usize {
        self.app
            .with_list::<E, _>(ListView::delete_buttons)
            .await
            .unwrap_or(0)
    }

    pub async fn no_result(&self) -> bool {
        self.app
            .with_list::<E, _>(ListView::no_result)
            .await
            .unwrap_or(false)
    }

    /// Rows as displayed.
    pub async fn entities(&self) -> Vec<E> {
        self.app
            .with_list::<E, _>(|list| list.items().to_vec())
            .await
            .unwrap_or_default()
    }

    pub async fn row_labels(&self) -> Vec<String> {
        self.entities().await.iter().map(Entity::label).collect()
    }

    pub async fn click_on_create_button(&self) -> Result<bool, ClientError> {
        self.app.click_create::<E>().await
    }

    pub async fn click_on_last_delete_button(&self) -> Option<DeleteDialogPage<E>> {
        self.app
            .open_last_delete_dialog::<E>()
            .await
            .then(|| DeleteDialogPage::new(self.app.clone()))
    }

    pub async fn click_on_delete_button(&self, row: usize) -> Option<DeleteDialogPage<E>> {
        self.app
            .open_delete_dialog::<E>(row)
            .await
            .then(|| DeleteDialogPage::new(self.app.clone()))
    }

    pub async fn search(&self, query: &str) -> Result<bool, ClientError> {
        self.app.search::<E>(query).await
    }
}
