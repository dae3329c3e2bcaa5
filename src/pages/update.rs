use std::marker::PhantomData;

use crate::app::{AdminApp, SaveResult, ScreenEntity};
use crate::errors::ClientError;
use crate::form::{Control, FieldValue};
use crate::model::Entity;
use crate::update::UpdateComponent;

/// The create/edit form of `E`. Field accessors live with each entity.
pub struct UpdatePage<E> {
    pub(super) app: AdminApp,
    _entity: PhantomData<fn() -> E>,
}

impl<E: ScreenEntity> UpdatePage<E> {
    pub fn new(app: AdminApp) -> Self {
        Self {
            app,
            _entity: PhantomData,
        }
    }

    pub async fn is_displayed(&self) -> bool {
        self.app.with_update::<E, _>(|_| ()).await.is_some()
    }

    pub async fn get_page_title(&self) -> Option<String> {
        self.app
            .with_update::<E, _>(|update| update.page_title())
            .await
    }

    /// Whether the save button can be pressed: the form is valid and no save
    /// is in flight.
    pub async fn save_button_enabled(&self) -> bool {
        self.app
            .with_update::<E, _>(|update| update.can_save())
            .await
            .unwrap_or(false)
    }

    pub async fn is_saving(&self) -> bool {
        self.app
            .with_update::<E, _>(|update| update.is_saving())
            .await
            .unwrap_or(false)
    }

    pub async fn save(&self) -> Result<SaveResult, ClientError> {
        self.app.save::<E>().await
    }

    pub async fn cancel(&self) -> Result<(), ClientError> {
        self.app.cancel::<E>().await
    }

    pub(super) async fn set_input<T>(&self, value: &str, control: impl FnOnce(&mut E::Update) -> &mut Control<T>)
    where
        T: FieldValue + std::str::FromStr,
    {
        self.app
            .with_update::<E, _>(|update| control(update).set_input(value))
            .await;
    }

    pub(super) async fn get_input<T>(&self, control: impl FnOnce(&mut E::Update) -> &mut Control<T>) -> String
    where
        T: FieldValue + std::str::FromStr + ToString,
    {
        self.app
            .with_update::<E, _>(|update| control(update).input())
            .await
            .unwrap_or_default()
    }
}

/// Put `choice` into a relationship control. A disabled control cannot be
/// changed.
pub(super) fn select<R: Entity + FieldValue>(control: &mut Control<R>, choice: Option<R>) -> bool {
    if control.is_disabled() {
        return false;
    }
    match choice {
        Some(option) => {
            control.set_value(Some(option));
            true
        }
        None => false,
    }
}
