use std::marker::PhantomData;

use crate::app::{AdminApp, ScreenEntity};
use crate::errors::ClientError;
use crate::model::{Facility, Resident, Room};

/// The delete confirmation opened from the list of `E`.
pub struct DeleteDialogPage<E> {
    app: AdminApp,
    _entity: PhantomData<fn() -> E>,
}

pub type FacilityDeleteDialog = DeleteDialogPage<Facility>;
pub type RoomDeleteDialog = DeleteDialogPage<Room>;
pub type ResidentDeleteDialog = DeleteDialogPage<Resident>;

impl<E: ScreenEntity> DeleteDialogPage<E> {
    pub fn new(app: AdminApp) -> Self {
        Self {
            app,
            _entity: PhantomData,
        }
    }

    pub async fn get_dialog_title(&self) -> Option<String> {
        self.app.dialog_title::<E>().await
    }

    /// Returns `false` when the dialog was already closed.
    pub async fn click_on_confirm_button(&self) -> Result<bool, ClientError> {
        self.app.confirm_delete::<E>().await
    }

    pub async fn click_on_cancel_button(&self) {
        self.app.cancel_delete::<E>().await
    }
}
