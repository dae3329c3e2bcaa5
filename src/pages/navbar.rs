use crate::app::{AdminApp, LOGIN_ROUTE};
use crate::errors::ClientError;
use crate::route::EntityKind;

use super::SignInPage;

pub struct NavBarPage {
    app: AdminApp,
}

impl NavBarPage {
    pub fn new(app: AdminApp) -> Self {
        Self { app }
    }

    /// The entity menu is offered to signed-in users only.
    pub async fn entity_menu_visible(&self) -> bool {
        self.app.is_authenticated().await
    }

    pub fn entity_menu_items(&self) -> Vec<&'static str> {
        EntityKind::ALL.iter().map(EntityKind::title).collect()
    }

    pub async fn get_sign_in_page(&self) -> Result<SignInPage, ClientError> {
        self.app.open(LOGIN_ROUTE).await?;
        Ok(SignInPage::new(self.app.clone()))
    }

    /// Follow the entity menu entry for `kind` to its list.
    pub async fn go_to_entity(&self, kind: EntityKind) -> Result<(), ClientError> {
        self.app.open(&format!("/{}", kind.segment())).await
    }

    pub async fn auto_sign_out(&self) -> Result<(), ClientError> {
        self.app.sign_out().await
    }
}
