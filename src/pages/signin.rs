use crate::app::AdminApp;
use crate::errors::ClientError;

pub struct SignInPage {
    app: AdminApp,
}

impl SignInPage {
    pub fn new(app: AdminApp) -> Self {
        Self { app }
    }

    pub async fn is_displayed(&self) -> bool {
        self.app.is_sign_in().await
    }

    /// Fill in and submit the sign-in form.
    pub async fn auto_sign_in_using(&self, username: &str, password: &str) -> Result<(), ClientError> {
        self.app.sign_in(username, password).await
    }
}
