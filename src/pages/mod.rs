//! Page objects over the headless session, for end-to-end scenarios.
//!
//! | Page                         | Screen                                   |
//! |------------------------------|------------------------------------------|
//! | `NavBarPage`                 | navigation bar, entity menu, account     |
//! | `SignInPage`                 | sign-in form                             |
//! | `ComponentsPage<E>`          | list of `E` with create/delete buttons   |
//! | `DeleteDialogPage<E>`        | delete confirmation of `E`               |
//! | `UpdatePage<E>`              | create/edit form of `E`                  |

mod components;
mod delete_dialog;
mod facility;
mod navbar;
mod resident;
mod room;
mod signin;
mod update;

pub use components::{ComponentsPage, FacilityComponentsPage, ResidentComponentsPage, RoomComponentsPage};
pub use delete_dialog::{DeleteDialogPage, FacilityDeleteDialog, ResidentDeleteDialog, RoomDeleteDialog};
pub use facility::FacilityUpdatePage;
pub use navbar::NavBarPage;
pub use resident::ResidentUpdatePage;
pub use room::RoomUpdatePage;
pub use signin::SignInPage;
pub use update::UpdatePage;

pub const USERNAME_VAR: &str = "E2E_USERNAME";
pub const PASSWORD_VAR: &str = "E2E_PASSWORD";
const DEFAULT_CREDENTIAL: &str = "admin";

/// Sign-in credentials for scenarios, from `E2E_USERNAME` / `E2E_PASSWORD`.
pub fn e2e_credentials() -> (String, String) {
    credentials_from(|key| std::env::var(key).ok())
}

fn credentials_from<F: Fn(&str) -> Option<String>>(lookup: F) -> (String, String) {
    let username = lookup(USERNAME_VAR).unwrap_or_else(|| DEFAULT_CREDENTIAL.to_string());
    let password = lookup(PASSWORD_VAR).unwrap_or_else(|| DEFAULT_CREDENTIAL.to_string());
    (username, password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_default_to_admin() {
        assert_eq!(
            credentials_from(|_| None),
            ("admin".to_string(), "admin".to_string())
        );
    }

    #[test]
    fn test_credentials_from_environment() {
        let (user, pass) = credentials_from(|key| match key {
            USERNAME_VAR => Some("nurse".to_string()),
            _ => None,
        });
        assert_eq!(user, "nurse");
        assert_eq!(pass, "admin");
    }
}
