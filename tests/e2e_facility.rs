//! Facility scenarios driven through the page objects against the in-memory
//! backend.

use facility_admin::app::{AdminApp, SaveResult};
use facility_admin::form::FACILITY_NAME_MAX_LENGTH;
use facility_admin::pages::{FacilityComponentsPage, FacilityUpdatePage, NavBarPage, e2e_credentials};
use facility_admin::route::EntityKind;
use facility_admin::testing::MockBackend;

struct Harness {
    backend: MockBackend,
    app: AdminApp,
    navbar: NavBarPage,
}

/// Sign in through the navbar, as a user would.
async fn signed_in() -> Harness {
    let (username, password) = e2e_credentials();
    let backend = MockBackend::spawn_with_credentials(&username, &password).await;
    let app = AdminApp::new(backend.client(), 20);
    let navbar = NavBarPage::new(app.clone());

    let sign_in = navbar.get_sign_in_page().await.unwrap();
    assert!(sign_in.is_displayed().await);
    sign_in.auto_sign_in_using(&username, &password).await.unwrap();
    assert!(navbar.entity_menu_visible().await);

    Harness { backend, app, navbar }
}

#[tokio::test]
async fn test_load_facilities() {
    let h = signed_in().await;
    h.navbar.go_to_entity(EntityKind::Facility).await.unwrap();

    let components = FacilityComponentsPage::new(h.app.clone());
    assert_eq!(components.get_title().await.as_deref(), Some("Facilities"));
    assert!(components.no_result().await);
}

#[tokio::test]
async fn test_load_create_page_and_cancel() {
    let h = signed_in().await;
    h.navbar.go_to_entity(EntityKind::Facility).await.unwrap();
    let components = FacilityComponentsPage::new(h.app.clone());

    assert!(components.click_on_create_button().await.unwrap());
    let update = FacilityUpdatePage::new(h.app.clone());
    assert_eq!(
        update.get_page_title().await.as_deref(),
        Some("Create or edit a Facility")
    );

    update.cancel().await.unwrap();
    assert!(components.is_displayed().await);
    assert!(h.backend.requests().iter().all(|r| !r.starts_with("POST /api/facilities")));
}

#[tokio::test]
async fn test_create_and_delete_facility() {
    let h = signed_in().await;
    h.backend.seed_facility("Sunrise Manor");
    h.navbar.go_to_entity(EntityKind::Facility).await.unwrap();
    let components = FacilityComponentsPage::new(h.app.clone());
    let before = components.count_delete_buttons().await;
    assert_eq!(before, 1);

    components.click_on_create_button().await.unwrap();
    let update = FacilityUpdatePage::new(h.app.clone());
    assert!(!update.save_button_enabled().await);
    update.set_facility_name_input("facilityName").await;
    assert_eq!(update.get_facility_name_input().await, "facilityName");
    assert!(update.save_button_enabled().await);

    let saved = update.save().await.unwrap();
    assert!(saved.is_saved(), "{:?}", saved);
    assert!(!update.is_displayed().await);
    assert_eq!(components.count_delete_buttons().await, before + 1);
    assert_eq!(
        components.row_labels().await.last().map(String::as_str),
        Some("facilityName")
    );

    let dialog = components.click_on_last_delete_button().await.unwrap();
    assert_eq!(
        dialog.get_dialog_title().await.as_deref(),
        Some("Are you sure you want to delete this Facility?")
    );
    assert!(dialog.click_on_confirm_button().await.unwrap());

    assert_eq!(components.get_title().await.as_deref(), Some("Facilities"));
    assert_eq!(components.count_delete_buttons().await, before);
    assert_eq!(h.backend.count::<facility_admin::model::Facility>(), 1);
}

#[tokio::test]
async fn test_cancelled_delete_keeps_row() {
    let h = signed_in().await;
    h.backend.seed_facility("Sunrise Manor");
    h.navbar.go_to_entity(EntityKind::Facility).await.unwrap();
    let components = FacilityComponentsPage::new(h.app.clone());

    let dialog = components.click_on_delete_button(0).await.unwrap();
    dialog.click_on_cancel_button().await;
    assert!(!dialog.click_on_confirm_button().await.unwrap());
    assert_eq!(components.count_delete_buttons().await, 1);
}

#[tokio::test]
async fn test_overlong_name_is_not_sent() {
    let h = signed_in().await;
    h.app.open("/facility/new").await.unwrap();
    let update = FacilityUpdatePage::new(h.app.clone());

    update
        .set_facility_name_input(&"x".repeat(FACILITY_NAME_MAX_LENGTH + 1))
        .await;
    assert!(!update.is_valid().await);

    match update.save().await.unwrap() {
        SaveResult::Invalid(errors) => assert!(!errors.get("facility_name").is_empty()),
        other => panic!("expected invalid form, got {:?}", other),
    }
    assert!(update.is_displayed().await);
    assert!(h.backend.requests().iter().all(|r| !r.starts_with("POST")));
}

#[tokio::test]
async fn test_sign_out_hides_entity_menu() {
    let h = signed_in().await;
    assert_eq!(h.navbar.entity_menu_items(), vec!["Facilities", "Rooms", "Residents"]);

    h.navbar.auto_sign_out().await.unwrap();
    assert!(!h.navbar.entity_menu_visible().await);

    h.navbar.go_to_entity(EntityKind::Facility).await.unwrap();
    assert!(h.app.is_sign_in().await);
}
