//! Room scenarios: the facility relationship and facility-scoped lists.

use facility_admin::app::{AdminApp, SaveResult};
use facility_admin::form::ROOM_NUMBER_MAX;
use facility_admin::model::Room;
use facility_admin::pages::{RoomComponentsPage, RoomUpdatePage, SignInPage, e2e_credentials};
use facility_admin::testing::MockBackend;

async fn signed_in(backend: &MockBackend) -> AdminApp {
    let (username, password) = e2e_credentials();
    let app = AdminApp::new(backend.client(), 20);
    app.open("/room").await.unwrap();
    let sign_in = SignInPage::new(app.clone());
    assert!(sign_in.is_displayed().await);
    sign_in.auto_sign_in_using(&username, &password).await.unwrap();
    app
}

async fn backend() -> MockBackend {
    let (username, password) = e2e_credentials();
    MockBackend::spawn_with_credentials(&username, &password).await
}

#[tokio::test]
async fn test_sign_in_returns_to_guarded_list() {
    let backend = backend().await;
    let app = signed_in(&backend).await;
    let components = RoomComponentsPage::new(app);
    assert_eq!(components.get_title().await.as_deref(), Some("Rooms"));
}

#[tokio::test]
async fn test_create_room_with_chosen_facility() {
    let backend = backend().await;
    backend.seed_facility("North Wing");
    backend.seed_facility("South Wing");
    let app = signed_in(&backend).await;
    let components = RoomComponentsPage::new(app.clone());
    let before = components.count_delete_buttons().await;

    components.click_on_create_button().await.unwrap();
    let update = RoomUpdatePage::new(app.clone());
    assert_eq!(update.get_page_title().await.as_deref(), Some("Create or edit a Room"));
    assert_eq!(update.facility_options().await, vec!["North Wing", "South Wing"]);

    update.set_room_number_input("101").await;
    assert_eq!(update.get_room_number_input().await, "101");
    assert!(update.facility_select_last_option().await);
    assert_eq!(
        update.get_facility_selected_option().await.as_deref(),
        Some("South Wing")
    );

    assert!(update.save().await.unwrap().is_saved());
    assert_eq!(components.count_delete_buttons().await, before + 1);

    let created = components.entities().await.pop().unwrap();
    assert_eq!(created.room_number, Some(101));
    assert_eq!(
        created.facility.and_then(|f| f.facility_name).as_deref(),
        Some("South Wing")
    );

    let dialog = components.click_on_last_delete_button().await.unwrap();
    assert_eq!(
        dialog.get_dialog_title().await.as_deref(),
        Some("Are you sure you want to delete this Room?")
    );
    dialog.click_on_confirm_button().await.unwrap();
    assert_eq!(components.count_delete_buttons().await, before);
}

#[tokio::test]
async fn test_room_without_facility_is_invalid() {
    let backend = backend().await;
    backend.seed_facility("North Wing");
    let app = signed_in(&backend).await;
    app.open("/room/new").await.unwrap();
    let update = RoomUpdatePage::new(app.clone());

    update.set_room_number_input("101").await;
    assert!(!update.save_button_enabled().await);

    let SaveResult::Invalid(errors) = update.save().await.unwrap() else {
        panic!("expected the form to be rejected locally");
    };
    assert!(!errors.get("facility").is_empty());
    assert!(errors.get("room_number").is_empty());
    assert!(update.is_displayed().await);
    assert_eq!(backend.count::<Room>(), 0);
}

#[tokio::test]
async fn test_room_number_above_max_is_invalid() {
    let backend = backend().await;
    backend.seed_facility("North Wing");
    let app = signed_in(&backend).await;
    app.open("/room/new").await.unwrap();
    let update = RoomUpdatePage::new(app.clone());

    update.set_room_number_input(&(ROOM_NUMBER_MAX + 1).to_string()).await;
    update.facility_select_option("North Wing").await;

    let SaveResult::Invalid(errors) = update.save().await.unwrap() else {
        panic!("expected the form to be rejected locally");
    };
    assert!(!errors.get("room_number").is_empty());
    assert!(errors.get("facility").is_empty());
}

#[tokio::test]
async fn test_create_from_facility_scoped_list_locks_facility() {
    let backend = backend().await;
    let north = backend.seed_facility("North Wing");
    let south = backend.seed_facility("South Wing");
    backend.seed_room(1, &south);
    let app = signed_in(&backend).await;

    let north_id = north.id.unwrap();
    app.open(&format!("/room?facility_id={}", north_id)).await.unwrap();
    let components = RoomComponentsPage::new(app.clone());
    assert!(components.no_result().await);

    components.click_on_create_button().await.unwrap();
    assert_eq!(
        app.current_url().await,
        format!("/room/new?facility_id={}&facility_id_disable=true", north_id)
    );

    let update = RoomUpdatePage::new(app.clone());
    assert!(update.facility_select_disabled().await);
    assert_eq!(
        update.get_facility_selected_option().await.as_deref(),
        Some("North Wing")
    );
    assert!(!update.facility_select_option("South Wing").await);

    update.set_room_number_input("7").await;
    assert!(update.save().await.unwrap().is_saved());

    assert_eq!(components.row_labels().await, vec!["7"]);
    assert_eq!(backend.count::<Room>(), 2);
}
