//! Binary-level tests for the `facility-admin` CLI.

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use facility_admin::model::{Facility, Room};
use facility_admin::testing::MockBackend;

/// A command isolated from the caller's environment and working directory.
fn admin(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("facility-admin");
    cmd.current_dir(dir.path())
        .env_remove("FACILITY_ADMIN_API_URL")
        .env_remove("FACILITY_ADMIN_PAGE_SIZE")
        .env_remove("FACILITY_ADMIN_LOG")
        .env_remove("E2E_USERNAME")
        .env_remove("E2E_PASSWORD");
    cmd
}

/// Run `args` against `backend` off the async runtime that serves it.
async fn run_against(backend: &MockBackend, args: &[&str]) -> assert_cmd::assert::Assert {
    let url = backend.base_url();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let output = tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        admin(&dir)
            .args(["--api-url", &url, "--username", "admin", "--password", "admin"])
            .args(&args)
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    output.assert()
}

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        let dir = TempDir::new().unwrap();
        admin(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("facility"))
            .stdout(predicate::str::contains("resident"));
    }

    #[test]
    fn test_version() {
        let dir = TempDir::new().unwrap();
        admin(&dir).arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        let dir = TempDir::new().unwrap();
        admin(&dir).arg("ward").assert().failure();
    }
}

mod config {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = TempDir::new().unwrap();
        admin(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No facility-admin.toml found"))
            .stdout(predicate::str::contains("page_size = 20"));
    }

    #[test]
    fn test_config_show_reads_file_and_masks_password() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("facility-admin.toml"),
            r#"
[api]
base_url = "http://backend.test:9000"

[auth]
username = "nurse"
password = "s3cret"

[list]
page_size = 5
"#,
        )
        .unwrap();

        admin(&dir)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("Config file:"))
            .stdout(predicate::str::contains("http://backend.test:9000"))
            .stdout(predicate::str::contains("username = \"nurse\""))
            .stdout(predicate::str::contains("page_size = 5"))
            .stdout(predicate::str::contains("s3cret").not());
    }

    #[test]
    fn test_cli_flags_override_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("facility-admin.toml"),
            "[api]\nbase_url = \"http://from-file:1\"\n",
        )
        .unwrap();

        admin(&dir)
            .args(["--api-url", "http://from-flag:2", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://from-flag:2"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = TempDir::new().unwrap();
        admin(&dir)
            .args(["--config", "nope.toml", "config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load configuration"));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        admin(&dir)
            .env("FACILITY_ADMIN_PAGE_SIZE", "0")
            .args(["config", "show"])
            .assert()
            .failure();
    }
}

mod against_backend {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_login() {
        let backend = MockBackend::spawn().await;
        run_against(&backend, &["login"])
            .await
            .success()
            .stdout(predicate::str::contains("Signed in"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_login_with_bad_password_fails() {
        let backend = MockBackend::spawn_with_credentials("admin", "other").await;
        run_against(&backend, &["login"])
            .await
            .failure()
            .stderr(predicate::str::contains("Sign-in as 'admin'"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_facility_list_and_create() {
        let backend = MockBackend::spawn().await;
        backend.seed_facility("Sunrise Manor");

        run_against(&backend, &["facility", "list"])
            .await
            .success()
            .stdout(predicate::str::contains("Sunrise Manor"));

        run_against(&backend, &["facility", "create", "--name", "Lakeside"])
            .await
            .success()
            .stdout(predicate::str::contains("Created Facility"));
        assert_eq!(backend.count::<Facility>(), 2);

        run_against(&backend, &["facility", "search", "lake"])
            .await
            .success()
            .stdout(predicate::str::contains("Lakeside"))
            .stdout(predicate::str::contains("Sunrise Manor").not());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_list_last_addressable_page() {
        let backend = MockBackend::spawn().await;
        backend.seed_facility("Sunrise Manor");

        run_against(&backend, &["facility", "list", "--page", "4294967295", "--size", "1"])
            .await
            .success()
            .stdout(predicate::str::contains("No Facilities found"))
            .stdout(predicate::str::contains("More results").not());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_room_create_without_facility_is_rejected_locally() {
        let backend = MockBackend::spawn().await;

        run_against(&backend, &["room", "create", "--number", "101"])
            .await
            .failure()
            .stderr(predicate::str::contains("facility"));
        assert_eq!(backend.count::<Room>(), 0);
        assert!(backend.requests().iter().all(|r| !r.starts_with("POST /api/rooms")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_room_create_and_edit() {
        let backend = MockBackend::spawn().await;
        let north = backend.seed_facility("North Wing");
        let south = backend.seed_facility("South Wing");

        let north_id = north.id.unwrap().to_string();
        run_against(&backend, &["room", "create", "--number", "101", "--facility", &north_id])
            .await
            .success();
        assert_eq!(backend.count::<Room>(), 1);

        // Ids are allocated across all tables: 1 and 2 went to the facilities.
        let south_id = south.id.unwrap().to_string();
        run_against(&backend, &["room", "edit", "3", "--facility", &south_id])
            .await
            .success()
            .stdout(predicate::str::contains("Updated Room"));
        let requests = backend.requests();
        assert!(requests.contains(&"PATCH /api/rooms/3".to_string()));
        assert!(requests.iter().all(|r| !r.starts_with("PUT")));

        run_against(&backend, &["room", "list", "--facility", &south_id])
            .await
            .success()
            .stdout(predicate::str::contains("101"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_resident_edit_keeps_unedited_fields() {
        let backend = MockBackend::spawn().await;
        let facility = backend.seed_facility("North Wing");
        let room = backend.seed_room(12, &facility);
        let resident = backend.seed_resident("Ada", 5551234, &room);
        let id = resident.id.unwrap().to_string();

        run_against(&backend, &["resident", "edit", &id, "--name", "Ada Lovelace"])
            .await
            .success()
            .stdout(predicate::str::contains("Updated Resident"));
        assert!(backend.requests().contains(&format!("PATCH /api/residents/{}", id)));

        run_against(&backend, &["resident", "show", &id])
            .await
            .success()
            .stdout(predicate::str::contains("Ada Lovelace"))
            .stdout(predicate::str::contains("5551234"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_invalid_edit_sends_no_patch() {
        let backend = MockBackend::spawn().await;
        let facility = backend.seed_facility("North Wing");
        let id = facility.id.unwrap().to_string();
        let long_name = "x".repeat(201);

        run_against(&backend, &["facility", "edit", &id, "--name", &long_name])
            .await
            .failure()
            .stderr(predicate::str::contains("facility_name"));
        assert!(backend.requests().iter().all(|r| !r.starts_with("PATCH")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_show_unknown_record_fails() {
        let backend = MockBackend::spawn().await;
        run_against(&backend, &["resident", "show", "42"])
            .await
            .failure()
            .stderr(predicate::str::contains("Failed to load Resident 42"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_forced_delete() {
        let backend = MockBackend::spawn().await;
        let facility = backend.seed_facility("Sunrise Manor");
        let id = facility.id.unwrap().to_string();

        run_against(&backend, &["facility", "delete", &id, "--force"])
            .await
            .success()
            .stdout(predicate::str::contains("Deleted Facility"));
        assert_eq!(backend.count::<Facility>(), 0);
    }
}
