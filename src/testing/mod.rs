//! In-memory stand-in for the REST backend, for tests.
//!
//! `MockBackend::spawn()` serves the full contract (CRUD, paging headers,
//! search, scoped listings, bearer authentication) on an ephemeral port.
//! Helpers seed records, hide records from listings, inject failures, and
//! expose the request log so tests can assert what the client sent.

mod backend;

pub use backend::{MockState, router};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::model::{Entity, Facility, Resident, Room};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin";

/// A running in-memory backend. Shuts down when dropped.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        Self::spawn_with_credentials(DEFAULT_USERNAME, DEFAULT_PASSWORD).await
    }

    /// # Panics
    /// When no local port can be bound.
    pub async fn spawn_with_credentials(username: &str, password: &str) -> Self {
        let state = Arc::new(MockState::new(username, password));
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await;
        });
        Self {
            addr,
            state,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &Arc<MockState> {
        &self.state
    }

    /// A client pointed at this backend, not yet signed in.
    ///
    /// # Panics
    /// Never for the loopback URL this backend serves on.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url(), Duration::from_secs(5)).expect("mock backend URL")
    }

    /// # Panics
    /// When the default credentials are rejected.
    pub async fn signed_in_client(&self) -> ApiClient {
        let client = self.client();
        client
            .authenticate(&self.state.username, &self.state.password)
            .await
            .expect("sign in to mock backend");
        client
    }

    pub fn seed_facility(&self, name: &str) -> Facility {
        self.state
            .insert(Facility::new(None, Some(name.to_string())))
    }

    pub fn seed_room(&self, room_number: i64, facility: &Facility) -> Room {
        self.state
            .insert(Room::new(None, Some(room_number), Some(facility.clone())))
    }

    pub fn seed_resident(&self, name: &str, phone_number: i64, room: &Room) -> Resident {
        self.state.insert(Resident::new(
            None,
            Some(name.to_string()),
            Some(phone_number),
            None,
            Some(room.clone()),
        ))
    }

    /// Keep a record out of list and search responses while `find` still
    /// returns it.
    pub fn hide_from_listing<E: Entity>(&self, id: i64) {
        self.state.hide::<E>(id);
    }

    /// Make the next create/update/delete request fail with `status`.
    pub fn fail_next_write(&self, status: StatusCode) {
        self.state.fail_next_write(status);
    }

    /// `METHOD /path` of every request received, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests()
    }

    pub fn count<E: Entity>(&self) -> usize {
        self.state.count::<E>()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
