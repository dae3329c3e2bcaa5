use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::api::pagination::TOTAL_COUNT_HEADER;
use crate::form::{FACILITY_NAME_MAX_LENGTH, PHONE_NUMBER_MAX, ROOM_NUMBER_MAX};
use crate::model::{Entity, Facility, Resident, Room};

const AUTHENTICATE_PATH: &str = "/api/authenticate";
const DEFAULT_PAGE_SIZE: usize = 20;

// ── State ────────────────────────────────────────────────────────────

#[derive(Default)]
pub(super) struct Store {
    facilities: BTreeMap<i64, Facility>,
    rooms: BTreeMap<i64, Room>,
    residents: BTreeMap<i64, Resident>,
    next_id: i64,
    hidden: HashSet<(&'static str, i64)>,
    fail_next_write: Option<StatusCode>,
    requests: Vec<String>,
}

impl Store {
    fn is_hidden(&self, resource: &'static str, id: Option<i64>) -> bool {
        id.is_some_and(|id| self.hidden.contains(&(resource, id)))
    }

    fn take_failure(&mut self) -> Result<(), MockError> {
        match self.fail_next_write.take() {
            Some(status) => Err(MockError::Injected(status)),
            None => Ok(()),
        }
    }

    fn insert<E: Stored>(&mut self, mut entity: E) -> E {
        self.next_id += 1;
        let id = self.next_id;
        entity.set_id(Some(id));
        E::table_mut(self).insert(id, entity.clone());
        entity.hydrate(self)
    }
}

/// Shared state of the mock backend.
pub struct MockState {
    pub(super) username: String,
    pub(super) password: String,
    token: String,
    store: Mutex<Store>,
}

impl MockState {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            token: format!("mock-token-for-{}", username),
            store: Mutex::new(Store::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn insert<E: Stored>(&self, entity: E) -> E {
        self.lock().insert(entity)
    }

    pub fn hide<E: Entity>(&self, id: i64) {
        self.lock().hidden.insert((E::RESOURCE, id));
    }

    pub fn fail_next_write(&self, status: StatusCode) {
        self.lock().fail_next_write = Some(status);
    }

    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    pub fn count<E: Entity>(&self) -> usize {
        let store = self.lock();
        match E::RESOURCE {
            "facilities" => store.facilities.len(),
            "rooms" => store.rooms.len(),
            "residents" => store.residents.len(),
            _ => 0,
        }
    }
}

// ── Errors ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub(super) enum MockError {
    BadRequest { title: String, message: String },
    NotFound,
    Conflict(String),
    Unauthorized,
    Injected(StatusCode),
}

impl MockError {
    fn bad_request(title: &str, key: &str) -> Self {
        Self::BadRequest {
            title: title.to_string(),
            message: format!("error.{}", key),
        }
    }

    fn invalid_field(field: &str, constraint: &str) -> Self {
        Self::BadRequest {
            title: "Method argument not valid".to_string(),
            message: format!("error.validation: {} {}", field, constraint),
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self {
            MockError::BadRequest { title, message } => (StatusCode::BAD_REQUEST, title, message),
            MockError::NotFound => (
                StatusCode::NOT_FOUND,
                "Not Found".to_string(),
                "error.http.404".to_string(),
            ),
            MockError::Conflict(message) => (StatusCode::CONFLICT, "Conflict".to_string(), message),
            MockError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized".to_string(),
                "error.http.401".to_string(),
            ),
            MockError::Injected(status) => (
                status,
                status.canonical_reason().unwrap_or("Error").to_string(),
                format!("error.http.{}", status.as_u16()),
            ),
        };
        let body = serde_json::json!({
            "title": title,
            "status": status.as_u16(),
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}

// ── Per-entity storage rules ─────────────────────────────────────────

pub(super) trait Stored: Entity {
    fn table(store: &Store) -> &BTreeMap<i64, Self>;

    fn table_mut(store: &mut Store) -> &mut BTreeMap<i64, Self>;

    /// Field constraints and relation targets.
    fn check(&self, store: &Store) -> Result<(), MockError>;

    /// Copy with embedded relations replaced by their stored state.
    fn hydrate(&self, store: &Store) -> Self;

    /// Whether another record points at record `id`.
    fn referenced(store: &Store, id: i64) -> bool;

    /// Copy the fields present on `patch`.
    fn merge(&mut self, patch: Self);

    fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() || query == "*" {
            return true;
        }
        self.fields()
            .iter()
            .any(|(_, value)| value.to_lowercase().contains(&query))
    }
}

fn relation_exists<R: Stored>(store: &Store, related: Option<&R>, field: &str) -> Result<(), MockError> {
    let Some(related) = related else {
        return Err(MockError::invalid_field(field, "must not be null"));
    };
    match related.id() {
        Some(id) if R::table(store).contains_key(&id) => Ok(()),
        _ => Err(MockError::bad_request("Related record not found", &format!("{}notfound", field))),
    }
}

impl Stored for Facility {
    fn table(store: &Store) -> &BTreeMap<i64, Self> {
        &store.facilities
    }

    fn table_mut(store: &mut Store) -> &mut BTreeMap<i64, Self> {
        &mut store.facilities
    }

    fn check(&self, _store: &Store) -> Result<(), MockError> {
        match &self.facility_name {
            None => Err(MockError::invalid_field("facility_name", "must not be null")),
            Some(name) if name.chars().count() > FACILITY_NAME_MAX_LENGTH => Err(
                MockError::invalid_field("facility_name", "size must be between 0 and 200"),
            ),
            Some(_) => Ok(()),
        }
    }

    fn hydrate(&self, _store: &Store) -> Self {
        self.clone()
    }

    fn referenced(store: &Store, id: i64) -> bool {
        store
            .rooms
            .values()
            .any(|room| room.facility.as_ref().and_then(|f| f.id) == Some(id))
    }

    fn merge(&mut self, patch: Self) {
        if patch.facility_name.is_some() {
            self.facility_name = patch.facility_name;
        }
    }
}

impl Stored for Room {
    fn table(store: &Store) -> &BTreeMap<i64, Self> {
        &store.rooms
    }

    fn table_mut(store: &mut Store) -> &mut BTreeMap<i64, Self> {
        &mut store.rooms
    }

    fn check(&self, store: &Store) -> Result<(), MockError> {
        match self.room_number {
            None => return Err(MockError::invalid_field("room_number", "must not be null")),
            Some(n) if n > ROOM_NUMBER_MAX => {
                return Err(MockError::invalid_field(
                    "room_number",
                    "must be less than or equal to 10000",
                ));
            }
            Some(_) => {}
        }
        relation_exists(store, self.facility.as_ref(), "facility")
    }

    fn hydrate(&self, store: &Store) -> Self {
        let facility = self
            .facility
            .as_ref()
            .and_then(|f| f.id)
            .and_then(|id| store.facilities.get(&id).cloned());
        Self {
            facility,
            ..self.clone()
        }
    }

    fn referenced(store: &Store, id: i64) -> bool {
        store
            .residents
            .values()
            .any(|resident| resident.room.as_ref().and_then(|r| r.id) == Some(id))
    }

    fn merge(&mut self, patch: Self) {
        if patch.room_number.is_some() {
            self.room_number = patch.room_number;
        }
        if patch.facility.is_some() {
            self.facility = patch.facility;
        }
    }
}

impl Stored for Resident {
    fn table(store: &Store) -> &BTreeMap<i64, Self> {
        &store.residents
    }

    fn table_mut(store: &mut Store) -> &mut BTreeMap<i64, Self> {
        &mut store.residents
    }

    fn check(&self, store: &Store) -> Result<(), MockError> {
        if self.name.is_none() {
            return Err(MockError::invalid_field("name", "must not be null"));
        }
        match self.phone_number {
            None => return Err(MockError::invalid_field("phone_number", "must not be null")),
            Some(n) if n > PHONE_NUMBER_MAX => {
                return Err(MockError::invalid_field(
                    "phone_number",
                    "must be less than or equal to 9999999999999",
                ));
            }
            Some(_) => {}
        }
        relation_exists(store, self.room.as_ref(), "room")
    }

    /// The embedded room is served without its facility.
    fn hydrate(&self, store: &Store) -> Self {
        let room = self
            .room
            .as_ref()
            .and_then(|r| r.id)
            .and_then(|id| store.rooms.get(&id))
            .map(|room| Room {
                facility: None,
                ..room.clone()
            });
        Self {
            room,
            ..self.clone()
        }
    }

    fn referenced(_store: &Store, _id: i64) -> bool {
        false
    }

    fn merge(&mut self, patch: Self) {
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.phone_number.is_some() {
            self.phone_number = patch.phone_number;
        }
        if patch.email.is_some() {
            self.email = patch.email;
        }
        if patch.room.is_some() {
            self.room = patch.room;
        }
    }
}

// ── Paging ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ListQuery {
    page: usize,
    size: usize,
    descending: bool,
    query: Option<String>,
}

impl ListQuery {
    /// Repeated keys are allowed, as `sort` may be sent more than once.
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut parsed = ListQuery {
            size: DEFAULT_PAGE_SIZE,
            ..Default::default()
        };
        for (key, value) in pairs {
            match key.as_str() {
                "page" => parsed.page = value.parse().unwrap_or(0),
                "size" => parsed.size = value.parse().unwrap_or(DEFAULT_PAGE_SIZE).max(1),
                "sort" => parsed.descending = value == "id,desc",
                "query" => parsed.query = Some(value.clone()),
                _ => {}
            }
        }
        parsed
    }
}

fn paged<E: Stored>(store: &Store, query: &ListQuery, keep: impl Fn(&E) -> bool) -> Response {
    let mut items: Vec<E> = E::table(store)
        .values()
        .filter(|e| !store.is_hidden(E::RESOURCE, e.id()))
        .filter(|e| keep(e))
        .map(|e| e.hydrate(store))
        .collect();
    if query.descending {
        items.reverse();
    }
    let total = items.len();
    let page: Vec<E> = items
        .into_iter()
        .skip(query.page.saturating_mul(query.size))
        .take(query.size)
        .collect();
    ([(TOTAL_COUNT_HEADER, total.to_string())], Json(page)).into_response()
}

// ── Handlers ─────────────────────────────────────────────────────────

type SharedState = Arc<MockState>;

async fn list<E: Stored>(
    State(state): State<SharedState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = ListQuery::from_pairs(&pairs);
    paged::<E>(&state.lock(), &query, |_| true)
}

async fn search<E: Stored>(
    State(state): State<SharedState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = ListQuery::from_pairs(&pairs);
    let text = query.query.clone().unwrap_or_default();
    paged::<E>(&state.lock(), &query, |e| e.matches(&text))
}

async fn rooms_of_facility(
    State(state): State<SharedState>,
    Path(facility_id): Path<i64>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = ListQuery::from_pairs(&pairs);
    paged::<Room>(&state.lock(), &query, |room| {
        room.facility.as_ref().and_then(|f| f.id) == Some(facility_id)
    })
}

async fn residents_of_room(
    State(state): State<SharedState>,
    Path(room_id): Path<i64>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = ListQuery::from_pairs(&pairs);
    paged::<Resident>(&state.lock(), &query, |resident| {
        resident.room.as_ref().and_then(|r| r.id) == Some(room_id)
    })
}

async fn find<E: Stored>(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<E>, MockError> {
    let store = state.lock();
    let entity = E::table(&store).get(&id).ok_or(MockError::NotFound)?;
    Ok(Json(entity.hydrate(&store)))
}

async fn create<E: Stored>(
    State(state): State<SharedState>,
    Json(entity): Json<E>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = state.lock();
    store.take_failure()?;
    if entity.id().is_some() {
        return Err(MockError::bad_request(
            &format!("A new {} cannot already have an ID", E::ROUTE),
            "idexists",
        ));
    }
    entity.check(&store)?;
    let saved = store.insert(entity);
    let location = format!("/api/{}/{}", E::RESOURCE, saved.id().unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(saved)))
}

/// Shared identifier checks of PUT and PATCH.
fn check_identifier<E: Stored>(store: &Store, path_id: i64, entity: &E) -> Result<(), MockError> {
    let Some(body_id) = entity.id() else {
        return Err(MockError::bad_request("Invalid id", "idnull"));
    };
    if body_id != path_id {
        return Err(MockError::bad_request("Invalid ID", "idinvalid"));
    }
    if !E::table(store).contains_key(&path_id) {
        return Err(MockError::bad_request("Entity not found", "idnotfound"));
    }
    Ok(())
}

async fn update<E: Stored>(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(entity): Json<E>,
) -> Result<Json<E>, MockError> {
    let mut store = state.lock();
    store.take_failure()?;
    check_identifier(&store, id, &entity)?;
    entity.check(&store)?;
    E::table_mut(&mut store).insert(id, entity.clone());
    Ok(Json(entity.hydrate(&store)))
}

async fn partial_update<E: Stored>(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(patch): Json<E>,
) -> Result<Json<E>, MockError> {
    let mut store = state.lock();
    store.take_failure()?;
    check_identifier(&store, id, &patch)?;
    let mut merged = E::table(&store)
        .get(&id)
        .cloned()
        .ok_or(MockError::NotFound)?;
    merged.merge(patch);
    merged.check(&store)?;
    E::table_mut(&mut store).insert(id, merged.clone());
    Ok(Json(merged.hydrate(&store)))
}

async fn delete<E: Stored>(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, MockError> {
    let mut store = state.lock();
    store.take_failure()?;
    if !E::table(&store).contains_key(&id) {
        return Err(MockError::NotFound);
    }
    if E::referenced(&store, id) {
        return Err(MockError::Conflict(format!("error.{}.inuse", E::ROUTE)));
    }
    E::table_mut(&mut store).remove(&id);
    store.hidden.remove(&(E::RESOURCE, id));
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn authenticate(
    State(state): State<SharedState>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, MockError> {
    if body.username != state.username || body.password != state.password {
        return Err(MockError::Unauthorized);
    }
    let authorization = format!("Bearer {}", state.token);
    Ok((
        [(header::AUTHORIZATION, authorization)],
        Json(serde_json::json!({"id_token": state.token})),
    ))
}

/// Records every request, then rejects API calls without the session token.
async fn track_and_authorize(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    state
        .lock()
        .requests
        .push(format!("{} {}", request.method(), path));

    if path != AUTHENTICATE_PATH {
        let expected = format!("Bearer {}", state.token);
        let presented = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            return MockError::Unauthorized.into_response();
        }
    }
    next.run(request).await
}

// ── Router ───────────────────────────────────────────────────────────

fn entity_routes<E: Stored>() -> Router<SharedState> {
    let collection = format!("/api/{}", E::RESOURCE);
    let record = format!("{}/{{id}}", collection);
    let search_path = format!("/api/_search/{}", E::RESOURCE);
    Router::new()
        .route(&collection, get(list::<E>).post(create::<E>))
        .route(
            &record,
            get(find::<E>)
                .put(update::<E>)
                .patch(partial_update::<E>)
                .delete(delete::<E>),
        )
        .route(&search_path, get(search::<E>))
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route(AUTHENTICATE_PATH, post(authenticate))
        .route("/api/facility/rooms/{facility_id}", get(rooms_of_facility))
        .route("/api/room/residents/{room_id}", get(residents_of_room))
        .merge(entity_routes::<Facility>())
        .merge(entity_routes::<Room>())
        .merge(entity_routes::<Resident>())
        .layer(middleware::from_fn_with_state(state.clone(), track_and_authorize))
        .with_state(state)
}
