//! Headless admin session: routes, navigation history, and the screen the
//! user is on.
//!
//! `AdminApp` is a cheap cloneable handle, so several page objects can drive
//! the same session the way browser page objects share one browser.

mod screen;

pub use screen::{EntityScreen, Screen, ScreenEntity};

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::api::{ApiClient, EntityService};
use crate::config::AdminConfig;
use crate::errors::ClientError;
use crate::form::ValidationErrors;
use crate::model::{Entity, Facility, Resident, Room};
use crate::route::{AppRoute, EntityKind, EntityResolver, Resolution, RouteSnapshot, parse_route};
use crate::update::{NavIntent, PendingNavigation, SaveOutcome, UpdateComponent};
use crate::views::{DeleteDialog, DetailView, ListView};

use screen::describe;

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";

/// Result of pressing save on an edit screen.
#[derive(Debug)]
pub enum SaveResult {
    /// Saved; the session went back to the previous screen.
    Saved { id: Option<i64> },
    /// The backend refused. The edit screen stays open.
    Failed(ClientError),
    /// The form is invalid and nothing was sent.
    Invalid(ValidationErrors),
    /// The current screen is not an edit screen of that entity.
    NotEditing,
}

impl SaveResult {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveResult::Saved { .. })
    }
}

struct Session {
    client: ApiClient,
    page_size: u32,
    history: Vec<String>,
    screen: Screen,
}

/// What loading a URL produced.
enum Loaded {
    Screen(Screen),
    Redirect(&'static str),
}

impl Session {
    fn current_url(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or(HOME_ROUTE)
    }

    /// Navigate to `url`, adding it to the history.
    async fn open(&mut self, url: &str) -> Result<(), ClientError> {
        match self.load(url).await? {
            Loaded::Screen(screen) => {
                self.history.push(url.to_string());
                self.show(screen);
            }
            Loaded::Redirect(target) => {
                self.history.push(target.to_string());
                self.show(Screen::NotFound);
            }
        }
        Ok(())
    }

    /// Leave the current screen for the previous one and reload it.
    async fn back(&mut self) -> Result<(), ClientError> {
        self.history.pop();
        let url = self.current_url().to_string();
        match self.load(&url).await? {
            Loaded::Screen(screen) => self.show(screen),
            Loaded::Redirect(target) => {
                self.history.pop();
                self.history.push(target.to_string());
                self.show(Screen::NotFound);
            }
        }
        Ok(())
    }

    async fn reload(&mut self) -> Result<(), ClientError> {
        let url = self.current_url().to_string();
        if let Loaded::Screen(screen) = self.load(&url).await? {
            self.show(screen);
        }
        Ok(())
    }

    fn show(&mut self, screen: Screen) {
        tracing::info!(url = self.current_url(), screen = %screen.name(), "Navigated");
        self.screen = screen;
    }

    async fn apply(&mut self, intent: Option<NavIntent>) -> Result<(), ClientError> {
        match intent {
            Some(NavIntent::Back) => self.back().await,
            Some(NavIntent::To(url)) => self.open(&url).await,
            None => Ok(()),
        }
    }

    async fn load(&self, url: &str) -> Result<Loaded, ClientError> {
        let (route, snapshot) = parse_route(url);
        let kind = match &route {
            AppRoute::Home => return Ok(Loaded::Screen(Screen::Home)),
            AppRoute::Login => return Ok(Loaded::Screen(Screen::SignIn)),
            AppRoute::NotFound => return Ok(Loaded::Screen(Screen::NotFound)),
            AppRoute::List(kind) | AppRoute::Create(kind) | AppRoute::View(kind) | AppRoute::Edit(kind) => *kind,
        };
        if !self.client.is_authenticated() {
            return Ok(Loaded::Screen(Screen::SignIn));
        }
        match kind {
            EntityKind::Facility => self.load_entity::<Facility>(&route, &snapshot).await,
            EntityKind::Room => self.load_entity::<Room>(&route, &snapshot).await,
            EntityKind::Resident => self.load_entity::<Resident>(&route, &snapshot).await,
        }
    }

    async fn load_entity<E: ScreenEntity>(
        &self,
        route: &AppRoute,
        snapshot: &RouteSnapshot,
    ) -> Result<Loaded, ClientError> {
        let screen = match route {
            AppRoute::List(_) => {
                let mut view = ListView::<E>::new(self.client.clone(), self.page_size);
                let parent_id = E::PARENT
                    .and_then(|parent| snapshot.query(&format!("{}_id", parent)))
                    .and_then(|id| id.parse().ok());
                if let Some(query) = snapshot.query("query") {
                    view.search(query).await?;
                } else if parent_id.is_some() {
                    view.scope_to(parent_id).await?;
                } else {
                    view.load().await?;
                }
                EntityScreen::List { view, dialog: None }
            }
            _ => {
                let resolver = EntityResolver::<E>::new(EntityService::new(self.client.clone()));
                let resolved = match resolver.resolve(snapshot).await? {
                    Resolution::Resolved(resolved) => resolved,
                    Resolution::Redirect(target) => return Ok(Loaded::Redirect(target)),
                };
                if matches!(route, AppRoute::View(_)) {
                    EntityScreen::Detail(DetailView::new(resolved.entity))
                } else {
                    let mut update = E::new_update(self.client.clone());
                    update.init(resolved).await?;
                    EntityScreen::Update(update)
                }
            }
        };
        Ok(Loaded::Screen(E::wrap(screen)))
    }
}

/// Handle to one headless admin session.
#[derive(Clone)]
pub struct AdminApp {
    inner: Arc<Mutex<Session>>,
}

impl std::fmt::Debug for AdminApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApp").finish_non_exhaustive()
    }
}

impl AdminApp {
    /// A session on the home screen.
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Session {
                client,
                page_size,
                history: vec![HOME_ROUTE.to_string()],
                screen: Screen::Home,
            })),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Result<Self, ClientError> {
        Ok(Self::new(ApiClient::from_config(config)?, config.list.page_size))
    }

    pub async fn client(&self) -> ApiClient {
        self.inner.lock().await.client.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.lock().await.client.is_authenticated()
    }

    pub async fn current_url(&self) -> String {
        self.inner.lock().await.current_url().to_string()
    }

    /// Navigate to an application URL such as `/room/new?facility_id=3`.
    pub async fn open(&self, url: &str) -> Result<(), ClientError> {
        self.inner.lock().await.open(url).await
    }

    pub async fn back(&self) -> Result<(), ClientError> {
        self.inner.lock().await.back().await
    }

    pub async fn reload(&self) -> Result<(), ClientError> {
        self.inner.lock().await.reload().await
    }

    /// Authenticate, then show what the sign-in screen was guarding. Signing
    /// in from the login route lands on home.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let mut session = self.inner.lock().await;
        session.client.authenticate(username, password).await?;
        if session.current_url() == LOGIN_ROUTE {
            session.open(HOME_ROUTE).await
        } else {
            session.reload().await
        }
    }

    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let mut session = self.inner.lock().await;
        session.client.sign_out();
        session.open(HOME_ROUTE).await
    }

    /// Inspect the current screen.
    pub async fn with_screen<R>(&self, f: impl FnOnce(&Screen) -> R) -> R {
        f(&self.inner.lock().await.screen)
    }

    /// Inspect the current screen mutably, e.g. to fill in a form.
    pub async fn with_screen_mut<R>(&self, f: impl FnOnce(&mut Screen) -> R) -> R {
        f(&mut self.inner.lock().await.screen)
    }

    pub async fn with_list<E: ScreenEntity, R>(&self, f: impl FnOnce(&ListView<E>) -> R) -> Option<R> {
        let session = self.inner.lock().await;
        E::screen(&session.screen).and_then(EntityScreen::list).map(f)
    }

    pub async fn with_update<E: ScreenEntity, R>(&self, f: impl FnOnce(&mut E::Update) -> R) -> Option<R> {
        let mut session = self.inner.lock().await;
        E::screen_mut(&mut session.screen)
            .and_then(EntityScreen::update_mut)
            .map(f)
    }

    /// Press save on the edit screen of `E`. On success the session goes
    /// back to the previous screen and reloads it.
    pub async fn save<E: ScreenEntity>(&self) -> Result<SaveResult, ClientError> {
        let mut session = self.inner.lock().await;
        let Some(update) = E::screen_mut(&mut session.screen).and_then(EntityScreen::update_mut) else {
            return Ok(SaveResult::NotEditing);
        };

        let mut nav = PendingNavigation::default();
        let result = match update.save(&mut nav).await {
            SaveOutcome::Saved(saved) => {
                tracing::info!(record = %describe(&saved), "Saved");
                SaveResult::Saved { id: saved.id() }
            }
            SaveOutcome::Failed(err) => SaveResult::Failed(err),
            SaveOutcome::Invalid(errors) => SaveResult::Invalid(errors),
        };
        session.apply(nav.take()).await?;
        Ok(result)
    }

    /// Leave the edit screen of `E` without saving.
    pub async fn cancel<E: ScreenEntity>(&self) -> Result<(), ClientError> {
        let mut session = self.inner.lock().await;
        let Some(update) = E::screen(&session.screen).and_then(EntityScreen::update) else {
            return Ok(());
        };
        let mut nav = PendingNavigation::default();
        update.previous_state(&mut nav);
        session.apply(nav.take()).await
    }

    /// Open the delete dialog for row `index` of the list of `E`.
    pub async fn open_delete_dialog<E: ScreenEntity>(&self, index: usize) -> bool {
        let mut session = self.inner.lock().await;
        let client = session.client.clone();
        let Some(EntityScreen::List { view, dialog }) = E::screen_mut(&mut session.screen) else {
            return false;
        };
        let Some(entity) = view.items().get(index).cloned() else {
            return false;
        };
        *dialog = Some(DeleteDialog::new(client, entity));
        true
    }

    pub async fn open_last_delete_dialog<E: ScreenEntity>(&self) -> bool {
        let rows = self.with_list::<E, _>(ListView::delete_buttons).await.unwrap_or(0);
        match rows.checked_sub(1) {
            Some(last) => self.open_delete_dialog::<E>(last).await,
            None => false,
        }
    }

    pub async fn dialog_title<E: ScreenEntity>(&self) -> Option<String> {
        let session = self.inner.lock().await;
        E::screen(&session.screen)
            .and_then(EntityScreen::dialog)
            .map(DeleteDialog::title)
    }

    /// Confirm the open delete dialog: delete the record, close the dialog,
    /// and reload the list. Returns `false` when no dialog is open.
    pub async fn confirm_delete<E: ScreenEntity>(&self) -> Result<bool, ClientError> {
        let mut session = self.inner.lock().await;
        let Some(EntityScreen::List { view, dialog }) = E::screen_mut(&mut session.screen) else {
            return Ok(false);
        };
        let Some(open) = dialog.take() else {
            return Ok(false);
        };
        open.confirm(view).await?;
        Ok(true)
    }

    pub async fn cancel_delete<E: ScreenEntity>(&self) {
        let mut session = self.inner.lock().await;
        if let Some(EntityScreen::List { dialog, .. }) = E::screen_mut(&mut session.screen) {
            *dialog = None;
        }
    }

    /// Follow the create button of the list of `E`.
    pub async fn click_create<E: ScreenEntity>(&self) -> Result<bool, ClientError> {
        let mut session = self.inner.lock().await;
        let Some(route) = E::screen(&session.screen)
            .and_then(EntityScreen::list)
            .map(ListView::create_route)
        else {
            return Ok(false);
        };
        session.open(&route).await?;
        Ok(true)
    }

    /// Search the list of `E`; a blank query shows every record again.
    pub async fn search<E: ScreenEntity>(&self, query: &str) -> Result<bool, ClientError> {
        let mut session = self.inner.lock().await;
        let Some(EntityScreen::List { view, .. }) = E::screen_mut(&mut session.screen) else {
            return Ok(false);
        };
        view.search(query).await?;
        Ok(true)
    }

    pub async fn go_to_page<E: ScreenEntity>(&self, page: u32) -> Result<bool, ClientError> {
        let mut session = self.inner.lock().await;
        let Some(EntityScreen::List { view, .. }) = E::screen_mut(&mut session.screen) else {
            return Ok(false);
        };
        view.go_to_page(page).await?;
        Ok(true)
    }

    pub async fn entity_kind(&self) -> Option<EntityKind> {
        self.inner.lock().await.screen.kind()
    }

    /// Whether the current screen is the not-found page.
    pub async fn is_not_found(&self) -> bool {
        matches!(self.inner.lock().await.screen, Screen::NotFound)
    }

    pub async fn is_sign_in(&self) -> bool {
        matches!(self.inner.lock().await.screen, Screen::SignIn)
    }

    pub async fn current_route(&self) -> AppRoute {
        parse_route(&self.current_url().await).0
    }
}
