use crate::api::ApiClient;
use crate::model::{Entity, Facility, Resident, Room};
use crate::route::EntityKind;
use crate::update::{FacilityUpdate, ResidentUpdate, RoomUpdate, UpdateComponent};
use crate::views::{DeleteDialog, DetailView, ListView, Listable};

/// What the session currently shows.
pub enum Screen {
    Home,
    SignIn,
    NotFound,
    Facility(EntityScreen<Facility>),
    Room(EntityScreen<Room>),
    Resident(EntityScreen<Resident>),
}

impl Screen {
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Screen::Facility(_) => Some(EntityKind::Facility),
            Screen::Room(_) => Some(EntityKind::Room),
            Screen::Resident(_) => Some(EntityKind::Resident),
            Screen::Home | Screen::SignIn | Screen::NotFound => None,
        }
    }

    /// Short description for logs.
    pub fn name(&self) -> String {
        match self {
            Screen::Home => "home".to_string(),
            Screen::SignIn => "sign-in".to_string(),
            Screen::NotFound => "not-found".to_string(),
            Screen::Facility(s) => format!("facility {}", s.mode()),
            Screen::Room(s) => format!("room {}", s.mode()),
            Screen::Resident(s) => format!("resident {}", s.mode()),
        }
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// The list, detail, or edit screen of one entity.
pub enum EntityScreen<E: ScreenEntity> {
    List {
        view: ListView<E>,
        dialog: Option<DeleteDialog<E>>,
    },
    Detail(DetailView<E>),
    Update(E::Update),
}

impl<E: ScreenEntity> EntityScreen<E> {
    pub fn mode(&self) -> &'static str {
        match self {
            EntityScreen::List { .. } => "list",
            EntityScreen::Detail(_) => "detail",
            EntityScreen::Update(_) => "update",
        }
    }

    pub fn list(&self) -> Option<&ListView<E>> {
        match self {
            EntityScreen::List { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn dialog(&self) -> Option<&DeleteDialog<E>> {
        match self {
            EntityScreen::List { dialog, .. } => dialog.as_ref(),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&DetailView<E>> {
        match self {
            EntityScreen::Detail(view) => Some(view),
            _ => None,
        }
    }

    pub fn update(&self) -> Option<&E::Update> {
        match self {
            EntityScreen::Update(update) => Some(update),
            _ => None,
        }
    }

    pub fn update_mut(&mut self) -> Option<&mut E::Update> {
        match self {
            EntityScreen::Update(update) => Some(update),
            _ => None,
        }
    }
}

/// Entities with screens in the session.
pub trait ScreenEntity: Listable {
    type Update: UpdateComponent<Entity = Self> + Send;

    const KIND: EntityKind;

    fn new_update(client: ApiClient) -> Self::Update;

    fn screen(screen: &Screen) -> Option<&EntityScreen<Self>>;

    fn screen_mut(screen: &mut Screen) -> Option<&mut EntityScreen<Self>>;

    fn wrap(screen: EntityScreen<Self>) -> Screen;
}

impl ScreenEntity for Facility {
    type Update = FacilityUpdate;
    const KIND: EntityKind = EntityKind::Facility;

    fn new_update(client: ApiClient) -> FacilityUpdate {
        FacilityUpdate::new(client)
    }

    fn screen(screen: &Screen) -> Option<&EntityScreen<Self>> {
        match screen {
            Screen::Facility(s) => Some(s),
            _ => None,
        }
    }

    fn screen_mut(screen: &mut Screen) -> Option<&mut EntityScreen<Self>> {
        match screen {
            Screen::Facility(s) => Some(s),
            _ => None,
        }
    }

    fn wrap(screen: EntityScreen<Self>) -> Screen {
        Screen::Facility(screen)
    }
}

impl ScreenEntity for Room {
    type Update = RoomUpdate;
    const KIND: EntityKind = EntityKind::Room;

    fn new_update(client: ApiClient) -> RoomUpdate {
        RoomUpdate::new(client)
    }

    fn screen(screen: &Screen) -> Option<&EntityScreen<Self>> {
        match screen {
            Screen::Room(s) => Some(s),
            _ => None,
        }
    }

    fn screen_mut(screen: &mut Screen) -> Option<&mut EntityScreen<Self>> {
        match screen {
            Screen::Room(s) => Some(s),
            _ => None,
        }
    }

    fn wrap(screen: EntityScreen<Self>) -> Screen {
        Screen::Room(screen)
    }
}

impl ScreenEntity for Resident {
    type Update = ResidentUpdate;
    const KIND: EntityKind = EntityKind::Resident;

    fn new_update(client: ApiClient) -> ResidentUpdate {
        ResidentUpdate::new(client)
    }

    fn screen(screen: &Screen) -> Option<&EntityScreen<Self>> {
        match screen {
            Screen::Resident(s) => Some(s),
            _ => None,
        }
    }

    fn screen_mut(screen: &mut Screen) -> Option<&mut EntityScreen<Self>> {
        match screen {
            Screen::Resident(s) => Some(s),
            _ => None,
        }
    }

    fn wrap(screen: EntityScreen<Self>) -> Screen {
        Screen::Resident(screen)
    }
}

/// Label of a record for log lines.
pub(crate) fn describe<E: Entity>(entity: &E) -> String {
    match entity.id() {
        Some(id) => format!("{} {}", E::NAME, id),
        None => format!("new {}", E::NAME),
    }
}
