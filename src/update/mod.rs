//! Edit-form controllers: one per entity, each pairing a form with the
//! service that saves it and the related-record options its select offers.
//!
//! | Controller       | Form           | Relationship options           |
//! |------------------|----------------|--------------------------------|
//! | `FacilityUpdate` | `FacilityForm` | none                           |
//! | `RoomUpdate`     | `RoomForm`     | facilities (`facility_id`)     |
//! | `ResidentUpdate` | `ResidentForm` | rooms (`room_id`)              |

mod facility;
mod resident;
mod room;

pub use facility::FacilityUpdate;
pub use resident::ResidentUpdate;
pub use room::RoomUpdate;

use async_trait::async_trait;

use crate::api::EntityService;
use crate::errors::ClientError;
use crate::form::{EntityForm, ValidationErrors};
use crate::model::{Entity, add_to_collection_if_missing};
use crate::route::{ResolvedEntity, Routed};

/// Where a controller sends the user after it finishes.
pub trait Navigator: Send {
    /// Return to the previous screen.
    fn previous_state(&mut self);

    fn navigate(&mut self, url: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent {
    Back,
    To(String),
}

/// A navigator that records the last request for the caller to apply.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    intent: Option<NavIntent>,
}

impl PendingNavigation {
    pub fn take(&mut self) -> Option<NavIntent> {
        self.intent.take()
    }
}

impl Navigator for PendingNavigation {
    fn previous_state(&mut self) {
        self.intent = Some(NavIntent::Back);
    }

    fn navigate(&mut self, url: &str) {
        self.intent = Some(NavIntent::To(url.to_string()));
    }
}

#[derive(Debug)]
pub enum SaveOutcome<E> {
    Saved(E),
    /// The backend refused or the request failed. The form keeps its values.
    Failed(ClientError),
    /// Nothing was sent.
    Invalid(ValidationErrors),
}

impl<E> SaveOutcome<E> {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Options for a relationship select, loaded from the backend and always
/// containing the record's current relation.
#[derive(Debug, Clone)]
pub struct RelationshipOptions<R> {
    options: Vec<R>,
}

impl<R> Default for RelationshipOptions<R> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
        }
    }
}

impl<R: Entity> RelationshipOptions<R> {
    pub fn options(&self) -> &[R] {
        &self.options
    }

    /// Add `current` when no option carries its identifier.
    pub fn merge(&mut self, current: Option<&R>) {
        let options = std::mem::take(&mut self.options);
        self.options = add_to_collection_if_missing(options, current);
    }

    /// Replace the options with every record the backend lists, keeping
    /// `current` selectable.
    pub async fn load(&mut self, service: &EntityService<R>, current: Option<&R>) -> Result<(), ClientError> {
        let all = service.query_all().await?;
        self.options = add_to_collection_if_missing(all, current);
        tracing::debug!(resource = R::RESOURCE, count = self.options.len(), "Loaded relationship options");
        Ok(())
    }

    pub fn find_by_label(&self, label: &str) -> Option<&R> {
        self.options.iter().find(|option| option.label() == label)
    }

    pub fn last(&self) -> Option<&R> {
        self.options.last()
    }
}

/// Fetch the record a `*_id` query parameter preselects. An unknown id
/// leaves the selection empty; other failures are returned.
async fn preselect<R: Entity>(service: &EntityService<R>, id: Option<i64>) -> Result<Option<R>, ClientError> {
    let Some(id) = id else {
        return Ok(None);
    };
    match service.find(id).await {
        Ok(record) => Ok(Some(record)),
        Err(err) if err.is_not_found() => {
            tracing::warn!(resource = R::RESOURCE, id, "Preselected record not found");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Shared lifecycle of the edit-form controllers.
#[async_trait]
pub trait UpdateComponent: Send {
    type Entity: Routed;
    type Form: EntityForm<Entity = Self::Entity>;

    fn form(&self) -> &Self::Form;

    fn form_mut(&mut self) -> &mut Self::Form;

    fn service(&self) -> &EntityService<Self::Entity>;

    fn is_saving(&self) -> bool;

    fn set_saving(&mut self, saving: bool);

    /// Populate the form from a resolved route and load relationship options.
    async fn init(&mut self, resolved: ResolvedEntity<Self::Entity>) -> Result<(), ClientError>;

    fn page_title(&self) -> String {
        format!("Create or edit a {}", <Self::Entity as Entity>::NAME)
    }

    /// The save action is offered only for a valid form that is not saving.
    fn can_save(&self) -> bool {
        !self.is_saving() && self.form().is_valid()
    }

    fn previous_state(&self, nav: &mut dyn Navigator) {
        nav.previous_state();
    }

    /// Create when the form has no identifier, update otherwise.
    async fn save(&mut self, nav: &mut dyn Navigator) -> SaveOutcome<Self::Entity> {
        let errors = self.form().errors();
        if !errors.is_empty() {
            tracing::debug!(resource = <Self::Entity as Entity>::RESOURCE, %errors, "Form is invalid");
            return SaveOutcome::Invalid(errors);
        }

        self.set_saving(true);
        let entity = self.form().create_from_form();
        let result = if entity.id().is_some() {
            self.service().update(&entity).await
        } else {
            self.service().create(&entity).await
        };

        let outcome = match result {
            Ok(saved) => {
                self.on_save_success(&saved, nav);
                SaveOutcome::Saved(saved)
            }
            Err(err) => {
                self.on_save_error(&err);
                SaveOutcome::Failed(err)
            }
        };
        self.on_save_finalize();
        outcome
    }

    fn on_save_success(&mut self, _saved: &Self::Entity, nav: &mut dyn Navigator) {
        self.previous_state(nav);
    }

    fn on_save_error(&mut self, err: &ClientError) {
        tracing::warn!(resource = <Self::Entity as Entity>::RESOURCE, error = %err, "Save failed");
    }

    fn on_save_finalize(&mut self) {
        self.set_saving(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Facility;

    #[test]
    fn test_pending_navigation_keeps_last_intent() {
        let mut nav = PendingNavigation::default();
        assert_eq!(nav.take(), None);
        nav.navigate("/room");
        nav.previous_state();
        assert_eq!(nav.take(), Some(NavIntent::Back));
        assert_eq!(nav.take(), None);
    }

    #[test]
    fn test_options_merge_adds_current_once() {
        let mut options = RelationshipOptions::<Facility>::default();
        let north = Facility::new(Some(1), Some("North".into()));
        options.merge(Some(&north));
        options.merge(Some(&north));
        assert_eq!(options.options().len(), 1);
        assert_eq!(options.find_by_label("North").and_then(|f| f.id), Some(1));
        assert_eq!(options.last().and_then(|f| f.id), Some(1));
    }
}
