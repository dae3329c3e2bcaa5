use async_trait::async_trait;

use crate::api::{ApiClient, EntityService};
use crate::errors::ClientError;
use crate::form::{EntityForm, ResidentForm};
use crate::model::{Resident, Room};
use crate::route::ResolvedEntity;

use super::{RelationshipOptions, UpdateComponent, preselect};

#[derive(Debug)]
pub struct ResidentUpdate {
    service: EntityService<Resident>,
    room_service: EntityService<Room>,
    form: ResidentForm,
    is_saving: bool,
    rooms: RelationshipOptions<Room>,
}

impl ResidentUpdate {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: EntityService::new(client.clone()),
            room_service: EntityService::new(client),
            form: ResidentForm::default(),
            is_saving: false,
            rooms: RelationshipOptions::default(),
        }
    }

    /// Rooms offered by the room select.
    pub fn rooms_shared_collection(&self) -> &[Room] {
        self.rooms.options()
    }

    pub fn room_options(&self) -> &RelationshipOptions<Room> {
        &self.rooms
    }

    fn update_form(&mut self, resident: &Resident) {
        self.form.update_form(resident);
        self.rooms.merge(resident.room.as_ref());
    }

    async fn load_relationships_options(&mut self) -> Result<(), ClientError> {
        let current = self.form.room.value().cloned();
        self.rooms.load(&self.room_service, current.as_ref()).await
    }
}

#[async_trait]
impl UpdateComponent for ResidentUpdate {
    type Entity = Resident;
    type Form = ResidentForm;

    fn form(&self) -> &ResidentForm {
        &self.form
    }

    fn form_mut(&mut self) -> &mut ResidentForm {
        &mut self.form
    }

    fn service(&self) -> &EntityService<Resident> {
        &self.service
    }

    fn is_saving(&self) -> bool {
        self.is_saving
    }

    fn set_saving(&mut self, saving: bool) {
        self.is_saving = saving;
    }

    async fn init(&mut self, resolved: ResolvedEntity<Resident>) -> Result<(), ClientError> {
        self.update_form(&resolved.entity);
        if resolved.relation_disabled {
            self.form.room.disable();
        }
        if let Some(room) = preselect(&self.room_service, resolved.relation_id).await? {
            self.form.room.set_value(Some(room));
        }
        self.load_relationships_options().await
    }
}
