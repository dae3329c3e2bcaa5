use async_trait::async_trait;

use crate::api::{ApiClient, EntityService};
use crate::errors::ClientError;
use crate::form::{EntityForm, RoomForm};
use crate::model::{Facility, Room};
use crate::route::ResolvedEntity;

use super::{RelationshipOptions, UpdateComponent, preselect};

#[derive(Debug)]
pub struct RoomUpdate {
    service: EntityService<Room>,
    facility_service: EntityService<Facility>,
    form: RoomForm,
    is_saving: bool,
    facilities: RelationshipOptions<Facility>,
}

impl RoomUpdate {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: EntityService::new(client.clone()),
            facility_service: EntityService::new(client),
            form: RoomForm::default(),
            is_saving: false,
            facilities: RelationshipOptions::default(),
        }
    }

    /// Facilities offered by the facility select.
    pub fn facilities_shared_collection(&self) -> &[Facility] {
        self.facilities.options()
    }

    pub fn facility_options(&self) -> &RelationshipOptions<Facility> {
        &self.facilities
    }

    fn update_form(&mut self, room: &Room) {
        self.form.update_form(room);
        self.facilities.merge(room.facility.as_ref());
    }

    async fn load_relationships_options(&mut self) -> Result<(), ClientError> {
        let current = self.form.facility.value().cloned();
        self.facilities
            .load(&self.facility_service, current.as_ref())
            .await
    }
}

#[async_trait]
impl UpdateComponent for RoomUpdate {
    type Entity = Room;
    type Form = RoomForm;

    fn form(&self) -> &RoomForm {
        &self.form
    }

    fn form_mut(&mut self) -> &mut RoomForm {
        &mut self.form
    }

    fn service(&self) -> &EntityService<Room> {
        &self.service
    }

    fn is_saving(&self) -> bool {
        self.is_saving
    }

    fn set_saving(&mut self, saving: bool) {
        self.is_saving = saving;
    }

    async fn init(&mut self, resolved: ResolvedEntity<Room>) -> Result<(), ClientError> {
        self.update_form(&resolved.entity);
        if resolved.relation_disabled {
            self.form.facility.disable();
        }
        if let Some(facility) = preselect(&self.facility_service, resolved.relation_id).await? {
            self.form.facility.set_value(Some(facility));
        }
        self.load_relationships_options().await
    }
}
