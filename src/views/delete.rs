use crate::api::{ApiClient, EntityService};
use crate::errors::ClientError;
use crate::model::Entity;

use super::{ListView, Listable};

/// Confirmation for deleting one record.
#[derive(Debug)]
pub struct DeleteDialog<E> {
    service: EntityService<E>,
    entity: E,
}

impl<E: Listable> DeleteDialog<E> {
    pub fn new(client: ApiClient, entity: E) -> Self {
        Self {
            service: EntityService::new(client),
            entity,
        }
    }

    pub fn title(&self) -> String {
        format!("Are you sure you want to delete this {}?", E::NAME)
    }

    /// The question with the record's identifier, as the dialog body shows it.
    pub fn question(&self) -> String {
        match self.entity.id() {
            Some(id) => format!("Are you sure you want to delete {} {}?", E::NAME, id),
            None => self.title(),
        }
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    /// Issue the `DELETE` for the record.
    pub async fn delete(&self) -> Result<(), ClientError> {
        let id = self.entity.id().ok_or(ClientError::MissingIdentifier {
            resource: E::RESOURCE,
        })?;
        self.service.delete(id).await?;
        tracing::info!(resource = E::RESOURCE, id, "Deleted");
        Ok(())
    }

    /// Delete, then reload the list the dialog was opened from.
    pub async fn confirm(self, list: &mut ListView<E>) -> Result<(), ClientError> {
        self.delete().await?;
        list.load().await
    }
}
