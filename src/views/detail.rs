use crate::api::{ApiClient, EntityService};
use crate::errors::ClientError;
use crate::model::Entity;

use super::Listable;

/// Read-only view of one record.
#[derive(Debug, Clone)]
pub struct DetailView<E> {
    entity: E,
}

impl<E: Listable> DetailView<E> {
    pub fn new(entity: E) -> Self {
        Self { entity }
    }

    pub async fn load(client: ApiClient, id: i64) -> Result<Self, ClientError> {
        let entity = EntityService::<E>::new(client).find(id).await?;
        Ok(Self::new(entity))
    }

    pub fn title(&self) -> &'static str {
        E::NAME
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn fields(&self) -> Vec<(&'static str, String)> {
        self.entity.fields()
    }

    pub fn edit_route(&self) -> Option<String> {
        self.entity
            .id()
            .map(|id| format!("/{}/{}/edit", E::ROUTE, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Resident, Room};

    #[test]
    fn test_fields_and_edit_route() {
        let resident = Resident::new(
            Some(3),
            Some("Ada".into()),
            Some(5551234),
            Some("ada@example.com".into()),
            Some(Room::new(Some(9), Some(12), None)),
        );
        let view = DetailView::new(resident);
        assert_eq!(view.title(), "Resident");
        assert_eq!(view.edit_route().as_deref(), Some("/resident/3/edit"));
        assert!(view.fields().contains(&("Room", "12".to_string())));
    }
}
