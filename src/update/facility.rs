use async_trait::async_trait;

use crate::api::{ApiClient, EntityService};
use crate::errors::ClientError;
use crate::form::{EntityForm, FacilityForm};
use crate::model::Facility;
use crate::route::ResolvedEntity;

use super::UpdateComponent;

#[derive(Debug)]
pub struct FacilityUpdate {
    service: EntityService<Facility>,
    form: FacilityForm,
    is_saving: bool,
}

impl FacilityUpdate {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: EntityService::new(client),
            form: FacilityForm::default(),
            is_saving: false,
        }
    }
}

#[async_trait]
impl UpdateComponent for FacilityUpdate {
    type Entity = Facility;
    type Form = FacilityForm;

    fn form(&self) -> &FacilityForm {
        &self.form
    }

    fn form_mut(&mut self) -> &mut FacilityForm {
        &mut self.form
    }

    fn service(&self) -> &EntityService<Facility> {
        &self.service
    }

    fn is_saving(&self) -> bool {
        self.is_saving
    }

    fn set_saving(&mut self, saving: bool) {
        self.is_saving = saving;
    }

    async fn init(&mut self, resolved: ResolvedEntity<Facility>) -> Result<(), ClientError> {
        self.form.update_form(&resolved.entity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;
    use crate::update::{NavIntent, PendingNavigation, SaveOutcome};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_save_without_id_creates() {
        let backend = MockBackend::spawn().await;
        let mut update = FacilityUpdate::new(backend.signed_in_client().await);
        update.init(ResolvedEntity::default()).await.unwrap();
        update.form_mut().facility_name.set_input("North");

        let mut nav = PendingNavigation::default();
        let outcome = update.save(&mut nav).await;

        assert!(outcome.is_saved());
        assert!(!update.is_saving());
        assert_eq!(nav.take(), Some(NavIntent::Back));
        assert!(backend.requests().contains(&"POST /api/facilities".to_string()));
        assert_eq!(backend.count::<Facility>(), 1);
    }

    #[tokio::test]
    async fn test_save_with_id_updates() {
        let backend = MockBackend::spawn().await;
        let existing = backend.seed_facility("North");
        let mut update = FacilityUpdate::new(backend.signed_in_client().await);
        update
            .init(ResolvedEntity {
                entity: existing.clone(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(update.form().facility_name.input(), "North");
        update.form_mut().facility_name.set_input("North Wing");

        let mut nav = PendingNavigation::default();
        let SaveOutcome::Saved(saved) = update.save(&mut nav).await else {
            panic!("Expected the update to succeed");
        };
        assert_eq!(saved.id, existing.id);
        assert_eq!(saved.facility_name.as_deref(), Some("North Wing"));
        let path = format!("PUT /api/facilities/{}", existing.id.unwrap());
        assert!(backend.requests().contains(&path));
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let backend = MockBackend::spawn().await;
        let mut update = FacilityUpdate::new(backend.signed_in_client().await);
        update.init(ResolvedEntity::default()).await.unwrap();
        assert!(!update.can_save());

        let mut nav = PendingNavigation::default();
        let outcome = update.save(&mut nav).await;
        let SaveOutcome::Invalid(errors) = outcome else {
            panic!("Expected validation to stop the save");
        };
        assert!(!errors.get("facility_name").is_empty());
        assert_eq!(nav.take(), None);
        assert_eq!(backend.count::<Facility>(), 0);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_and_clears_saving() {
        let backend = MockBackend::spawn().await;
        backend.fail_next_write(StatusCode::INTERNAL_SERVER_ERROR);
        let mut update = FacilityUpdate::new(backend.signed_in_client().await);
        update.init(ResolvedEntity::default()).await.unwrap();
        update.form_mut().facility_name.set_input("North");

        let mut nav = PendingNavigation::default();
        let outcome = update.save(&mut nav).await;

        assert!(matches!(outcome, SaveOutcome::Failed(ClientError::Status { status: 500, .. })));
        assert!(!update.is_saving());
        assert_eq!(nav.take(), None);
        assert_eq!(update.form().facility_name.input(), "North");
    }

    #[test]
    fn test_page_title() {
        let client = ApiClient::new("http://127.0.0.1:9", std::time::Duration::from_millis(100)).unwrap();
        assert_eq!(FacilityUpdate::new(client).page_title(), "Create or edit a Facility");
    }
}
