use crate::api::{ApiClient, EntityService, PageRequest};
use crate::errors::ClientError;
use crate::model::Entity;

use super::Listable;

/// One page of records with a delete button per row.
#[derive(Debug)]
pub struct ListView<E> {
    service: EntityService<E>,
    request: PageRequest,
    items: Vec<E>,
    total_count: Option<u64>,
    search: Option<String>,
    parent_id: Option<i64>,
    has_more: bool,
    is_loading: bool,
}

impl<E: Listable> ListView<E> {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self {
            service: EntityService::new(client),
            request: PageRequest::with_size(page_size),
            items: Vec::new(),
            total_count: None,
            search: None,
            parent_id: None,
            has_more: false,
            is_loading: false,
        }
    }

    pub fn title(&self) -> &'static str {
        E::TITLE
    }

    pub fn service(&self) -> &EntityService<E> {
        &self.service
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn delete_buttons(&self) -> usize {
        self.items.len()
    }

    /// Shown once loading finishes without any record.
    pub fn no_result(&self) -> bool {
        !self.is_loading && self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    /// Route of the create form; scoped lists preset and lock the parent.
    pub fn create_route(&self) -> String {
        match (E::PARENT, self.parent_id) {
            (Some(parent), Some(id)) => format!(
                "/{}/new?{parent}_id={id}&{parent}_id_disable=true",
                E::ROUTE
            ),
            _ => format!("/{}/new", E::ROUTE),
        }
    }

    /// Fetch the current page. A search takes precedence over the parent
    /// scope.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.is_loading = true;
        let result = match (&self.search, self.parent_id) {
            (Some(query), _) => self.service.search(query, &self.request).await,
            (None, Some(parent_id)) => E::query_scoped(&self.service, parent_id, &self.request).await,
            (None, None) => self.service.query(&self.request).await,
        };
        self.is_loading = false;

        let page = result?;
        tracing::debug!(
            resource = E::RESOURCE,
            page = self.request.page,
            rows = page.items.len(),
            "Loaded list"
        );
        self.has_more = page.has_more(&self.request);
        self.total_count = page.total_count;
        self.items = page.items;
        Ok(())
    }

    /// Search from the first page. A blank query clears the search.
    pub async fn search(&mut self, query: &str) -> Result<(), ClientError> {
        let query = query.trim();
        self.search = (!query.is_empty()).then(|| query.to_string());
        self.request.page = 0;
        self.load().await
    }

    /// Restrict the list to children of `parent_id`, or lift the restriction.
    pub async fn scope_to(&mut self, parent_id: Option<i64>) -> Result<(), ClientError> {
        self.parent_id = if E::PARENT.is_some() { parent_id } else { None };
        self.request.page = 0;
        self.load().await
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<(), ClientError> {
        self.request.page = page;
        self.load().await
    }

    pub fn has_next_page(&self) -> bool {
        self.has_more
    }

    pub fn sort_by(&mut self, sort: Vec<String>) {
        if !sort.is_empty() {
            self.request.sort = sort;
        }
    }

    /// Identifier of the record in the last row.
    pub fn last_id(&self) -> Option<i64> {
        self.items.last().and_then(Entity::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Facility, Room};
    use crate::testing::MockBackend;

    #[tokio::test]
    async fn test_empty_list_shows_no_result() {
        let backend = MockBackend::spawn().await;
        let mut list = ListView::<Facility>::new(backend.signed_in_client().await, 20);
        list.load().await.unwrap();
        assert_eq!(list.title(), "Facilities");
        assert!(list.no_result());
        assert_eq!(list.delete_buttons(), 0);
        assert_eq!(list.total_count(), Some(0));
    }

    #[tokio::test]
    async fn test_one_delete_button_per_row() {
        let backend = MockBackend::spawn().await;
        backend.seed_facility("North");
        let last = backend.seed_facility("South");
        let mut list = ListView::<Facility>::new(backend.signed_in_client().await, 20);
        list.load().await.unwrap();
        assert_eq!(list.delete_buttons(), 2);
        assert!(!list.no_result());
        assert_eq!(list.last_id(), last.id);
    }

    #[tokio::test]
    async fn test_paging_follows_total_count() {
        let backend = MockBackend::spawn().await;
        for name in ["A", "B", "C"] {
            backend.seed_facility(name);
        }
        let mut list = ListView::<Facility>::new(backend.signed_in_client().await, 2);
        list.load().await.unwrap();
        assert!(list.has_next_page());
        list.go_to_page(1).await.unwrap();
        assert_eq!(list.delete_buttons(), 1);
        assert!(!list.has_next_page());
    }

    #[tokio::test]
    async fn test_scoped_rooms_and_create_route() {
        let backend = MockBackend::spawn().await;
        let north = backend.seed_facility("North");
        let south = backend.seed_facility("South");
        backend.seed_room(1, &north);
        backend.seed_room(2, &south);
        backend.seed_room(3, &south);

        let mut list = ListView::<Room>::new(backend.signed_in_client().await, 20);
        list.scope_to(south.id).await.unwrap();
        assert_eq!(list.delete_buttons(), 2);
        let id = south.id.unwrap();
        assert_eq!(
            list.create_route(),
            format!("/room/new?facility_id={id}&facility_id_disable=true")
        );
        assert!(backend.requests().contains(&format!("GET /api/facility/rooms/{id}")));
    }

    #[tokio::test]
    async fn test_search_then_clear() {
        let backend = MockBackend::spawn().await;
        backend.seed_facility("North Wing");
        backend.seed_facility("South Wing");
        let mut list = ListView::<Facility>::new(backend.signed_in_client().await, 20);
        list.search("south").await.unwrap();
        assert_eq!(list.delete_buttons(), 1);
        assert_eq!(list.search_query(), Some("south"));

        list.search("  ").await.unwrap();
        assert_eq!(list.search_query(), None);
        assert_eq!(list.delete_buttons(), 2);
    }

    #[tokio::test]
    async fn test_facility_ignores_scope() {
        let backend = MockBackend::spawn().await;
        backend.seed_facility("North");
        let mut list = ListView::<Facility>::new(backend.signed_in_client().await, 20);
        list.scope_to(Some(1)).await.unwrap();
        assert_eq!(list.parent_id(), None);
        assert_eq!(list.create_route(), "/facility/new");
    }
}
