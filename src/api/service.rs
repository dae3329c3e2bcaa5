use std::marker::PhantomData;

use reqwest::Method;

use super::client::{ApiClient, check_status};
use super::pagination::{Page, PageRequest, parse_total_count};
use crate::errors::ClientError;
use crate::model::{Entity, Resident, Room};

/// Upper bound on pages fetched by `query_all`, so a backend that keeps
/// reporting more records cannot loop forever.
const MAX_COLLECTION_PAGES: u32 = 100;
const COLLECTION_PAGE_SIZE: u32 = 100;

/// CRUD, search, and listing for one entity type over the REST contract.
pub struct EntityService<E> {
    client: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for EntityService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityService")
            .field("client", &self.client)
            .finish()
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn resource_path() -> String {
        format!("api/{}", E::RESOURCE)
    }

    fn record_path(id: i64) -> String {
        format!("api/{}/{}", E::RESOURCE, id)
    }

    pub async fn create(&self, entity: &E) -> Result<E, ClientError> {
        tracing::debug!(resource = E::RESOURCE, ?entity, "REST request to create");
        let resp = self
            .client
            .request(Method::POST, &Self::resource_path())?
            .json(entity)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let resp = check_status(resp, E::RESOURCE, None).await?;
        Self::decode(resp).await
    }

    pub async fn update(&self, entity: &E) -> Result<E, ClientError> {
        let id = entity.id().ok_or(ClientError::MissingIdentifier {
            resource: E::RESOURCE,
        })?;
        tracing::debug!(resource = E::RESOURCE, id, ?entity, "REST request to update");
        let resp = self
            .client
            .request(Method::PUT, &Self::record_path(id))?
            .json(entity)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let resp = check_status(resp, E::RESOURCE, Some(id)).await?;
        Self::decode(resp).await
    }

    /// Send only the fields present on `entity`; absent fields are left
    /// untouched by the backend.
    pub async fn partial_update(&self, entity: &E) -> Result<E, ClientError> {
        let id = entity.id().ok_or(ClientError::MissingIdentifier {
            resource: E::RESOURCE,
        })?;
        tracing::debug!(resource = E::RESOURCE, id, "REST request to partially update");
        // `json` keeps a content type that is already set.
        let resp = self
            .client
            .request(Method::PATCH, &Self::record_path(id))?
            .header(reqwest::header::CONTENT_TYPE, "application/merge-patch+json")
            .json(entity)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let resp = check_status(resp, E::RESOURCE, Some(id)).await?;
        Self::decode(resp).await
    }

    pub async fn find(&self, id: i64) -> Result<E, ClientError> {
        tracing::debug!(resource = E::RESOURCE, id, "REST request to find");
        let resp = self
            .client
            .request(Method::GET, &Self::record_path(id))?
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let resp = check_status(resp, E::RESOURCE, Some(id)).await?;
        Self::decode(resp).await
    }

    pub async fn query(&self, request: &PageRequest) -> Result<Page<E>, ClientError> {
        tracing::debug!(resource = E::RESOURCE, page = request.page, "REST request to list");
        self.get_page(&Self::resource_path(), request, &[]).await
    }

    /// Every record, following pages until the backend reports no more.
    pub async fn query_all(&self) -> Result<Vec<E>, ClientError> {
        let mut request = PageRequest::with_size(COLLECTION_PAGE_SIZE);
        let mut all = Vec::new();
        for _ in 0..MAX_COLLECTION_PAGES {
            let page = self.query(&request).await?;
            let more = page.has_more(&request) && !page.items.is_empty();
            all.extend(page.items);
            match request.next().filter(|_| more) {
                Some(next) => request = next,
                None => break,
            }
        }
        Ok(all)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        tracing::debug!(resource = E::RESOURCE, id, "REST request to delete");
        let resp = self
            .client
            .request(Method::DELETE, &Self::record_path(id))?
            .send()
            .await
            .map_err(ClientError::Transport)?;
        check_status(resp, E::RESOURCE, Some(id)).await?;
        Ok(())
    }

    pub async fn search(&self, query: &str, request: &PageRequest) -> Result<Page<E>, ClientError> {
        tracing::debug!(resource = E::RESOURCE, query, "REST request to search");
        let path = format!("api/_search/{}", E::RESOURCE);
        self.get_page(&path, request, &[("query", query.to_string())])
            .await
    }

    async fn get_page(
        &self,
        path: &str,
        request: &PageRequest,
        extra: &[(&'static str, String)],
    ) -> Result<Page<E>, ClientError> {
        let mut params = request.to_query();
        params.extend(extra.iter().cloned());
        let resp = self
            .client
            .request(Method::GET, path)?
            .query(&params)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let resp = check_status(resp, E::RESOURCE, None).await?;
        let total_count = parse_total_count(resp.headers());
        let items: Vec<E> = Self::decode(resp).await?;
        Ok(Page::new(items, total_count))
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        resp.json::<T>().await.map_err(|source| ClientError::Decode {
            resource: E::RESOURCE,
            source,
        })
    }
}

impl EntityService<Room> {
    /// Rooms belonging to one facility.
    pub async fn query_by_facility(
        &self,
        facility_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Room>, ClientError> {
        tracing::debug!(facility_id, "REST request to list rooms of facility");
        self.get_page(&format!("api/facility/rooms/{}", facility_id), request, &[])
            .await
    }
}

impl EntityService<Resident> {
    /// Residents assigned to one room.
    pub async fn query_by_room(
        &self,
        room_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Resident>, ClientError> {
        tracing::debug!(room_id, "REST request to list residents of room");
        self.get_page(&format!("api/room/residents/{}", room_id), request, &[])
            .await
    }
}
