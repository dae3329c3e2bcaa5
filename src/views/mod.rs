//! Screen state for listing, viewing, and deleting records, plus plain-text
//! rendering of that state for the terminal.

mod delete;
mod detail;
mod list;
pub mod render;

pub use delete::DeleteDialog;
pub use detail::DetailView;
pub use list::ListView;

use async_trait::async_trait;

use crate::api::{EntityService, Page, PageRequest};
use crate::errors::ClientError;
use crate::model::{Facility, Resident, Room};
use crate::route::Routed;

/// Entities whose list can be narrowed to the children of one parent record.
#[async_trait]
pub trait Listable: Routed {
    /// Singular name of the parent, e.g. `facility` for rooms.
    const PARENT: Option<&'static str>;

    /// Records belonging to parent `parent_id`. Entities without a parent
    /// list everything.
    async fn query_scoped(
        service: &EntityService<Self>,
        _parent_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Self>, ClientError> {
        service.query(request).await
    }
}

impl Listable for Facility {
    const PARENT: Option<&'static str> = None;
}

#[async_trait]
impl Listable for Room {
    const PARENT: Option<&'static str> = Some("facility");

    async fn query_scoped(
        service: &EntityService<Self>,
        parent_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Self>, ClientError> {
        service.query_by_facility(parent_id, request).await
    }
}

#[async_trait]
impl Listable for Resident {
    const PARENT: Option<&'static str> = Some("room");

    async fn query_scoped(
        service: &EntityService<Self>,
        parent_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Self>, ClientError> {
        service.query_by_room(parent_id, request).await
    }
}
