//! Record types for the three managed entities.
//!
//! Every record carries an optional identifier: `None` means the record has
//! not been created on the backend yet. Relations are embedded records
//! (`Room::facility`, `Resident::room`), matching the JSON the backend serves.

mod facility;
mod resident;
mod room;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use facility::{Facility, get_facility_identifier};
pub use resident::{Resident, get_resident_identifier};
pub use room::{Room, get_room_identifier};

/// Behaviour shared by every record the admin client manages.
pub trait Entity:
    Clone + Default + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Plural REST resource, as in `/api/<RESOURCE>`.
    const RESOURCE: &'static str;
    /// Singular display name, as in "Create or edit a Facility".
    const NAME: &'static str;
    /// List page title.
    const TITLE: &'static str;
    /// Application route segment, as in `/<ROUTE>/new`.
    const ROUTE: &'static str;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);

    /// Text shown for this record in a relationship select.
    fn label(&self) -> String;

    /// Labelled field values for detail and table views.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// Append `candidate` to `collection` unless a record with the same
/// identifier is already there.
///
/// Records without an identifier are never added: they cannot be the target
/// of a relation.
pub fn add_to_collection_if_missing<E: Entity>(mut collection: Vec<E>, candidate: Option<&E>) -> Vec<E> {
    let Some(candidate) = candidate else {
        return collection;
    };
    let Some(id) = candidate.id() else {
        return collection;
    };
    if !collection.iter().any(|existing| existing.id() == Some(id)) {
        collection.push(candidate.clone());
    }
    collection
}

pub(crate) fn display_opt<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
