use crate::api::EntityService;
use crate::errors::ClientError;
use crate::model::{Entity, Facility, Resident, Room};

use super::{NOT_FOUND_ROUTE, RouteSnapshot};

/// Query parameters that preset or lock a relationship field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationParams {
    /// Preselects the related record, e.g. `facility_id`.
    pub id_param: &'static str,
    /// `true` disables the relationship control, e.g. `facility_id_disable`.
    pub disable_param: &'static str,
}

/// Entities reachable through routes, with the relation their forms edit.
pub trait Routed: Entity {
    const RELATION: Option<RelationParams>;
}

impl Routed for Facility {
    const RELATION: Option<RelationParams> = None;
}

impl Routed for Room {
    const RELATION: Option<RelationParams> = Some(RelationParams {
        id_param: "facility_id",
        disable_param: "facility_id_disable",
    });
}

impl Routed for Resident {
    const RELATION: Option<RelationParams> = Some(RelationParams {
        id_param: "room_id",
        disable_param: "room_id_disable",
    });
}

/// What a resolver hands to the edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedEntity<E> {
    pub entity: E,
    pub relation_disabled: bool,
    pub relation_id: Option<i64>,
}

/// Outcome of resolving a route.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    /// Navigation halts and continues at the given route.
    Redirect(&'static str),
}

/// Loads the record a route points at before its form renders.
#[derive(Debug, Clone)]
pub struct EntityResolver<E> {
    service: EntityService<E>,
}

impl<E: Routed> EntityResolver<E> {
    pub fn new(service: EntityService<E>) -> Self {
        Self { service }
    }

    /// Without an `id` param the result is an empty record (create mode).
    /// An id the backend does not know redirects to the not-found route;
    /// any other failure is returned.
    pub async fn resolve(
        &self,
        route: &RouteSnapshot,
    ) -> Result<Resolution<ResolvedEntity<E>>, ClientError> {
        let mut resolved = ResolvedEntity::<E>::default();

        if let Some(relation) = E::RELATION {
            resolved.relation_disabled = route.query(relation.disable_param) == Some("true");
            resolved.relation_id = route.query(relation.id_param).and_then(|v| v.parse().ok());
        }

        let Some(raw_id) = route.param("id") else {
            return Ok(Resolution::Resolved(resolved));
        };
        let Ok(id) = raw_id.parse::<i64>() else {
            tracing::warn!(resource = E::RESOURCE, id = raw_id, "Malformed identifier in route");
            return Ok(Resolution::Redirect(NOT_FOUND_ROUTE));
        };

        match self.service.find(id).await {
            Ok(entity) => {
                resolved.entity = entity;
                Ok(Resolution::Resolved(resolved))
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!(resource = E::RESOURCE, id, "Record not found, redirecting");
                Ok(Resolution::Redirect(NOT_FOUND_ROUTE))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::route::parse_route;
    use std::time::Duration;

    fn offline_resolver<E: Routed>() -> EntityResolver<E> {
        // Port 9 (discard) is never contacted by these tests.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        EntityResolver::new(EntityService::new(client))
    }

    #[tokio::test]
    async fn test_create_route_resolves_empty_record() {
        let resolver = offline_resolver::<Facility>();
        let (_, snapshot) = parse_route("/facility/new");
        let resolution = resolver.resolve(&snapshot).await.unwrap();
        assert_eq!(resolution, Resolution::Resolved(ResolvedEntity::default()));
    }

    #[tokio::test]
    async fn test_relation_query_params_are_honoured() {
        let resolver = offline_resolver::<Room>();
        let (_, snapshot) = parse_route("/room/new?facility_id=3&facility_id_disable=true");
        let Resolution::Resolved(resolved) = resolver.resolve(&snapshot).await.unwrap() else {
            panic!("Expected a resolved record");
        };
        assert!(resolved.relation_disabled);
        assert_eq!(resolved.relation_id, Some(3));
        assert_eq!(resolved.entity, Room::default());
    }

    #[tokio::test]
    async fn test_disable_flag_requires_literal_true() {
        let resolver = offline_resolver::<Resident>();
        let (_, snapshot) = parse_route("/resident/new?room_id_disable=yes&room_id=abc");
        let Resolution::Resolved(resolved) = resolver.resolve(&snapshot).await.unwrap() else {
            panic!("Expected a resolved record");
        };
        assert!(!resolved.relation_disabled);
        assert_eq!(resolved.relation_id, None);
    }

    #[tokio::test]
    async fn test_facility_ignores_relation_params() {
        let resolver = offline_resolver::<Facility>();
        let (_, snapshot) = parse_route("/facility/new?facility_id=3&facility_id_disable=true");
        let Resolution::Resolved(resolved) = resolver.resolve(&snapshot).await.unwrap() else {
            panic!("Expected a resolved record");
        };
        assert!(!resolved.relation_disabled);
        assert_eq!(resolved.relation_id, None);
    }

    #[tokio::test]
    async fn test_malformed_id_redirects_without_request() {
        let resolver = offline_resolver::<Room>();
        let (_, snapshot) = parse_route("/room/abc/edit");
        let resolution = resolver.resolve(&snapshot).await.unwrap();
        assert_eq!(resolution, Resolution::Redirect(NOT_FOUND_ROUTE));
    }
}
