//! Application routes and the resolvers that load a record before its edit
//! form renders.
//!
//! ```text
//! /                       home
//! /login                  sign-in
//! /404                    not found
//! /<entity>               list
//! /<entity>/new           create   (?<relation>_id=&<relation>_id_disable=true)
//! /<entity>/<id>/view     detail
//! /<entity>/<id>/edit     edit
//! ```

mod resolver;

pub use resolver::{EntityResolver, RelationParams, Resolution, ResolvedEntity, Routed};

use std::collections::HashMap;

use crate::model::{Entity, Facility, Resident, Room};

/// Route of the not-found page that resolvers redirect to.
pub const NOT_FOUND_ROUTE: &str = "/404";

/// Parsing base for application URLs, which are always path + query.
const ROUTE_BASE: &str = "http://app.invalid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Facility,
    Room,
    Resident,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [Self::Facility, Self::Room, Self::Resident];

    pub fn segment(&self) -> &'static str {
        match self {
            Self::Facility => Facility::ROUTE,
            Self::Room => Room::ROUTE,
            Self::Resident => Resident::ROUTE,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Facility => Facility::TITLE,
            Self::Room => Room::TITLE,
            Self::Resident => Resident::TITLE,
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.segment() == segment)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

/// Where a URL leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Login,
    NotFound,
    List(EntityKind),
    Create(EntityKind),
    View(EntityKind),
    Edit(EntityKind),
}

/// Path and query parameters of one navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSnapshot {
    pub url: String,
    pub params: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
}

impl RouteSnapshot {
    /// Non-empty path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Non-empty query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Parse an application URL into its route and snapshot. Unknown paths map
/// to `AppRoute::NotFound`.
pub fn parse_route(url: &str) -> (AppRoute, RouteSnapshot) {
    let mut snapshot = RouteSnapshot {
        url: url.to_string(),
        ..Default::default()
    };
    let Ok(parsed) = reqwest::Url::parse(ROUTE_BASE).and_then(|base| base.join(url)) else {
        return (AppRoute::NotFound, snapshot);
    };
    snapshot.query_params = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let route = match segments.as_slice() {
        [] => AppRoute::Home,
        ["login"] => AppRoute::Login,
        ["404"] => AppRoute::NotFound,
        [entity] => match EntityKind::from_segment(entity) {
            Some(kind) => AppRoute::List(kind),
            None => AppRoute::NotFound,
        },
        [entity, "new"] => match EntityKind::from_segment(entity) {
            Some(kind) => AppRoute::Create(kind),
            None => AppRoute::NotFound,
        },
        [entity, id, action @ ("view" | "edit")] => match EntityKind::from_segment(entity) {
            Some(kind) => {
                snapshot.params.insert("id".to_string(), id.to_string());
                if *action == "view" {
                    AppRoute::View(kind)
                } else {
                    AppRoute::Edit(kind)
                }
            }
            None => AppRoute::NotFound,
        },
        _ => AppRoute::NotFound,
    };
    (route, snapshot)
}
