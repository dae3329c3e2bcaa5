//! REST access to the backend.
//!
//! | Module       | Responsibility                                          |
//! |--------------|---------------------------------------------------------|
//! | `client`     | `ApiClient`: base URL, bearer token, status mapping     |
//! | `service`    | `EntityService<E>`: CRUD, search, scoped listings       |
//! | `pagination` | `PageRequest` query parameters and `Page` results       |

pub mod client;
pub mod pagination;
pub mod service;

pub use client::ApiClient;
pub use pagination::{Page, PageRequest};
pub use service::EntityService;
