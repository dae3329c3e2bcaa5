//! CLI command implementations.
//!
//! Each submodule owns one `Commands` variant:
//!
//! | Module      | Commands handled                                        |
//! |-------------|----------------------------------------------------------|
//! | `facility`  | `Facility` (list, search, show, create, edit, delete)   |
//! | `room`      | `Room`                                                  |
//! | `resident`  | `Resident`                                              |
//! | `login`     | `Login`                                                 |
//! | `config`    | `Config`                                                |
//!
//! `common` holds the sign-in, listing, form and delete plumbing they share.

mod common;

pub mod config;
pub mod facility;
pub mod login;
pub mod resident;
pub mod room;

pub use config::cmd_config;
pub use facility::cmd_facility;
pub use login::cmd_login;
pub use resident::cmd_resident;
pub use room::cmd_room;
