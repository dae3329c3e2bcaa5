pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod form;
pub mod logging;
pub mod model;
pub mod pages;
pub mod route;
pub mod update;
pub mod views;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
