//! Desktop client for the catalog REST API.
//!
//! The egui front end only renders `CatalogState` and dispatches
//! `CatalogAction`s; `CatalogManager` owns the state and performs every
//! backend call.

pub mod app;
pub mod catalog;
pub mod config;
pub mod http_client;
