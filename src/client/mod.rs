//! Gerrit REST API client and wire models.

pub mod api;
pub mod models;

pub use api::GerritClient;
