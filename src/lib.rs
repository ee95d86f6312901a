//! Workbench — research workspace browser and channel thumbnail gallery.
//!
//! Two controllers ([`research::Navigator`], [`thumbnails::Gallery`]) keep
//! view state synchronized with a backend HTTP API reached through
//! [`api::WorkspaceApi`]. All durable state lives on the backend; the
//! controllers only cache the latest responses.

pub mod api;
pub mod config;
pub mod logging;
pub mod render;
pub mod research;
pub mod thumbnails;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, ApiError, WorkspaceApi};
pub use config::Config;
pub use research::Navigator;
pub use thumbnails::Gallery;
