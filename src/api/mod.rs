//! Backend API client
//!
//! Typed access to the directory listing, file content, and thumbnail
//! library endpoints. Controllers depend on the [`WorkspaceApi`] trait,
//! not on the HTTP transport.

pub mod client;
pub mod error;
pub mod schema;

pub use client::{resolve_url, ApiClient};
pub use error::ApiError;
pub use schema::{
    Base, ChannelBlock, DirectoryEntry, DirectoryListing, FileContent, ThumbnailAsset,
    ThumbnailOverview,
};

use async_trait::async_trait;

#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// List entries under `path` (empty string for the root of `base`).
    async fn list_directory(&self, base: Base, path: &str) -> Result<DirectoryListing, ApiError>;

    /// Fetch a file's raw text content.
    async fn read_file(&self, base: Base, path: &str) -> Result<FileContent, ApiError>;

    async fn fetch_overview(&self) -> Result<ThumbnailOverview, ApiError>;

    async fn fetch_channel_assets(&self, channel: &str) -> Result<Vec<ThumbnailAsset>, ApiError>;

    async fn delete_asset(&self, channel: &str, relative_path: &str) -> Result<(), ApiError>;

    /// Absolute URL for a server-relative asset path. Pure; never touches the network.
    fn resolve_url(&self, path: &str) -> String;
}
