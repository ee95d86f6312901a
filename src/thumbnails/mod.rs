//! Channel thumbnail gallery
//!
//! Per-channel asset libraries loaded on first selection, a QC-only display
//! filter, and asset deletion reconciled against the local cache.

pub mod assets;
pub mod gallery;
pub mod state;

pub use assets::{is_qc_asset, visible_assets, with_cache_bust};
pub use gallery::Gallery;
pub use state::{ChannelLibraryState, GalleryViewState};
