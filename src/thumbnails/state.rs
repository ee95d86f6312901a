use super::assets::visible_assets;
use crate::api::{ThumbnailAsset, ThumbnailOverview};
use std::collections::{HashMap, HashSet};

/// Cached library of one channel.
///
/// A refresh clears `loaded` but keeps `assets`, so the last good list stays
/// visible while the refetch runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelLibraryState {
    pub assets: Vec<ThumbnailAsset>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GalleryViewState {
    pub overview: Option<ThumbnailOverview>,
    pub overview_loading: bool,
    pub overview_error: Option<String>,
    pub selected_channel: Option<String>,
    pub libraries: HashMap<String, ChannelLibraryState>,
    pub qc_only: bool,
    /// (channel, asset id) pairs with a delete in flight.
    pub deleting: HashSet<(String, String)>,
    pub refresh_counter: u64,
}

impl GalleryViewState {
    pub fn active_library(&self) -> Option<&ChannelLibraryState> {
        self.selected_channel
            .as_ref()
            .and_then(|channel| self.libraries.get(channel))
    }

    /// Sorted (and QC-filtered when enabled) assets of the selected channel.
    pub fn visible_assets(&self) -> Vec<&ThumbnailAsset> {
        self.active_library()
            .map(|lib| visible_assets(&lib.assets, self.qc_only))
            .unwrap_or_default()
    }

    pub fn is_deleting(&self, channel: &str, asset_id: &str) -> bool {
        self.deleting
            .contains(&(channel.to_string(), asset_id.to_string()))
    }

    pub fn loaded_channels(&self) -> HashSet<&str> {
        self.libraries
            .iter()
            .filter(|(_, lib)| lib.loaded)
            .map(|(channel, _)| channel.as_str())
            .collect()
    }
}
