use super::assets::with_cache_bust;
use super::state::GalleryViewState;
use crate::api::{ThumbnailAsset, WorkspaceApi};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

struct Inner {
    view: GalleryViewState,
    /// Generation of the newest library load; each selection or refresh bumps it.
    load_seq: u64,
    /// Channel whose load currently holds `load_seq`.
    in_flight: Option<String>,
    /// Generation of the newest overview fetch.
    overview_seq: u64,
}

/// Channel thumbnail gallery with lazily loaded per-channel libraries.
pub struct Gallery {
    api: Arc<dyn WorkspaceApi>,
    inner: Mutex<Inner>,
    closed: CancellationToken,
}

impl Gallery {
    pub fn new(api: Arc<dyn WorkspaceApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner {
                view: GalleryViewState::default(),
                load_seq: 0,
                in_flight: None,
                overview_seq: 0,
            }),
            closed: CancellationToken::new(),
        }
    }

    pub fn snapshot(&self) -> GalleryViewState {
        self.inner.lock().view.clone()
    }

    /// Fetch the overview, keep or pick the selected channel, then load its library.
    pub async fn mount(&self) {
        let token = {
            let mut inner = self.inner.lock();
            inner.overview_seq += 1;
            inner.view.overview_loading = true;
            inner.view.overview_error = None;
            inner.overview_seq
        };

        let result = self.api.fetch_overview().await;

        {
            let mut inner = self.inner.lock();
            if self.closed.is_cancelled() || inner.overview_seq != token {
                debug!("discarding superseded overview");
                return;
            }
            let view = &mut inner.view;
            view.overview_loading = false;
            match result {
                Ok(overview) => {
                    let keep = view
                        .selected_channel
                        .as_deref()
                        .is_some_and(|c| overview.contains(c));
                    if !keep {
                        view.selected_channel = overview.channels.first().map(|c| c.channel.clone());
                    }
                    debug!(channels = overview.channels.len(), selected = ?view.selected_channel, "overview loaded");
                    view.overview = Some(overview);
                }
                Err(err) => {
                    warn!(error = %err, "thumbnail overview failed");
                    view.overview_error = Some(err.to_string());
                }
            }
        }

        self.load_active().await;
    }

    pub async fn select_channel(&self, channel: &str) {
        self.inner.lock().view.selected_channel = Some(channel.to_string());
        self.load_active().await;
    }

    /// Force a refetch of the active channel.
    pub async fn refresh(&self) {
        {
            let mut inner = self.inner.lock();
            let view = &mut inner.view;
            if let Some(channel) = view.selected_channel.clone() {
                if let Some(lib) = view.libraries.get_mut(&channel) {
                    lib.loaded = false;
                }
            }
            view.refresh_counter += 1;
        }
        self.load_active().await;
    }

    pub fn set_qc_only(&self, qc_only: bool) {
        self.inner.lock().view.qc_only = qc_only;
    }

    /// Load the selected channel unless already loaded.
    ///
    /// Every call supersedes the previous one, so a response for an earlier
    /// selection never lands on top of a later one.
    async fn load_active(&self) {
        let (token, channel) = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            let Some(channel) = inner.view.selected_channel.clone() else {
                return;
            };
            inner.load_seq += 1;
            if let Some(previous) = inner.in_flight.take() {
                if previous != channel {
                    if let Some(lib) = inner.view.libraries.get_mut(&previous) {
                        lib.loading = false;
                    }
                }
            }
            let lib = inner.view.libraries.entry(channel.clone()).or_default();
            if lib.loaded {
                return;
            }
            lib.loading = true;
            lib.error = None;
            inner.in_flight = Some(channel.clone());
            (inner.load_seq, channel)
        };

        let result = self.api.fetch_channel_assets(&channel).await;

        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        if self.closed.is_cancelled() || inner.load_seq != token {
            debug!(%channel, "discarding superseded library load");
            return;
        }
        inner.in_flight = None;
        let lib = inner.view.libraries.entry(channel.clone()).or_default();
        lib.loading = false;
        match result {
            Ok(assets) => {
                debug!(%channel, assets = assets.len(), "library loaded");
                lib.assets = assets;
                lib.loaded = true;
            }
            Err(err) => {
                warn!(%channel, error = %err, "library load failed");
                lib.error = Some(err.to_string());
            }
        }
    }

    /// Delete one asset. Returns `true` when the backend accepted the delete.
    ///
    /// Deletes of different assets may run concurrently; a second delete of an
    /// asset already in flight is ignored.
    pub async fn delete_asset(&self, channel: &str, asset_id: &str) -> bool {
        let key = (channel.to_string(), asset_id.to_string());
        let relative_path = {
            let mut guard = self.inner.lock();
            let view = &mut guard.view;
            let Some(asset) = view
                .libraries
                .get(channel)
                .and_then(|lib| lib.assets.iter().find(|a| a.id == asset_id))
            else {
                warn!(channel, asset_id, "delete requested for unknown asset");
                return false;
            };
            let relative_path = asset.relative_path.clone();
            if !view.deleting.insert(key.clone()) {
                return false;
            }
            relative_path
        };

        let result = self.api.delete_asset(channel, &relative_path).await;

        let mut guard = self.inner.lock();
        let view = &mut guard.view;
        view.deleting.remove(&key);
        if self.closed.is_cancelled() {
            return result.is_ok();
        }
        let lib = view.libraries.entry(channel.to_string()).or_default();
        match result {
            Ok(()) => {
                lib.assets.retain(|a| a.id != asset_id);
                info!(channel, asset_id, "asset removed from library");
                true
            }
            Err(err) => {
                warn!(channel, asset_id, error = %err, "asset delete failed");
                lib.error = Some(err.to_string());
                false
            }
        }
    }

    /// Image URL for an asset, cache-busted by its `updated_at`.
    pub fn preview_url(&self, asset: &ThumbnailAsset) -> String {
        with_cache_bust(
            &self.api.resolve_url(&asset.public_url),
            asset.updated_at.as_deref(),
        )
    }

    /// Teardown: pending loads are dropped when they resolve.
    pub fn close(&self) {
        self.closed.cancel();
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.closed.cancel();
    }
}
