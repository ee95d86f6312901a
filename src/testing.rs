//! In-memory [`WorkspaceApi`] for controller tests.
//!
//! Responses are canned per call key; a call can be held open with
//! [`MockApi::gate`] until the test releases it, which is how overlapping
//! requests are staged.

use crate::api::{
    ApiError, Base, DirectoryEntry, DirectoryListing, FileContent, ThumbnailAsset,
    ThumbnailOverview, WorkspaceApi,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;

#[derive(Default)]
pub struct MockApi {
    listings: Mutex<HashMap<String, Result<DirectoryListing, ApiError>>>,
    files: Mutex<HashMap<String, Result<FileContent, ApiError>>>,
    overview: Mutex<Option<Result<ThumbnailOverview, ApiError>>>,
    libraries: Mutex<HashMap<String, Result<Vec<ThumbnailAsset>, ApiError>>>,
    delete_failures: Mutex<HashMap<String, ApiError>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<String>>,
}

pub fn file_entry(path: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path: path.to_string(),
        is_dir: false,
        modified: None,
    }
}

pub fn dir_entry(path: &str) -> DirectoryEntry {
    DirectoryEntry {
        is_dir: true,
        ..file_entry(path)
    }
}

pub fn asset(id: &str, relative_path: &str, updated_at: Option<&str>) -> ThumbnailAsset {
    ThumbnailAsset {
        id: id.to_string(),
        file_name: relative_path.rsplit('/').next().unwrap_or(relative_path).to_string(),
        relative_path: relative_path.to_string(),
        public_url: format!("/thumbs/{relative_path}"),
        updated_at: updated_at.map(str::to_string),
    }
}

pub fn network_error(msg: &str) -> ApiError {
    ApiError::Network(msg.to_string())
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listing_key(base: Base, path: &str) -> String {
        format!("list:{base}:{path}")
    }

    pub fn with_listing(self, base: Base, path: &str, entries: Vec<DirectoryEntry>) -> Self {
        self.set_listing(
            base,
            path,
            Ok(DirectoryListing {
                path: path.to_string(),
                entries,
            }),
        );
        self
    }

    pub fn set_listing(&self, base: Base, path: &str, result: Result<DirectoryListing, ApiError>) {
        self.listings
            .lock()
            .insert(Self::listing_key(base, path), result);
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files.lock().insert(
            path.to_string(),
            Ok(FileContent {
                content: content.to_string(),
            }),
        );
        self
    }

    pub fn set_file_error(&self, path: &str, err: ApiError) {
        self.files.lock().insert(path.to_string(), Err(err));
    }

    pub fn with_overview(self, channels: &[&str]) -> Self {
        let overview = ThumbnailOverview {
            channels: channels
                .iter()
                .map(|c| crate::api::ChannelBlock {
                    channel: c.to_string(),
                    channel_title: None,
                    library_path: None,
                })
                .collect(),
        };
        self.set_overview(Ok(overview));
        self
    }

    pub fn set_overview(&self, result: Result<ThumbnailOverview, ApiError>) {
        *self.overview.lock() = Some(result);
    }

    pub fn with_library(self, channel: &str, assets: Vec<ThumbnailAsset>) -> Self {
        self.set_library(channel, Ok(assets));
        self
    }

    pub fn set_library(&self, channel: &str, result: Result<Vec<ThumbnailAsset>, ApiError>) {
        self.libraries.lock().insert(channel.to_string(), result);
    }

    pub fn fail_delete(&self, relative_path: &str, err: ApiError) {
        self.delete_failures
            .lock()
            .insert(relative_path.to_string(), err);
    }

    /// Hold the next call with `key` open until the returned sender fires (or drops).
    pub fn gate(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(key.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, key: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == key).count()
    }

    /// Yield until a call with `key` has been issued.
    pub async fn wait_for_call(&self, key: &str) {
        while self.call_count(key) == 0 {
            tokio::task::yield_now().await;
        }
    }

    async fn enter(&self, key: String) {
        let gate = {
            self.calls.lock().push(key.clone());
            self.gates.lock().remove(&key)
        };
        if let Some(rx) = gate {
            let _ = rx.await;
        }
    }
}

#[async_trait]
impl WorkspaceApi for MockApi {
    async fn list_directory(&self, base: Base, path: &str) -> Result<DirectoryListing, ApiError> {
        let key = Self::listing_key(base, path);
        self.enter(key.clone()).await;
        self.listings
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Http {
                status: 404,
                message: format!("no listing for {path}"),
            }))
    }

    async fn read_file(&self, base: Base, path: &str) -> Result<FileContent, ApiError> {
        self.calls.lock().push(format!("read:{base}:{path}"));
        self.enter(format!("file:{path}")).await;
        self.files
            .lock()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Http {
                status: 404,
                message: format!("no file {path}"),
            }))
    }

    /// The response is captured when the call starts, so a gated call returns
    /// the overview that was current at issue time.
    async fn fetch_overview(&self) -> Result<ThumbnailOverview, ApiError> {
        let response = self
            .overview
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(ThumbnailOverview::default()));
        self.enter("overview".to_string()).await;
        response
    }

    async fn fetch_channel_assets(&self, channel: &str) -> Result<Vec<ThumbnailAsset>, ApiError> {
        self.enter(format!("assets:{channel}")).await;
        self.libraries
            .lock()
            .get(channel)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn delete_asset(&self, channel: &str, relative_path: &str) -> Result<(), ApiError> {
        self.enter(format!("delete:{channel}:{relative_path}")).await;
        match self.delete_failures.lock().get(relative_path) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn resolve_url(&self, path: &str) -> String {
        crate::api::resolve_url("http://backend.test", path)
    }
}
