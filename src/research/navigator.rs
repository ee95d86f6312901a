use super::preview::{is_csv, parse_csv_rows, pick_auto_preview};
use super::state::{GenreSummary, WorkspaceViewState};
use crate::api::{ApiError, Base, DirectoryEntry, FileContent, WorkspaceApi};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

struct Inner {
    view: WorkspaceViewState,
    /// Generation of the newest listing request; older responses are dropped.
    listing_seq: u64,
    /// Generation of the newest file request.
    file_seq: u64,
}

/// Browser/preview controller for the research workspace tree.
///
/// Listing and file-content requests are independent flows. Within each flow
/// only the most recently issued request may write its result; a navigation
/// also invalidates any file request still in flight.
pub struct Navigator {
    api: Arc<dyn WorkspaceApi>,
    inner: Mutex<Inner>,
    closed: CancellationToken,
}

impl Navigator {
    pub fn new(api: Arc<dyn WorkspaceApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner {
                view: WorkspaceViewState::default(),
                listing_seq: 0,
                file_seq: 0,
            }),
            closed: CancellationToken::new(),
        }
    }

    pub fn snapshot(&self) -> WorkspaceViewState {
        self.inner.lock().view.clone()
    }

    /// Initial load: the root of the research base.
    pub async fn mount(&self) {
        self.navigate_to(Base::Research, "").await;
    }

    /// Re-list the current directory. Clears the selection like any navigation.
    pub async fn reload(&self) {
        let (base, path) = {
            let inner = self.inner.lock();
            (inner.view.base, inner.view.current_path.clone())
        };
        self.navigate_to(base, &path).await;
    }

    pub async fn navigate_to(&self, base: Base, path: &str) {
        let token = {
            let mut inner = self.inner.lock();
            inner.listing_seq += 1;
            inner.view.loading = true;
            inner.view.error = None;
            inner.listing_seq
        };

        let result = self.api.list_directory(base, path).await;

        let preview = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            if self.closed.is_cancelled() || inner.listing_seq != token {
                debug!(%base, path, "discarding superseded listing");
                return;
            }
            inner.view.loading = false;
            match result {
                Ok(listing) => {
                    let view = &mut inner.view;
                    view.base = base;
                    view.current_path = if listing.path.is_empty() {
                        path.to_string()
                    } else {
                        listing.path
                    };
                    view.entries = listing.entries;
                    view.selected_file = None;
                    view.content.clear();
                    view.parsed_rows = None;
                    view.search_keyword.clear();
                    view.content_loading = false;
                    if base == Base::Research && path.is_empty() {
                        view.genres = Some(GenreSummary::from_root(&view.entries));
                    }
                    debug!(%base, path = %view.current_path, entries = view.entries.len(), "listing applied");
                    // The auto-preview claims the file slot under the same lock that
                    // applied the listing; a bare bump drops any older file request.
                    let candidate = pick_auto_preview(&view.entries).map(|e| e.path.clone());
                    match candidate {
                        Some(file) => Some((Self::begin_file(inner), file)),
                        None => {
                            inner.file_seq += 1;
                            None
                        }
                    }
                }
                Err(err) => {
                    warn!(%base, path, error = %err, "listing failed");
                    inner.view.error = Some(err.to_string());
                    None
                }
            }
        };

        if let Some((file_token, file)) = preview {
            debug!(path = %file, "auto-preview");
            let result = self.api.read_file(base, &file).await;
            self.finish_file(file_token, &file, result);
        }
    }

    pub async fn open_entry(&self, entry: &DirectoryEntry) {
        if entry.is_dir {
            let base = self.inner.lock().view.base;
            self.navigate_to(base, &entry.path).await;
        } else {
            self.open_file(&entry.path).await;
        }
    }

    /// Open a file from the current base.
    pub async fn open_file(&self, path: &str) {
        let (token, base) = {
            let mut inner = self.inner.lock();
            (Self::begin_file(&mut inner), inner.view.base)
        };
        let result = self.api.read_file(base, path).await;
        self.finish_file(token, path, result);
    }

    /// Open a file from `base` without listing its directory first.
    /// The current listing and base are left as they are.
    pub async fn preview_file(&self, base: Base, path: &str) {
        let token = Self::begin_file(&mut self.inner.lock());
        let result = self.api.read_file(base, path).await;
        self.finish_file(token, path, result);
    }

    fn begin_file(inner: &mut Inner) -> u64 {
        inner.file_seq += 1;
        inner.view.content_loading = true;
        inner.view.error = None;
        inner.file_seq
    }

    fn finish_file(&self, token: u64, path: &str, result: Result<FileContent, ApiError>) {
        let mut inner = self.inner.lock();
        if self.closed.is_cancelled() || inner.file_seq != token {
            debug!(path, "discarding superseded file content");
            return;
        }
        let view = &mut inner.view;
        view.content_loading = false;
        match result {
            Ok(file) => {
                view.parsed_rows = is_csv(path).then(|| parse_csv_rows(&file.content));
                view.selected_file = Some(path.to_string());
                view.content = file.content;
            }
            Err(err) => {
                warn!(path, error = %err, "file read failed");
                view.error = Some(err.to_string());
            }
        }
    }

    pub async fn go_up(&self) {
        let (base, parent) = {
            let inner = self.inner.lock();
            (inner.view.base, inner.view.parent_path())
        };
        self.navigate_to(base, &parent).await;
    }

    /// Display filter only; `entries` is untouched.
    pub fn set_search_keyword(&self, keyword: &str) {
        self.inner.lock().view.search_keyword = keyword.to_string();
    }

    /// Teardown: responses still in flight are dropped.
    pub fn close(&self) {
        self.closed.cancel();
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        self.closed.cancel();
    }
}
