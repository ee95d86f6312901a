use super::error::ApiError;
use super::schema::{Base, DirectoryListing, FileContent, ThumbnailAsset, ThumbnailOverview};
use super::WorkspaceApi;
use crate::config::ApiConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

const LIST_ROUTE: &str = "/api/workspace/list";
const FILE_ROUTE: &str = "/api/workspace/file";
const OVERVIEW_ROUTE: &str = "/api/thumbnails/overview";
const LIBRARY_ROUTE: &str = "/api/thumbnails/library";

/// reqwest-backed client for the workspace and thumbnail backend.
///
/// No retries are performed; each call resolves to exactly one result.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn library_endpoint(&self, channel: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            LIBRARY_ROUTE,
            urlencoding::encode(channel)
        )
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "backend request failed");
            ApiError::from(e)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), status.canonical_reason(), &body);
        warn!(status = status.as_u16(), error = %err, "backend returned an error status");
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl WorkspaceApi for ApiClient {
    async fn list_directory(&self, base: Base, path: &str) -> Result<DirectoryListing, ApiError> {
        debug!(%base, path, "listing directory");
        let request = self
            .http
            .get(self.endpoint(LIST_ROUTE))
            .query(&[("base", base.as_str()), ("path", path)]);
        self.get_json(request).await
    }

    async fn read_file(&self, base: Base, path: &str) -> Result<FileContent, ApiError> {
        debug!(%base, path, "reading file");
        let request = self
            .http
            .get(self.endpoint(FILE_ROUTE))
            .query(&[("base", base.as_str()), ("path", path)]);
        self.get_json(request).await
    }

    async fn fetch_overview(&self) -> Result<ThumbnailOverview, ApiError> {
        debug!("fetching thumbnail overview");
        self.get_json(self.http.get(self.endpoint(OVERVIEW_ROUTE)))
            .await
    }

    async fn fetch_channel_assets(&self, channel: &str) -> Result<Vec<ThumbnailAsset>, ApiError> {
        debug!(channel, "fetching channel library");
        self.get_json(self.http.get(self.library_endpoint(channel)))
            .await
    }

    async fn delete_asset(&self, channel: &str, relative_path: &str) -> Result<(), ApiError> {
        let url = format!("{}/asset", self.library_endpoint(channel));
        let request = self.http.delete(url).query(&[("path", relative_path)]);
        self.send(request).await?;
        info!(channel, relative_path, "deleted thumbnail asset");
        Ok(())
    }

    fn resolve_url(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }
}

/// Map a server-relative asset path onto `base_url`. Absolute URLs pass through.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    let path = path.trim();
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}
