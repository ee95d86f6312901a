use crate::api::ThumbnailAsset;

const QC_PATH_PREFIXES: [&str; 3] = ["_qc/", "library/qc/", "qc/"];
const QC_FILE_PREFIX: &str = "qc__";
const CACHE_BUST_PARAM: &str = "v";

/// Quality-control assets are identified by directory or file-name convention.
pub fn is_qc_asset(asset: &ThumbnailAsset) -> bool {
    let path = asset.relative_path.replace('\\', "/");
    QC_PATH_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
        || asset.file_name.starts_with(QC_FILE_PREFIX)
}

/// Newest first by lexical `updated_at`; missing timestamps sort last.
/// Stable, so equal timestamps keep their input order.
pub fn sort_newest_first(assets: &mut [&ThumbnailAsset]) {
    assets.sort_by(|a, b| {
        let a = a.updated_at.as_deref().unwrap_or("");
        let b = b.updated_at.as_deref().unwrap_or("");
        b.cmp(a)
    });
}

/// Assets as the gallery shows them: sorted, then optionally QC-only.
pub fn visible_assets(assets: &[ThumbnailAsset], qc_only: bool) -> Vec<&ThumbnailAsset> {
    let mut visible: Vec<&ThumbnailAsset> = assets
        .iter()
        .filter(|a| !qc_only || is_qc_asset(a))
        .collect();
    sort_newest_first(&mut visible);
    visible
}

/// Append the asset's `updated_at` as a cache-busting query parameter.
pub fn with_cache_bust(url: &str, updated_at: Option<&str>) -> String {
    let Some(stamp) = updated_at else {
        return url.to_string();
    };
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{url}{separator}{CACHE_BUST_PARAM}={}",
        urlencoding::encode(stamp)
    )
}
