//! Plain-text rendering of controller snapshots.
//!
//! Everything here is a pure function of a view state; nothing mutates or fetches.

use crate::api::{DirectoryEntry, ThumbnailAsset};
use crate::research::WorkspaceViewState;
use crate::thumbnails::GalleryViewState;
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Rows of a CSV preview shown in the terminal table.
const TABLE_ROWS: usize = 20;

pub fn format_modified(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "-".to_string(),
    }
}

fn entry_line(entry: &DirectoryEntry, selected: Option<&str>) -> String {
    let marker = if selected == Some(entry.path.as_str()) { '>' } else { ' ' };
    let name = if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };
    format!(
        "{marker} {name:<40} {}",
        format_modified(entry.modified.as_deref())
    )
}

/// Breadcrumbs, entry list, then the preview pane.
pub fn render_workspace(view: &WorkspaceViewState) -> String {
    let mut out = String::new();
    let crumbs = view.breadcrumbs();
    let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
    let _ = writeln!(out, "{}", labels.join(" / "));
    if view.loading {
        let _ = writeln!(out, "(loading...)");
    }
    if let Some(err) = &view.error {
        let _ = writeln!(out, "error: {err}");
    }

    if let Some(genres) = &view.genres {
        if view.current_path.is_empty() {
            if let Some(inbox) = &genres.inbox {
                let _ = writeln!(out, "inbox: {}", inbox.path);
            }
            let names: Vec<&str> = genres.genres.iter().map(|g| g.name.as_str()).collect();
            let _ = writeln!(out, "genres: {}", names.join(", "));
        }
    }

    let visible = view.visible_entries();
    let _ = writeln!(out);
    if !view.search_keyword.is_empty() {
        let _ = writeln!(
            out,
            "filter '{}': {} of {} entries",
            view.search_keyword,
            visible.len(),
            view.entries.len()
        );
    }
    for entry in visible {
        let _ = writeln!(out, "{}", entry_line(entry, view.selected_file.as_deref()));
    }

    if let Some(selected) = &view.selected_file {
        let _ = writeln!(out, "\n--- {selected} ---");
        match &view.parsed_rows {
            Some(rows) => out.push_str(&render_table(rows)),
            None => {
                out.push_str(&view.content);
                if !view.content.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    } else if view.content_loading {
        let _ = writeln!(out, "\n(loading preview...)");
    }
    out
}

/// Column-aligned table of the first rows of a CSV preview.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let shown = &rows[..rows.len().min(TABLE_ROWS)];
    let columns = shown.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            shown
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in shown {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(col, &width)| {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                format!("{cell:<width$}")
            })
            .collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
    if rows.len() > shown.len() {
        let _ = writeln!(out, "... {} more rows", rows.len() - shown.len());
    }
    out
}

/// Channel list, then the visible assets of the selected channel.
pub fn render_gallery(
    view: &GalleryViewState,
    preview_url: impl Fn(&ThumbnailAsset) -> String,
) -> String {
    let mut out = String::new();
    if let Some(err) = &view.overview_error {
        let _ = writeln!(out, "error: {err}");
    }
    if let Some(overview) = &view.overview {
        for block in &overview.channels {
            let marker = if view.selected_channel.as_deref() == Some(block.channel.as_str()) {
                '*'
            } else {
                ' '
            };
            let _ = writeln!(out, "{marker} {} ({})", block.display_title(), block.channel);
        }
    }

    let Some(channel) = view.selected_channel.as_deref() else {
        return out;
    };
    let Some(lib) = view.active_library() else {
        return out;
    };
    let _ = writeln!(out);
    if view.qc_only {
        let _ = writeln!(out, "[QC only]");
    }
    if lib.loading {
        let _ = writeln!(out, "(loading...)");
    }
    if let Some(err) = &lib.error {
        let _ = writeln!(out, "error: {err}");
    }
    let visible = view.visible_assets();
    if visible.is_empty() && lib.loaded {
        let _ = writeln!(out, "no assets");
    }
    for asset in visible {
        let status = if view.is_deleting(channel, &asset.id) {
            " (deleting)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<8} {:<32} {:<20} {}{status}",
            asset.id,
            asset.relative_path,
            asset.updated_at.as_deref().unwrap_or("-"),
            preview_url(asset)
        );
    }
    out
}
