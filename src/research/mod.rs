//! Research workspace browser
//!
//! Directory listing, breadcrumb navigation, search filtering, and the
//! text/CSV preview pane for the `research` and `scripts` bases.

pub mod navigator;
pub mod preview;
pub mod state;

pub use navigator::Navigator;
pub use preview::{is_text_previewable, parse_csv_rows, pick_auto_preview, CSV_PREVIEW_ROWS};
pub use state::{resolve_parent_path, Breadcrumb, GenreSummary, WorkspaceViewState};
