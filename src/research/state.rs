use crate::api::{Base, DirectoryEntry};

const INBOX: &str = "INBOX";

/// Top-level research directories, split into the INBOX and everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreSummary {
    pub inbox: Option<DirectoryEntry>,
    pub genres: Vec<DirectoryEntry>,
}

impl GenreSummary {
    /// Derive from a root listing; hidden (`.`) and private (`_`) directories are skipped.
    pub fn from_root(entries: &[DirectoryEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries.iter().filter(|e| {
            e.is_dir && !e.name.starts_with('_') && !e.name.starts_with('.')
        }) {
            if entry.name == INBOX {
                summary.inbox = Some(entry.clone());
            } else {
                summary.genres.push(entry.clone());
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    pub path: String,
}

/// View state owned by a [`Navigator`](super::Navigator).
///
/// `parsed_rows` is `Some` exactly when `selected_file` is a `.csv` file.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceViewState {
    pub base: Base,
    pub current_path: String,
    pub entries: Vec<DirectoryEntry>,
    pub selected_file: Option<String>,
    pub content: String,
    pub parsed_rows: Option<Vec<Vec<String>>>,
    pub search_keyword: String,
    /// Listing request in flight.
    pub loading: bool,
    /// File content request in flight.
    pub content_loading: bool,
    pub error: Option<String>,
    pub genres: Option<GenreSummary>,
}

impl WorkspaceViewState {
    /// Entries whose name followed by path contains the keyword, ignoring case.
    /// An empty keyword shows every entry.
    pub fn visible_entries(&self) -> Vec<&DirectoryEntry> {
        if self.search_keyword.is_empty() {
            return self.entries.iter().collect();
        }
        let keyword = self.search_keyword.to_lowercase();
        self.entries
            .iter()
            .filter(|e| format!("{}{}", e.name, e.path).to_lowercase().contains(&keyword))
            .collect()
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            label: self.base.to_string(),
            path: String::new(),
        }];
        let mut cumulative = String::new();
        for segment in self.current_path.split('/').filter(|s| !s.is_empty()) {
            if !cumulative.is_empty() {
                cumulative.push('/');
            }
            cumulative.push_str(segment);
            crumbs.push(Breadcrumb {
                label: segment.to_string(),
                path: cumulative.clone(),
            });
        }
        crumbs
    }

    pub fn parent_path(&self) -> String {
        resolve_parent_path(&self.current_path)
    }
}

/// Parent of a slash-separated relative path; leading/trailing separators are ignored.
pub fn resolve_parent_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => trimmed[..idx].to_string(),
        None => String::new(),
    }
}
