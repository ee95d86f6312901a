use crate::api::DirectoryEntry;

/// Maximum number of CSV lines parsed for the table preview.
pub const CSV_PREVIEW_ROWS: usize = 200;

/// Suffixes the preview pane renders as text.
const TEXT_SUFFIXES: [&str; 4] = [".md", ".txt", ".csv", ".json"];

/// Files the preview pane can show as text: known text suffixes, or no extension at all.
pub fn is_text_previewable(entry: &DirectoryEntry) -> bool {
    if entry.is_dir {
        return false;
    }
    let name = entry.name.to_lowercase();
    TEXT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) || !name.contains('.')
}

/// Lowercased extension of the last path segment, if any.
pub fn extension(path: &str) -> Option<String> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

pub fn is_csv(path: &str) -> bool {
    extension(path).as_deref() == Some("csv")
}

/// Naive CSV split: one row per line (first [`CSV_PREVIEW_ROWS`] lines), cells split on ",".
///
/// Quoted fields are not honored; a comma inside quotes still splits the cell.
pub fn parse_csv_rows(content: &str) -> Vec<Vec<String>> {
    content
        .lines()
        .take(CSV_PREVIEW_ROWS)
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

/// Pick the entry to open automatically: `index.md`, then `readme.md`,
/// then the first text-previewable file.
pub fn pick_auto_preview(entries: &[DirectoryEntry]) -> Option<&DirectoryEntry> {
    let named = |wanted: &str| {
        entries
            .iter()
            .find(|e| !e.is_dir && e.name.trim().eq_ignore_ascii_case(wanted))
    };
    named("index.md")
        .or_else(|| named("readme.md"))
        .or_else(|| entries.iter().find(|e| is_text_previewable(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            path: format!("notes/{name}"),
            is_dir: false,
            modified: None,
        }
    }

    fn dir(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            is_dir: true,
            ..file(name)
        }
    }

    #[test]
    fn text_previewable_by_suffix_or_missing_extension() {
        assert!(is_text_previewable(&file("plan.md")));
        assert!(is_text_previewable(&file("DATA.CSV")));
        assert!(is_text_previewable(&file("config.json")));
        assert!(is_text_previewable(&file("notes.txt")));
        assert!(is_text_previewable(&file("Makefile")));
        assert!(!is_text_previewable(&file("cover.png")));
        assert!(!is_text_previewable(&file("archive.tar.gz")));
        assert!(!is_text_previewable(&dir("drafts")));
    }

    #[test]
    fn extension_ignores_dots_in_directories() {
        assert_eq!(extension("v1.2/report"), None);
        assert_eq!(extension("v1.2/report.CSV").as_deref(), Some("csv"));
        assert!(is_csv("a/b/Sheet.Csv"));
        assert!(!is_csv("a/b/sheet.csv.bak"));
    }

    #[test]
    fn csv_splits_lines_and_commas() {
        assert_eq!(
            parse_csv_rows("a,b\nc,d"),
            vec![vec!["a", "b"], vec!["c", "d"]]
        );
    }

    #[test]
    fn csv_keeps_quoted_commas_split() {
        assert_eq!(parse_csv_rows("\"x,y\",z"), vec![vec!["\"x", "y\"", "z"]]);
    }

    #[test]
    fn csv_is_capped_at_preview_rows() {
        let content: Vec<String> = (0..250).map(|i| format!("{i},row")).collect();
        let rows = parse_csv_rows(&content.join("\n"));
        assert_eq!(rows.len(), CSV_PREVIEW_ROWS);
        assert_eq!(rows[199][0], "199");
    }

    #[test]
    fn auto_preview_priority() {
        let entries = vec![file("notes.txt"), file("README.md"), file(" Index.MD ")];
        assert_eq!(pick_auto_preview(&entries).unwrap().name, " Index.MD ");

        let entries = vec![file("notes.txt"), file("readme.md")];
        assert_eq!(pick_auto_preview(&entries).unwrap().name, "readme.md");

        let entries = vec![dir("docs"), file("cover.png"), file("LICENSE"), file("a.md")];
        assert_eq!(pick_auto_preview(&entries).unwrap().name, "LICENSE");
    }

    #[test]
    fn auto_preview_none_when_nothing_matches() {
        let entries = vec![dir("index.md"), file("cover.png")];
        assert!(pick_auto_preview(&entries).is_none());
        assert!(pick_auto_preview(&[]).is_none());
    }
}
