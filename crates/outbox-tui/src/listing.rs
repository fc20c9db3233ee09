//! Directory listing for the browse view.
//!
//! Reads one directory level into rows the list widget can render,
//! applies the persisted sort order, and supports a name filter that
//! narrows what is visible without touching the selection.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use outbox_core::{PickError, SortOrder};

/// One visible row in the browse view.
#[derive(Debug, Clone)]
pub struct EntryRow {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Read the entries of `dir`, sorted per `sort`.
///
/// Entries whose metadata cannot be read are skipped rather than
/// failing the whole listing.
pub fn read_listing(dir: &Path, sort: SortOrder) -> Result<Vec<EntryRow>, PickError> {
    let mut rows = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(|e| PickError::io(dir, e))? {
        let entry = entry.map_err(|e| PickError::io(dir, e))?;
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        rows.push(EntryRow {
            path: entry.path(),
            name,
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
        });
    }

    sort_rows(&mut rows, sort);
    Ok(rows)
}

/// Sort rows in place: directories always group before files, then
/// the requested criterion decides within each group.
pub fn sort_rows(rows: &mut [EntryRow], sort: SortOrder) {
    rows.sort_by(|a, b| {
        b.is_dir.cmp(&a.is_dir).then_with(|| match sort {
            SortOrder::NameAscending => compare_names(a, b),
            SortOrder::NameDescending => compare_names(b, a),
            SortOrder::DateDescending => b.modified.cmp(&a.modified),
            SortOrder::DateAscending => a.modified.cmp(&b.modified),
            SortOrder::SizeDescending => b.size.cmp(&a.size).then_with(|| compare_names(a, b)),
            SortOrder::SizeAscending => a.size.cmp(&b.size).then_with(|| compare_names(a, b)),
        })
    });
}

fn compare_names(a: &EntryRow, b: &EntryRow) -> std::cmp::Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Indices of rows whose name contains `needle` (case-insensitive).
///
/// An empty needle matches everything.
pub fn filter_indices(rows: &[EntryRow], needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return (0..rows.len()).collect();
    }
    let needle = needle.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.name.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn row(name: &str, is_dir: bool, size: u64) -> EntryRow {
        EntryRow {
            path: PathBuf::from(name),
            name: name.to_string(),
            is_dir,
            size,
            modified: None,
        }
    }

    #[test]
    fn test_directories_sort_first() {
        let mut rows = vec![row("zebra.txt", false, 1), row("apps", true, 0)];
        sort_rows(&mut rows, SortOrder::NameAscending);
        assert!(rows[0].is_dir);
        assert_eq!(rows[1].name, "zebra.txt");
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let mut rows = vec![
            row("Banana", false, 0),
            row("apple", false, 0),
            row("Cherry", false, 0),
        ];
        sort_rows(&mut rows, SortOrder::NameAscending);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_size_sort_within_files() {
        let mut rows = vec![
            row("small", false, 10),
            row("big", false, 1000),
            row("dir", true, 0),
        ];
        sort_rows(&mut rows, SortOrder::SizeDescending);
        assert_eq!(rows[0].name, "dir");
        assert_eq!(rows[1].name, "big");
        assert_eq!(rows[2].name, "small");
    }

    #[test]
    fn test_filter_matches_substring_case_insensitive() {
        let rows = vec![
            row("Report.pdf", false, 0),
            row("photo.jpg", false, 0),
            row("sales-report.csv", false, 0),
        ];
        assert_eq!(filter_indices(&rows, "report"), vec![0, 2]);
        assert_eq!(filter_indices(&rows, ""), vec![0, 1, 2]);
        assert!(filter_indices(&rows, "mp4").is_empty());
    }

    #[test]
    fn test_read_listing_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let rows = read_listing(dir.path(), SortOrder::NameAscending).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "sub");
        assert!(rows[0].is_dir);
        assert_eq!(rows[1].name, "a.txt");
        assert_eq!(rows[1].size, 5);
    }

    #[test]
    fn test_read_listing_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(read_listing(&gone, SortOrder::NameAscending).is_err());
    }
}
