//! NDJSON loader for exported survey responses.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::errors::AppError;
use crate::survey::models::SurveyEntry;

/// Reads survey entries from an NDJSON file in file order.
///
/// Blank lines are skipped. Reading stops as soon as `limit` entries have been
/// collected; a `limit` of 0 reads the whole file. A line that is not a JSON
/// object aborts the load.
pub fn load_entries(path: &Path, limit: usize) -> Result<Vec<SurveyEntry>, AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::NotFound(path.to_path_buf()),
        _ => AppError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut entries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| AppError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let entry: SurveyEntry =
            serde_json::from_str(line).map_err(|e| AppError::MalformedRecord {
                path: path.to_path_buf(),
                line: index + 1,
                source: e,
            })?;
        entries.push(entry);

        if limit > 0 && entries.len() >= limit {
            break;
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ndjson(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn ids(entries: &[SurveyEntry]) -> Vec<serde_json::Value> {
        entries.iter().map(SurveyEntry::id_value).collect()
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.ndjson");
        let err = load_entries(&path, 1).unwrap_err();
        assert!(matches!(err, AppError::NotFound(p) if p == path));
    }

    #[test]
    fn test_limit_caps_in_file_order() {
        let file = ndjson("{\"id\":\"a\"}\n{\"id\":\"b\"}\n{\"id\":\"c\"}\n");
        let entries = load_entries(file.path(), 2).unwrap();
        assert_eq!(ids(&entries), vec![json!("a"), json!("b")]);
    }

    #[test]
    fn test_zero_limit_reads_everything() {
        let file = ndjson("{\"id\":1}\n{\"id\":2}\n{\"id\":3}\n");
        let entries = load_entries(file.path(), 0).unwrap();
        assert_eq!(ids(&entries), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_limit_larger_than_file_returns_all() {
        let file = ndjson("{\"id\":1}\n{\"id\":2}\n");
        assert_eq!(load_entries(file.path(), 10).unwrap().len(), 2);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let file = ndjson("{\"id\":\"a\"}\n\n   \n{\"id\":\"b\"}\n");
        let entries = load_entries(file.path(), 0).unwrap();
        assert_eq!(ids(&entries), vec![json!("a"), json!("b")]);
    }

    #[test]
    fn test_empty_file_yields_no_entries() {
        let file = ndjson("");
        assert!(load_entries(file.path(), 1).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_aborts_with_line_number() {
        let file = ndjson("{\"id\":\"a\"}\n\n{not json}\n{\"id\":\"c\"}\n");
        let err = load_entries(file.path(), 0).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_array_line_is_malformed() {
        let file = ndjson("{\"id\":\"a\"}\n[\"s9\",\"2024\",\"beginner\"]\n");
        let err = load_entries(file.path(), 0).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_scalar_line_is_malformed() {
        let file = ndjson("42\n");
        let err = load_entries(file.path(), 0).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_malformed_line_after_limit_is_never_read() {
        let file = ndjson("{\"id\":\"a\"}\n{not json}\n");
        let entries = load_entries(file.path(), 1).unwrap();
        assert_eq!(ids(&entries), vec![json!("a")]);
    }
}
