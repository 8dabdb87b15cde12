use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort the run.
///
/// Upstream model failures never show up here: they are absorbed by the
/// recommender and turned into the fallback payload.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("NDJSON file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at line {line} in {}: {source}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("No survey entries found.")]
    EmptyInput,

    #[error("Configuration error: {0:#}")]
    Config(#[from] anyhow::Error),

    #[error("Failed to serialize payload: {0}")]
    Output(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message_is_exact() {
        assert_eq!(AppError::EmptyInput.to_string(), "No survey entries found.");
    }

    #[test]
    fn test_not_found_mentions_path() {
        let err = AppError::NotFound(PathBuf::from("/tmp/missing.ndjson"));
        assert_eq!(
            err.to_string(),
            "NDJSON file not found: /tmp/missing.ndjson"
        );
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = AppError::MalformedRecord {
            path: PathBuf::from("responses.ndjson"),
            line: 3,
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Malformed record at line 3 in responses.ndjson"));
    }
}
