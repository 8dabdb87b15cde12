use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Runtime configuration resolved from an optional dotenv file plus the
/// process environment. Only an explicit `--env-file` that does not exist is
/// an error; everything else falls back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when unset or blank; the recommender then runs offline.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub rust_log: String,
    /// The dotenv file that was loaded, if any.
    pub env_file: Option<PathBuf>,
}

impl Config {
    /// Loads an explicit dotenv file, or the first `.env` found among
    /// `search_dirs`, then reads the environment. Variables already present in
    /// the process are never overridden by the file.
    pub fn load(explicit: Option<&Path>, search_dirs: &[PathBuf]) -> Result<Self> {
        let env_file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("env file '{}' does not exist", path.display());
                }
                dotenvy::from_path(path)
                    .with_context(|| format!("Failed to load env file '{}'", path.display()))?;
                Some(path.to_path_buf())
            }
            None => load_first_dotenv(search_dirs)?,
        };

        Ok(Self::from_lookup(env_file, |key| std::env::var(key).ok()))
    }

    /// Builds a config from a variable lookup. Values are trimmed; blank ones
    /// count as unset.
    fn from_lookup(env_file: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Config::default();
        Config {
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base: get("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            env_file,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            rust_log: "info".to_string(),
            env_file: None,
        }
    }
}

fn load_first_dotenv(search_dirs: &[PathBuf]) -> Result<Option<PathBuf>> {
    for dir in search_dirs {
        let candidate = dir.join(".env");
        if candidate.is_file() {
            dotenvy::from_path(&candidate)
                .with_context(|| format!("Failed to load env file '{}'", candidate.display()))?;
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}
