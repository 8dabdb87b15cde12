//! Run pipeline: load entries, build the prompt, request recommendations.
//!
//! Flow: load_entries → format_prompt(first entry) → recommend → attach used_ids.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::recommendation::prompts::format_prompt;
use crate::recommendation::{RecommendationPayload, Recommender};
use crate::survey::loader::load_entries;
use crate::survey::models::SurveyEntry;

/// Produces the payload for one invocation. Only the first loaded entry feeds
/// the prompt; `used_ids` still lists the first `limit` entries.
pub async fn run(
    file: &Path,
    limit: usize,
    recommender: &Recommender,
) -> Result<RecommendationPayload, AppError> {
    let entries = load_entries(file, limit)?;
    let Some(first) = entries.first() else {
        return Err(AppError::EmptyInput);
    };
    info!("Loaded {} survey entries from {}", entries.len(), file.display());

    let prompt = format_prompt(first);
    debug!(
        "Built prompt ({} chars), live model: {}",
        prompt.len(),
        recommender.is_live()
    );
    let sourced = recommender.recommend(&prompt).await;

    let used_ids = used_ids(&entries, limit);
    if used_ids.len() > 1 {
        warn!(
            "used_ids lists {} entries but only the first one was used to build the prompt",
            used_ids.len()
        );
    }

    info!("Recommendations ready (source: {:?})", sourced.source);
    Ok(sourced.into_payload(used_ids))
}

/// Ids of the first `limit` entries. A `limit` of 0 takes none, even though the
/// loader read the whole file.
fn used_ids(entries: &[SurveyEntry], limit: usize) -> Vec<Value> {
    entries
        .iter()
        .take(limit)
        .map(SurveyEntry::id_value)
        .collect()
}
