//! Recommendation requester: turns a prompt into a recommendation payload.
//!
//! A live Gemini call is attempted only when an HTTP client could be built and
//! an API key is configured. Every other outcome, including any failure of the
//! live call, yields the same fixed fallback payload.

pub mod prompts;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::llm_client::{
    build_http_client, extract_json_object, GeminiClient, GenerativeModel, LlmError,
};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A single recommended item with a short reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Recommendation {
    pub name: String,
    pub why: String,
}

/// The three recommendation lists, as the model is asked to return them.
/// Item counts are requested in the prompt but not validated.
///
/// Both this and `Recommendation` deserialize only from JSON objects; the
/// positional array form serde would otherwise accept is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Recommendations {
    pub languages: Vec<Recommendation>,
    pub concepts: Vec<Recommendation>,
    pub jobs: Vec<Recommendation>,
}

#[derive(Deserialize)]
struct RecommendationFields {
    name: String,
    why: String,
}

#[derive(Deserialize)]
struct RecommendationLists {
    languages: Vec<Recommendation>,
    concepts: Vec<Recommendation>,
    jobs: Vec<Recommendation>,
}

impl TryFrom<Map<String, Value>> for Recommendation {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let RecommendationFields { name, why } = serde_json::from_value(Value::Object(map))?;
        Ok(Recommendation { name, why })
    }
}

impl TryFrom<Map<String, Value>> for Recommendations {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let RecommendationLists {
            languages,
            concepts,
            jobs,
        } = serde_json::from_value(Value::Object(map))?;
        Ok(Recommendations {
            languages,
            concepts,
            jobs,
        })
    }
}

/// Where a payload's recommendations came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Gemini,
    Fallback,
}

/// Recommendations tagged with their source, before `used_ids` is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedRecommendations {
    pub recommendations: Recommendations,
    pub source: Source,
}

impl SourcedRecommendations {
    pub fn into_payload(self, used_ids: Vec<Value>) -> RecommendationPayload {
        RecommendationPayload {
            recommendations: self.recommendations,
            source: self.source,
            used_ids,
        }
    }
}

/// The final output object printed on stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationPayload {
    #[serde(flatten)]
    pub recommendations: Recommendations,
    pub source: Source,
    pub used_ids: Vec<Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback
// ────────────────────────────────────────────────────────────────────────────

const FALLBACK_LANGUAGES: [(&str, &str); 3] = [
    ("Python", "Fast to learn and great for AI/automation."),
    ("JavaScript", "Essential for web UIs and full‑stack work."),
    ("SQL", "Needed to query and reason over data."),
];

const FALLBACK_CONCEPTS: [(&str, &str); 5] = [
    ("Data Structures", "Core for interviews and building efficient code."),
    ("APIs & REST", "Lets you integrate services and ship features."),
    ("Git", "Collaboration and version control."),
    ("Testing", "Confidence and quality in releases."),
    ("HTTP & Web", "Understand how clients and servers talk."),
];

const FALLBACK_JOBS: [(&str, &str); 5] = [
    ("Full‑Stack Intern", "Build end‑to‑end features with JS/Python."),
    ("Automation Engineer", "Use Python to script and test systems."),
    ("Data Analyst", "Apply SQL/Python to answer business questions."),
    ("Junior Web Dev", "Use JS/HTML/CSS to ship front‑end work."),
    ("Support Engineer", "Debug user issues and automate fixes."),
];

/// The fixed payload used whenever the live call is skipped or fails.
/// Identical regardless of the survey entry.
pub fn fallback() -> SourcedRecommendations {
    fn items(table: &[(&str, &str)]) -> Vec<Recommendation> {
        table
            .iter()
            .map(|(name, why)| Recommendation {
                name: name.to_string(),
                why: why.to_string(),
            })
            .collect()
    }

    SourcedRecommendations {
        recommendations: Recommendations {
            languages: items(&FALLBACK_LANGUAGES),
            concepts: items(&FALLBACK_CONCEPTS),
            jobs: items(&FALLBACK_JOBS),
        },
        source: Source::Fallback,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Requester
// ────────────────────────────────────────────────────────────────────────────

/// Requests recommendations from a generative model, or serves the fallback
/// when no model is available.
pub struct Recommender {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl Recommender {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model: Some(model) }
    }

    /// A recommender that always returns the fallback.
    pub fn offline() -> Self {
        Self { model: None }
    }

    /// Checks, in order, that the HTTP client can be built and that an API key
    /// is configured. Either one missing yields an offline recommender.
    pub fn from_config(config: &Config) -> Self {
        let http = match build_http_client() {
            Ok(http) => http,
            Err(e) => {
                warn!("Gemini client unavailable ({e}); using fallback recommendations");
                return Self::offline();
            }
        };

        let Some(api_key) = config.gemini_api_key.clone() else {
            warn!("GEMINI_API_KEY is not set; using fallback recommendations");
            return Self::offline();
        };

        info!("Gemini client initialized (model: {})", config.gemini_model);
        Self::new(Arc::new(GeminiClient::from_parts(http, config, api_key)))
    }

    pub fn is_live(&self) -> bool {
        self.model.is_some()
    }

    /// Never fails: a missing model or any error from the live call returns
    /// the fallback.
    pub async fn recommend(&self, prompt: &str) -> SourcedRecommendations {
        let Some(model) = &self.model else {
            return fallback();
        };

        match request_live(model.as_ref(), prompt).await {
            Ok(recommendations) => SourcedRecommendations {
                recommendations,
                source: Source::Gemini,
            },
            Err(e) => {
                error!(
                    "Gemini call to {} failed: {e}; using fallback recommendations",
                    model.model_name()
                );
                fallback()
            }
        }
    }
}

async fn request_live(
    model: &dyn GenerativeModel,
    prompt: &str,
) -> Result<Recommendations, LlmError> {
    let text = model.generate(prompt).await?;
    let json = extract_json_object(&text)?;
    Ok(serde_json::from_str(json)?)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
