use serde::Deserialize;
use serde_json::{Map, Value};

/// One survey response as exported to NDJSON.
///
/// Fields are kept as raw JSON values: the export is not type-checked, and a
/// missing key simply renders as a placeholder in the prompt. Unknown keys are
/// ignored. Only a JSON object deserializes; arrays are not mapped by position.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct SurveyEntry {
    pub id: Option<Value>,
    /// Submission timestamp.
    pub t: Option<Value>,
    /// Experience level.
    pub q1: Option<Value>,
    /// Primary programming language.
    pub lang: Option<Value>,
    /// Likert answers, positionally aligned with `prompts::LIKERT_STATEMENTS`.
    pub lk: Option<Value>,
    pub note: Option<Value>,
}

impl From<Map<String, Value>> for SurveyEntry {
    fn from(mut map: Map<String, Value>) -> Self {
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());
        SurveyEntry {
            id: take("id"),
            t: take("t"),
            q1: take("q1"),
            lang: take("lang"),
            lk: take("lk"),
            note: take("note"),
        }
    }
}

impl SurveyEntry {
    /// The entry id as reported in `used_ids`; `null` when absent.
    pub fn id_value(&self) -> Value {
        self.id.clone().unwrap_or(Value::Null)
    }

    /// Likert answer at `index`, or `None` when `lk` is missing, not an array,
    /// or shorter than `index + 1`.
    pub fn likert_at(&self, index: usize) -> Option<&Value> {
        self.lk.as_ref()?.as_array()?.get(index)
    }
}
