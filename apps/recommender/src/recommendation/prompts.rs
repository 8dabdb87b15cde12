// Prompt constants and the survey-entry prompt builder for the recommendation call.

use serde_json::Value;

use crate::survey::models::SurveyEntry;

pub const LANGUAGE_COUNT: usize = 3;
pub const CONCEPT_COUNT: usize = 5;
pub const JOB_COUNT: usize = 5;

/// Soft cap on each `why`, stated in the prompt and never checked.
pub const WHY_WORD_LIMIT: usize = 18;

/// Rendered for any answer or field the entry does not carry.
pub const MISSING_PLACEHOLDER: &str = "N/A";

/// Likert statements in survey order (questions 2 through 14 of the form).
pub const LIKERT_STATEMENTS: [&str; 13] = [
    "The visual side of technology interests me.",
    "I prefer logic and problem-solving over visual design.",
    "I want to know on a deep level how computer systems work.",
    "I’m interested in designing websites.",
    "I want to learn how to code for video games.",
    "I want to know more about AI.",
    "I am curious about the robotics scene.",
    "I’m interested in animations or simulations.",
    "New technologies like VR and AR interest me.",
    "It’s important to me that my workplace values inclusion and diversity.",
    "I like building things from scratch.",
    "I like to learn a little bit about everything.",
    "I enjoy organization and am detail-oriented.",
];

/// Labels for the numeric answers 1 through 5.
pub const LIKERT_SCALE: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

/// Recommendation prompt template. Placeholders are filled in a single pass by
/// `format_prompt`; any other braces are emitted as-is.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"
You are a career guide. Given one survey response, recommend:
- {language_count} programming languages to learn next (short reason each)
- {concept_count} concepts/skills to study (short reason each)
- {job_count} job roles that fit (short reason each)

Survey:
id: {id}
timestamp: {timestamp}
experience: {experience}
primary_language: {primary_language}
likert (1 = Strongly Disagree, 5 = Strongly Agree):
{likert}
notes: {notes}

Return strict JSON with keys: languages, concepts, jobs.
Each key should be an array of objects with "name" and "why".
Keep responses concise (max {why_word_limit} words per reason).
"#;

/// Renders one survey entry into the recommendation prompt.
///
/// Entry text is interpolated verbatim. Likert answers beyond the end of `lk`
/// render as `N/A`.
pub fn format_prompt(entry: &SurveyEntry) -> String {
    let likert = LIKERT_STATEMENTS
        .iter()
        .enumerate()
        .map(|(i, statement)| {
            format!(
                "{}. {} => {}",
                i + 1,
                statement,
                render_likert(entry.likert_at(i))
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let language_count = LANGUAGE_COUNT.to_string();
    let concept_count = CONCEPT_COUNT.to_string();
    let job_count = JOB_COUNT.to_string();
    let why_word_limit = WHY_WORD_LIMIT.to_string();
    let id = render_field(entry.id.as_ref());
    let timestamp = render_field(entry.t.as_ref());
    let experience = render_field(entry.q1.as_ref());
    let primary_language = render_field(entry.lang.as_ref());
    let notes = render_field(entry.note.as_ref());

    render_template(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("language_count", language_count.as_str()),
            ("concept_count", concept_count.as_str()),
            ("job_count", job_count.as_str()),
            ("id", id.as_str()),
            ("timestamp", timestamp.as_str()),
            ("experience", experience.as_str()),
            ("primary_language", primary_language.as_str()),
            ("likert", likert.as_str()),
            ("notes", notes.as_str()),
            ("why_word_limit", why_word_limit.as_str()),
        ],
    )
    .trim()
    .to_string()
}

fn render_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Integers 1..=5, bare or as numeric strings, get their scale label appended.
fn render_likert(value: Option<&Value>) -> String {
    let label = value
        .and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .filter(|n| (1..=LIKERT_SCALE.len() as u64).contains(n))
        .map(|n| LIKERT_SCALE[(n - 1) as usize]);
    match label {
        Some(label) => format!("{} ({label})", render_field(value)),
        None => render_field(value),
    }
}

/// Substitutes `{key}` placeholders in one left-to-right pass, so substituted
/// text is never scanned again.
fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let substitution = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (end, *value))
        });
        match substitution {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
