//! Wire types and prompt construction for Gemini `generateContent`.

use crate::domain::extraction::ExtractionMode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of every part of the first candidate, one per line.
    pub fn combined_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

fn instruction(mode: ExtractionMode) -> String {
    let mut s = String::from(
        "You are an extractor for bike demand features from PDF text. \
         Return ONLY a single valid JSON object. No prose, no markdown, no code fences. ",
    );
    s.push_str(&format!("Keys must be: {}. ", mode.expected_keys().join(", ")));
    s.push_str(
        "If a parameter is missing and cannot be confidently inferred, set it to null. \
         Constraints: \n\
         - season: one of spring, summer, fall, winter (string)\n\
         - month: 1-12 (integer)\n\
         - day_of_week: 0-6 where 0=Sunday (integer)\n\
         - temperature: Celsius (number) or null\n\
         - humidity: percentage 0-100 (number) or null\n\
         - wind_speed: km/h (number) or null\n\
         - weather: one of clear, cloudy, rain, storm (string)\n\
         - holiday: 0 or 1 (integer)\n\
         - working_day: 0 or 1 (integer)\n",
    );
    if mode == ExtractionMode::Hour {
        s.push_str("- hour: 0-23 (integer) or null\n");
    }
    s
}

/// Builds the single-turn extraction request for `text`.
pub fn build_request(text: &str, mode: ExtractionMode) -> GenerateContentRequest {
    let prompt = format!(
        "Extract the features from the following text and return ONLY a JSON object \
         with the required keys.\n\nTEXT:\n{}",
        text
    );

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(format!("{}\n\n{}", instruction(mode), prompt)),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.4,
            max_output_tokens: 512,
        },
    }
}

fn json_object_span() -> &'static Regex {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    SPAN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"))
}

/// Parses the model's reply as a JSON object, tolerating surrounding prose or
/// code fences by retrying on the outermost `{...}` span.
pub fn parse_object(reply: &str) -> Option<Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(reply.trim()) {
        return Some(map);
    }

    let span = json_object_span().find(reply)?;
    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
