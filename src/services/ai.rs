use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

use std::time::Duration;

use crate::model::quiz::QuizQuestion;
use crate::model::term::Term;

pub struct AiConfig<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
}

const TIMEOUT_SECS: u64 = 60;
const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_QUIZ_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_TTS_VOICE: &str = "Kore";

const QUIZ_QUESTION_COUNT: usize = 3;

#[derive(Debug, Serialize)]
pub struct SpeechClip {
    pub audio_base64: String,
    pub mime_type: String,
}

fn client() -> Result<Client, String> {
    Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|e| e.to_string())
}

fn endpoint_for(model: &str) -> String {
    format!("{GEMINI_BASE}/{model}:generateContent")
}

/// One attempt, no automatic retry: a failed call surfaces as an error
/// response and the user decides whether to try again.
fn post(endpoint: &str, api_key: &str, body: &Value) -> Result<Value, String> {
    let client = client()?;

    let resp = client
        .post(endpoint)
        .header("x-goog-api-key", api_key)
        .json(body)
        .send()
        .map_err(|e| e.to_string())?;

    let status = resp.status();
    let text = resp.text().map_err(|e| e.to_string())?;

    if !status.is_success() {
        return Err(extract_error_message(status, &text));
    }

    serde_json::from_str(&text).map_err(|_| "invalid JSON from AI".to_string())
}

/// Requests a small multiple-choice quiz for a category and difficulty.
/// Transport and HTTP failures are errors; a successful reply whose content
/// cannot be parsed yields an empty list, which callers must read as
/// "generation failed", not "no questions applicable".
pub fn generate_quiz(
    cfg: &AiConfig,
    category: &str,
    difficulty: &str,
) -> Result<Vec<QuizQuestion>, String> {
    if cfg.api_key.is_empty() {
        return Err("missing API key".to_string());
    }

    let prompt = build_quiz_prompt(category, difficulty);

    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "prompt": { "type": "STRING" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "correct_index": { "type": "INTEGER" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["id", "prompt", "options", "correct_index", "explanation"]
                }
            }
        }
    });

    let response = post(&endpoint_for(cfg.model), cfg.api_key, &body)?;

    match extract_text(&response) {
        Some(text) => Ok(parse_questions(text)),
        None => {
            eprintln!("[ai] quiz response missing candidates[0].content.parts[0].text");
            Ok(Vec::new())
        }
    }
}

/// Narrates a term's translation and example sentence. Read-only with
/// respect to the stores; the caller plays the returned clip and discards it.
pub fn synthesize_speech(cfg: &AiConfig, voice: &str, term: &Term) -> Result<SpeechClip, String> {
    if cfg.api_key.is_empty() {
        return Err("missing API key".to_string());
    }

    let text = build_speech_text(term);

    let body = json!({
        "contents": [{ "parts": [{ "text": text }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": voice }
                }
            }
        }
    });

    let response = post(&endpoint_for(cfg.model), cfg.api_key, &body)?;

    let inline = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("inlineData"));

    let data = inline
        .and_then(|d| d.get("data"))
        .and_then(|d| d.as_str())
        .ok_or_else(|| "invalid AI response: missing inline audio data".to_string())?;

    let mime_type = inline
        .and_then(|d| d.get("mimeType"))
        .and_then(|m| m.as_str())
        .unwrap_or("audio/pcm;rate=24000");

    Ok(SpeechClip {
        audio_base64: data.to_string(),
        mime_type: mime_type.to_string(),
    })
}

fn build_quiz_prompt(category: &str, difficulty: &str) -> String {
    format!(
        "Generate {QUIZ_QUESTION_COUNT} multiple choice questions for a medical glossary quiz. \
         Focus on the category: \"{category}\" and difficulty level: \"{difficulty}\". \
         The questions should test knowledge of English to Cantonese medical interpretation. \
         Return JSON only."
    )
}

fn build_speech_text(term: &Term) -> String {
    format!(
        "The Cantonese translation for {} is {}. Example: {}",
        term.source_text, term.target_text, term.example_target
    )
}

fn extract_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
}

fn parse_questions(text: &str) -> Vec<QuizQuestion> {
    match serde_json::from_str::<Vec<QuizQuestion>>(text) {
        Ok(questions) => questions,
        Err(e) => {
            eprintln!("[ai] malformed quiz payload: {e}");
            Vec::new()
        }
    }
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
    }

    let trimmed = body_text.trim();
    let snippet = if trimmed.len() > 400 {
        format!("{}...", &trimmed[..400])
    } else {
        trimmed.to_string()
    };

    format!("HTTP {}: {}", status.as_u16(), snippet)
}
