use serde::{Deserialize, Serialize};

/// One generated multiple-choice question. Never persisted; lives only in
/// the response of a `quiz.generate` call.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuizQuestion {
    pub id: String,

    #[serde(default)]
    pub prompt: String,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub correct_index: usize,

    #[serde(default)]
    pub explanation: String,
}
