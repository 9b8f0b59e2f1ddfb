use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Term {
    pub id: String,

    #[serde(default)]
    pub source_text: String,

    #[serde(default)]
    pub target_text: String,

    #[serde(default)]
    pub pronunciation: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub example_source: String,

    #[serde(default)]
    pub example_target: String,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub marked_hard: bool,

    #[serde(default)]
    pub audio_ref: Option<String>,

    #[serde(default)]
    pub image_ref: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}
