use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Report {
    pub id: String,

    /// Weak reference: the term may be deleted later without touching this.
    #[serde(default)]
    pub term_id: String,

    /// Source text of the term as it read at submission time.
    #[serde(default)]
    pub term_label: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub submitted_at: u64,

    #[serde(default)]
    pub status: ReportStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Pending,
    Resolved,
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Pending
    }
}
