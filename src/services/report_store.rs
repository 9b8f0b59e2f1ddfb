use crate::model::report::{Report, ReportStatus};
use crate::services::storage::Storage;

const REPORTS_KEY: &str = "medicanto_reports_v2";

/// Owner of the persisted report collection. Reports are only ever appended
/// and resolved, never deleted.
pub struct ReportStore<'a> {
    storage: &'a dyn Storage,
}

impl<'a> ReportStore<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        ReportStore { storage }
    }

    /// Full collection, insertion order preserved. An absent or malformed
    /// blob reads as empty; there is no seed for reports.
    pub fn list(&self) -> Vec<Report> {
        let data = match self.storage.get(REPORTS_KEY) {
            Some(s) => s,
            None => return Vec::new(),
        };

        match serde_json::from_str(&data) {
            Ok(reports) => reports,
            Err(e) => {
                eprintln!("[store] malformed reports blob, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Unconditional append. Duplicate submissions are kept as-is.
    pub fn submit(&self, report: Report) -> Result<(), String> {
        let mut reports = self.list();
        reports.push(report);
        self.persist(&reports)
    }

    /// Pending → Resolved only. No-op when the id is unknown or the report
    /// is already resolved.
    pub fn resolve(&self, id: &str) -> Result<(), String> {
        let mut reports = self.list();

        match reports.iter_mut().find(|r| r.id == id) {
            Some(r) if r.status == ReportStatus::Pending => {
                r.status = ReportStatus::Resolved;
            }
            _ => return Ok(()),
        }

        self.persist(&reports)
    }

    fn persist(&self, reports: &[Report]) -> Result<(), String> {
        let json = serde_json::to_string_pretty(reports).map_err(|e| e.to_string())?;
        self.storage.set(REPORTS_KEY, &json)
    }
}
