use serde_json::{json, Value};

use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::report::{Report, ReportStatus};
use crate::model::term::Term;
use crate::services::report_store::ReportStore;
use crate::services::storage::Storage;
use crate::services::term_store::TermStore;
use crate::services::{ai, deck, glossary, seed};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn millis_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Parses payload.term, generating a fresh time-based id when the caller
/// left it empty (a create rather than an edit). Required-field validation
/// happens here; the store trusts whatever reaches it.
fn parse_term_from_payload(payload: &Value) -> Result<Term, String> {
    let mut term_val = payload
        .get("term")
        .cloned()
        .ok_or_else(|| "payload.term is required".to_string())?;

    let id_missing = term_val
        .get("id")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().is_empty())
        .unwrap_or(true);

    if id_missing {
        if let Some(obj) = term_val.as_object_mut() {
            obj.insert("id".to_string(), json!(millis_now().to_string()));
        }
    }

    let term: Term =
        serde_json::from_value(term_val).map_err(|e| format!("invalid payload.term: {e}"))?;

    if term.source_text.trim().is_empty() {
        return Err("term.source_text is required".to_string());
    }
    if term.target_text.trim().is_empty() {
        return Err("term.target_text is required".to_string());
    }

    Ok(term)
}

pub fn handle(input: &str, storage: &dyn Storage) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let payload = get_payload(&req);
    let cmd = Command::from(get_cmd(&req));

    let terms = TermStore::new(storage);
    let reports = ReportStore::new(storage);

    match cmd {
        Command::Ping => ok(id, json!({ "message": "medicanto-core alive" })),

        Command::TermsList => ok(id, json!({ "terms": terms.list() })),

        Command::TermsSave => {
            let term = match parse_term_from_payload(payload) {
                Ok(t) => t,
                Err(e) => return err(id, e),
            };

            match terms.upsert(term.clone()) {
                Ok(()) => ok(id, json!({ "term": term })),
                Err(e) => err(id, e),
            }
        }

        Command::TermsDelete => {
            let term_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
            if term_id.is_empty() {
                return err(id, "payload.id is required");
            }

            match terms.delete(term_id) {
                Ok(()) => ok(id, json!({})),
                Err(e) => err(id, e),
            }
        }

        Command::TermsSetHard => {
            let term_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
            if term_id.is_empty() {
                return err(id, "payload.id is required");
            }

            // Absent "hard" means toggle, matching the flashcard flow.
            let value = match payload.get("hard").and_then(|v| v.as_bool()) {
                Some(v) => v,
                None => match terms.find(term_id) {
                    Some(t) => !t.marked_hard,
                    None => return ok(id, json!({})),
                },
            };

            match terms.set_marked_hard(term_id, value) {
                Ok(Some(term)) => ok(id, json!({ "term": term })),
                Ok(None) => ok(id, json!({})),
                Err(e) => err(id, e),
            }
        }

        Command::GlossarySearch => {
            let query = payload.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let category = payload
                .get("category")
                .and_then(|v| v.as_str())
                .unwrap_or(glossary::ALL_CATEGORIES);

            let all = terms.list();
            let hits = glossary::search(&all, query, category);
            ok(id, json!({ "terms": hits }))
        }

        Command::GlossaryCategories => {
            let all = terms.list();
            let filters = glossary::category_filters(&all);

            let catalog: Vec<Value> = seed::CATALOG
                .iter()
                .map(|c| {
                    let count = all.iter().filter(|t| t.category == c.name).count();
                    json!({
                        "id": c.id,
                        "name": c.name,
                        "icon": c.icon,
                        "count": count
                    })
                })
                .collect();

            ok(id, json!({ "filters": filters, "catalog": catalog }))
        }

        Command::ProgressSummary => {
            let all = terms.list();
            let summary = glossary::progress(&all);
            ok(id, serde_json::to_value(summary).unwrap_or(json!({})))
        }

        Command::DeckBuild => {
            let hard_only = payload
                .get("hard_only")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);

            let all = terms.list();
            ok(id, json!({ "terms": deck::build(&all, hard_only) }))
        }

        Command::ReportsSubmit => {
            let term_id = payload.get("term_id").and_then(|v| v.as_str()).unwrap_or("");
            let body = payload.get("body").and_then(|v| v.as_str()).unwrap_or("");

            if term_id.is_empty() {
                return err(id, "payload.term_id is required");
            }
            if body.trim().is_empty() {
                return err(id, "payload.body is required");
            }

            // term_label is denormalized at submission time and never
            // updated afterwards, so the term must exist right now.
            let term = match terms.find(term_id) {
                Some(t) => t,
                None => return err(id, "unknown term"),
            };

            let now = millis_now();
            let report = Report {
                id: now.to_string(),
                term_id: term.id,
                term_label: term.source_text,
                body: body.to_string(),
                submitted_at: now,
                status: ReportStatus::Pending,
            };

            match reports.submit(report.clone()) {
                Ok(()) => ok(id, json!({ "report": report })),
                Err(e) => err(id, e),
            }
        }

        Command::ReportsList => ok(id, json!({ "reports": reports.list() })),

        Command::ReportsResolve => {
            let report_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
            if report_id.is_empty() {
                return err(id, "payload.id is required");
            }

            match reports.resolve(report_id) {
                Ok(()) => ok(id, json!({})),
                Err(e) => err(id, e),
            }
        }

        Command::QuizGenerate => {
            let api_key = payload.get("api_key").and_then(|v| v.as_str()).unwrap_or("");
            let category = payload.get("category").and_then(|v| v.as_str()).unwrap_or("");
            let difficulty = payload
                .get("difficulty")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let model = payload
                .get("model")
                .and_then(|v| v.as_str())
                .unwrap_or(ai::DEFAULT_QUIZ_MODEL);

            if api_key.is_empty() {
                return err(id, "payload.api_key is required");
            }
            if category.is_empty() {
                return err(id, "payload.category is required");
            }
            if difficulty.is_empty() {
                return err(id, "payload.difficulty is required");
            }

            let cfg = ai::AiConfig { api_key, model };
            match ai::generate_quiz(&cfg, category, difficulty) {
                Ok(questions) => ok(id, json!({ "questions": questions })),
                Err(e) => err(id, e),
            }
        }

        Command::SpeechSynthesize => {
            let api_key = payload.get("api_key").and_then(|v| v.as_str()).unwrap_or("");
            let term_id = payload.get("term_id").and_then(|v| v.as_str()).unwrap_or("");
            let model = payload
                .get("model")
                .and_then(|v| v.as_str())
                .unwrap_or(ai::DEFAULT_TTS_MODEL);
            let voice = payload
                .get("voice")
                .and_then(|v| v.as_str())
                .unwrap_or(ai::DEFAULT_TTS_VOICE);

            if api_key.is_empty() {
                return err(id, "payload.api_key is required");
            }
            if term_id.is_empty() {
                return err(id, "payload.term_id is required");
            }

            let term = match terms.find(term_id) {
                Some(t) => t,
                None => return err(id, "unknown term"),
            };

            let cfg = ai::AiConfig { api_key, model };
            match ai::synthesize_speech(&cfg, voice, &term) {
                Ok(clip) => ok(id, serde_json::to_value(clip).unwrap_or(json!({}))),
                Err(e) => err(id, e),
            }
        }

        Command::Unknown => err(id, "unknown command"),
    }
}
