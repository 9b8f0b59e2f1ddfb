use serde::Serialize;

use crate::model::term::Term;

/// Sentinel category filter that passes every term.
pub const ALL_CATEGORIES: &str = "All";

/// Category filter values: "All" plus the distinct categories currently
/// present among terms, in first-seen order.
pub fn category_filters(terms: &[Term]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];

    for t in terms {
        if !out.iter().any(|c| c == &t.category) {
            out.push(t.category.clone());
        }
    }

    out
}

/// The query matches on a case-insensitive substring of the source text or
/// category, or a plain substring of the target text (the target script has
/// no case to fold).
pub fn matches_query(term: &Term, query: &str) -> bool {
    let q = query.to_lowercase();

    term.source_text.to_lowercase().contains(&q)
        || term.target_text.contains(query)
        || term.category.to_lowercase().contains(&q)
}

pub fn search(terms: &[Term], query: &str, category: &str) -> Vec<Term> {
    terms
        .iter()
        .filter(|t| matches_query(t, query))
        .filter(|t| category == ALL_CATEGORIES || t.category == category)
        .cloned()
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub learned: usize,
    pub hard: usize,
    pub progress: f64,
}

/// Learned = not marked hard. Progress reads as 0 on an empty collection.
pub fn progress(terms: &[Term]) -> ProgressSummary {
    let total = terms.len();
    let hard = terms.iter().filter(|t| t.marked_hard).count();
    let learned = total - hard;

    let progress = if total == 0 {
        0.0
    } else {
        learned as f64 / total as f64
    };

    ProgressSummary {
        total,
        learned,
        hard,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::term::Difficulty;

    fn term(id: &str, source: &str, target: &str, category: &str, hard: bool) -> Term {
        Term {
            id: id.to_string(),
            source_text: source.to_string(),
            target_text: target.to_string(),
            pronunciation: String::new(),
            category: category.to_string(),
            example_source: String::new(),
            example_target: String::new(),
            difficulty: Difficulty::Easy,
            marked_hard: hard,
            audio_ref: None,
            image_ref: None,
        }
    }

    fn sample() -> Vec<Term> {
        vec![
            term("1", "Fracture", "骨折", "Emergency & Trauma", false),
            term("2", "Blood test", "驗血", "Lab & Diagnostics", true),
            term("3", "Blood Pressure", "血壓", "Vital Signs", false),
            term("4", "Stroke", "中風", "Emergency & Trauma", false),
        ]
    }

    #[test]
    fn filters_start_with_all_in_first_seen_order() {
        let filters = category_filters(&sample());
        assert_eq!(
            filters,
            vec!["All", "Emergency & Trauma", "Lab & Diagnostics", "Vital Signs"]
        );
    }

    #[test]
    fn search_is_case_insensitive_on_source_text() {
        let hits = search(&sample(), "blood", ALL_CATEGORIES);
        let ids: Vec<&str> = hits.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn search_matches_target_substring() {
        let hits = search(&sample(), "骨", ALL_CATEGORIES);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn search_matches_category_text() {
        let hits = search(&sample(), "trauma", ALL_CATEGORIES);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn category_filter_narrows_search() {
        let hits = search(&sample(), "", "Emergency & Trauma");
        assert_eq!(hits.len(), 2);

        let hits = search(&sample(), "blood", "Vital Signs");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");
    }

    #[test]
    fn empty_query_with_all_returns_everything() {
        assert_eq!(search(&sample(), "", ALL_CATEGORIES).len(), 4);
    }

    #[test]
    fn progress_counts_learned_terms() {
        let p = progress(&sample());
        assert_eq!(p.total, 4);
        assert_eq!(p.learned, 3);
        assert_eq!(p.hard, 1);
        assert!((p.progress - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_on_empty_collection_is_zero() {
        let p = progress(&[]);
        assert_eq!(p.total, 0);
        assert_eq!(p.progress, 0.0);
    }
}
