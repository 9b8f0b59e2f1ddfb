use crate::model::term::Term;
use crate::services::seed;
use crate::services::storage::Storage;

const TERMS_KEY: &str = "medicanto_terms_v2";

/// Owner of the persisted term collection. Every mutation reads the whole
/// blob, rewrites it, and persists it back; callers get disposable copies.
pub struct TermStore<'a> {
    storage: &'a dyn Storage,
}

impl<'a> TermStore<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        TermStore { storage }
    }

    /// Full collection, insertion order preserved. The first access ever
    /// (key absent or blob unreadable) writes the built-in seed set and
    /// returns it; once a valid blob exists the seed is never reapplied,
    /// even after the collection has been emptied by deletions.
    pub fn list(&self) -> Vec<Term> {
        let data = match self.storage.get(TERMS_KEY) {
            Some(s) => s,
            None => return self.write_seed(),
        };

        match serde_json::from_str(&data) {
            Ok(terms) => terms,
            Err(e) => {
                eprintln!("[store] malformed terms blob, reseeding: {e}");
                self.write_seed()
            }
        }
    }

    /// Replace on id match (position preserved), append otherwise. Fresh
    /// ids are the caller's job.
    pub fn upsert(&self, term: Term) -> Result<(), String> {
        let mut terms = self.list();

        match terms.iter_mut().find(|t| t.id == term.id) {
            Some(existing) => *existing = term,
            None => terms.push(term),
        }

        self.persist(&terms)
    }

    /// Silent no-op when the id is unknown.
    pub fn delete(&self, id: &str) -> Result<(), String> {
        let mut terms = self.list();
        terms.retain(|t| t.id != id);
        self.persist(&terms)
    }

    /// Sets the user "hard" flag on the matching term and returns the
    /// updated copy. Unknown id changes nothing.
    pub fn set_marked_hard(&self, id: &str, value: bool) -> Result<Option<Term>, String> {
        let terms = self.list();

        let term = match terms.into_iter().find(|t| t.id == id) {
            Some(mut t) => {
                t.marked_hard = value;
                t
            }
            None => return Ok(None),
        };

        self.upsert(term.clone())?;
        Ok(Some(term))
    }

    pub fn find(&self, id: &str) -> Option<Term> {
        self.list().into_iter().find(|t| t.id == id)
    }

    fn write_seed(&self) -> Vec<Term> {
        let terms = seed::seed_terms();
        if let Err(e) = self.persist(&terms) {
            eprintln!("[store] failed to persist seed terms: {e}");
        }
        terms
    }

    fn persist(&self, terms: &[Term]) -> Result<(), String> {
        let json = serde_json::to_string_pretty(terms).map_err(|e| e.to_string())?;
        self.storage.set(TERMS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::term::Difficulty;
    use crate::services::storage::MemoryStorage;

    fn term(id: &str, source: &str, target: &str) -> Term {
        Term {
            id: id.to_string(),
            source_text: source.to_string(),
            target_text: target.to_string(),
            pronunciation: String::new(),
            category: "General Clinical".to_string(),
            example_source: String::new(),
            example_target: String::new(),
            difficulty: Difficulty::Easy,
            marked_hard: false,
            audio_ref: None,
            image_ref: None,
        }
    }

    #[test]
    fn first_list_seeds_and_is_idempotent() {
        let storage = MemoryStorage::new();
        let store = TermStore::new(&storage);

        let first = store.list();
        let expected = seed::seed_terms();
        assert_eq!(first.len(), expected.len());
        assert_eq!(first[0].id, expected[0].id);

        let second = store.list();
        assert_eq!(second.len(), first.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn seed_is_not_reapplied_after_emptying() {
        let storage = MemoryStorage::new();
        let store = TermStore::new(&storage);

        for t in store.list() {
            store.delete(&t.id).unwrap();
        }

        assert!(store.list().is_empty());
    }

    #[test]
    fn malformed_blob_triggers_reseed() {
        let storage = MemoryStorage::new();
        storage.set("medicanto_terms_v2", "{not json").unwrap();

        let store = TermStore::new(&storage);
        assert_eq!(store.list().len(), seed::seed_terms().len());
    }

    #[test]
    fn upsert_appends_then_replaces_in_place() {
        let storage = MemoryStorage::new();
        let store = TermStore::new(&storage);
        let seeded = store.list().len();

        store.upsert(term("x", "Fever", "發燒")).unwrap();
        let terms = store.list();
        assert_eq!(terms.len(), seeded + 1);
        let pos = terms.iter().position(|t| t.id == "x").unwrap();
        assert_eq!(pos, seeded);

        store.upsert(term("x", "High fever", "高燒")).unwrap();
        let terms = store.list();
        assert_eq!(terms.len(), seeded + 1);
        assert_eq!(terms[pos].source_text, "High fever");
        assert_eq!(terms[pos].target_text, "高燒");
    }

    #[test]
    fn delete_twice_removes_at_most_once() {
        let storage = MemoryStorage::new();
        let store = TermStore::new(&storage);
        let seeded = store.list().len();

        store.upsert(term("x", "Fever", "發燒")).unwrap();
        assert_eq!(store.list().len(), seeded + 1);

        store.delete("x").unwrap();
        assert_eq!(store.list().len(), seeded);

        store.delete("x").unwrap();
        assert_eq!(store.list().len(), seeded);
    }

    #[test]
    fn delete_restores_original_order_and_content() {
        let storage = MemoryStorage::new();
        let store = TermStore::new(&storage);
        let before = store.list();

        store.upsert(term("x", "Fever", "發燒")).unwrap();
        store.delete("x").unwrap();

        let after = store.list();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.source_text, b.source_text);
        }
    }

    #[test]
    fn set_marked_hard_round_trips() {
        let storage = MemoryStorage::new();
        let store = TermStore::new(&storage);

        let original = store.find("gen_1").unwrap();
        assert!(!original.marked_hard);

        let updated = store.set_marked_hard("gen_1", true).unwrap().unwrap();
        assert!(updated.marked_hard);
        assert!(store.find("gen_1").unwrap().marked_hard);

        store.set_marked_hard("gen_1", false).unwrap();
        assert_eq!(store.find("gen_1").unwrap().marked_hard, original.marked_hard);
    }

    #[test]
    fn set_marked_hard_unknown_id_changes_nothing() {
        let storage = MemoryStorage::new();
        let store = TermStore::new(&storage);
        let before = store.list();

        assert!(store.set_marked_hard("nope", true).unwrap().is_none());

        let after = store.list();
        assert_eq!(before.len(), after.len());
        assert!(after.iter().zip(before.iter()).all(|(a, b)| a.marked_hard == b.marked_hard));
    }
}
