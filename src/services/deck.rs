use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::model::term::Term;

/// Shuffled copy of the collection for a flashcard session, optionally
/// restricted to terms the user marked hard.
pub fn build(terms: &[Term], hard_only: bool) -> Vec<Term> {
    let mut deck: Vec<Term> = terms
        .iter()
        .filter(|t| !hard_only || t.marked_hard)
        .cloned()
        .collect();

    deck.shuffle(&mut thread_rng());
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::term::Difficulty;
    use std::collections::HashSet;

    fn term(id: &str, hard: bool) -> Term {
        Term {
            id: id.to_string(),
            source_text: format!("term {id}"),
            target_text: format!("詞 {id}"),
            pronunciation: String::new(),
            category: String::new(),
            example_source: String::new(),
            example_target: String::new(),
            difficulty: Difficulty::Easy,
            marked_hard: hard,
            audio_ref: None,
            image_ref: None,
        }
    }

    #[test]
    fn deck_is_a_permutation_of_the_input() {
        let terms: Vec<Term> = (0..20).map(|i| term(&i.to_string(), i % 3 == 0)).collect();

        let deck = build(&terms, false);
        assert_eq!(deck.len(), terms.len());

        let input_ids: HashSet<&str> = terms.iter().map(|t| t.id.as_str()).collect();
        let deck_ids: HashSet<&str> = deck.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(input_ids, deck_ids);
    }

    #[test]
    fn hard_only_keeps_only_marked_terms() {
        let terms: Vec<Term> = (0..10).map(|i| term(&i.to_string(), i % 2 == 0)).collect();

        let deck = build(&terms, true);
        assert_eq!(deck.len(), 5);
        assert!(deck.iter().all(|t| t.marked_hard));
    }

    #[test]
    fn empty_input_builds_empty_deck() {
        assert!(build(&[], false).is_empty());
        assert!(build(&[], true).is_empty());
    }
}
