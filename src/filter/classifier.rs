// Violation classifier — whole-word matching against the profanity list.
//
// Text is split into Unicode words and each word is compared against the
// list. A listed word only counts when it stands on its own: "badword" in
// "badwordsmith" is not a match, "BADWORD!" is. Word segmentation keeps
// "badword's" and "badword.com" whole, so the pieces between apostrophes,
// dots and underscores are checked as well. Multi-word entries match as
// consecutive word runs.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::violation::ViolationType;
use super::words::{joined_parts, normalize_words, ProfanityList, WordSet};

/// What the classifier found in one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Categories detected (empty for clean text)
    pub violations: BTreeSet<ViolationType>,
    /// Listed entries that matched, normalized, in first-occurrence order
    pub matched_words: Vec<String>,
}

impl Classification {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Pure classifier over the shared profanity list.
#[derive(Debug, Clone)]
pub struct ViolationClassifier {
    words: Arc<ProfanityList>,
}

impl ViolationClassifier {
    pub fn new(words: Arc<ProfanityList>) -> Self {
        Self { words }
    }

    /// The list this classifier reads from.
    pub fn word_list(&self) -> &Arc<ProfanityList> {
        &self.words
    }

    /// Classify text against the current list.
    pub fn classify(&self, text: &str) -> Classification {
        classify_with(&self.words.snapshot(), text)
    }
}

/// Classify text against a specific snapshot.
pub fn classify_with(set: &WordSet, text: &str) -> Classification {
    let tokens = normalize_words(text);
    let mut matched: Vec<String> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        for word in std::iter::once(token.as_str()).chain(joined_parts(token)) {
            if set.contains_word(word) && !matched.iter().any(|m| m == word) {
                matched.push(word.to_string());
            }
        }

        for phrase in set.phrases() {
            if tokens[i..].starts_with(phrase) {
                let joined = phrase.join(" ");
                if !matched.contains(&joined) {
                    matched.push(joined);
                }
            }
        }
    }

    let mut violations = BTreeSet::new();
    if !matched.is_empty() {
        violations.insert(ViolationType::Profanity);
    }

    Classification {
        violations,
        matched_words: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(words: &[&str]) -> ViolationClassifier {
        ViolationClassifier::new(Arc::new(ProfanityList::new(words.iter().copied())))
    }

    #[test]
    fn test_clean_text_has_no_violations() {
        let result = classifier(&["badword"]).classify("this is clean text");
        assert!(result.is_clean());
        assert!(result.matched_words.is_empty());
    }

    #[test]
    fn test_listed_word_is_detected() {
        let result = classifier(&["badword"]).classify("you badword");
        assert_eq!(
            result.violations,
            BTreeSet::from([ViolationType::Profanity])
        );
        assert_eq!(result.matched_words, vec!["badword"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let result = classifier(&["badword"]).classify("BadWord");
        assert_eq!(result.matched_words, vec!["badword"]);
    }

    #[test]
    fn test_embedded_word_is_not_a_match() {
        // Substring hits inside longer words must not trigger
        let c = classifier(&["badword", "ass"]);
        assert!(c.classify("the badwordsmith forged it").is_clean());
        assert!(c.classify("a classic assessment").is_clean());
    }

    #[test]
    fn test_word_next_to_punctuation_is_a_match() {
        // Boundaries from punctuation must not hide a real hit
        let c = classifier(&["badword"]);
        assert_eq!(c.classify("...badword!").matched_words, vec!["badword"]);
        assert_eq!(c.classify("(badword),").matched_words, vec!["badword"]);
        assert_eq!(c.classify("hello\nBADWORD\tthere").matched_words, vec!["badword"]);
    }

    #[test]
    fn test_word_joined_by_apostrophe_dot_or_underscore_is_a_match() {
        let c = classifier(&["badword"]);
        for text in ["badword's fault", "BADWORD\u{2019}s", "so badword.anyway", "badword_lol"] {
            assert_eq!(c.classify(text).matched_words, vec!["badword"], "{text:?}");
        }
        assert!(c.classify("the badwordsmith's anvil").is_clean());
    }

    #[test]
    fn test_whole_joined_token_still_matches() {
        let c = classifier(&["o'clock"]);
        assert_eq!(c.classify("five O'Clock").matched_words, vec!["o'clock"]);
    }

    #[test]
    fn test_repeated_word_is_reported_once() {
        let result = classifier(&["badword"]).classify("badword badword BADWORD");
        assert_eq!(result.matched_words, vec!["badword"]);
    }

    #[test]
    fn test_matches_keep_first_occurrence_order() {
        let result = classifier(&["alpha", "beta"]).classify("beta then alpha then beta");
        assert_eq!(result.matched_words, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_phrase_entry_matches_consecutive_words() {
        let c = classifier(&["son of a"]);
        assert_eq!(
            c.classify("you Son. Of. A...").matched_words,
            vec!["son of a"]
        );
        assert!(c.classify("son and of a").is_clean());
    }

    #[test]
    fn test_empty_text_is_clean() {
        assert!(classifier(&["badword"]).classify("").is_clean());
    }

    #[test]
    fn test_classify_sees_list_updates() {
        let c = classifier(&[]);
        assert!(c.classify("newword").is_clean());
        c.word_list().extend(["newword"]);
        assert_eq!(c.classify("newword").matched_words, vec!["newword"]);
    }
}
