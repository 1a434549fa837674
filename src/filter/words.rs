// Shared profanity word list.
//
// The list is read on every keystroke-level check and appended to rarely,
// so it is stored as an immutable snapshot behind an RwLock. Readers clone
// the Arc and release the lock straight away; writers build a new set and
// swap it in. A classification that started before an update keeps using
// the snapshot it took, so it never sees a half-applied update.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Words every list starts with. Additions come from configuration and
/// `ProfanityList::extend`.
pub const DEFAULT_PROFANITY: &[&str] = &[
    "arsehole",
    "asshole",
    "bastard",
    "bitch",
    "bollocks",
    "bullshit",
    "cunt",
    "dickhead",
    "fuck",
    "fucker",
    "fucking",
    "motherfucker",
    "shit",
    "shitty",
    "twat",
    "wanker",
];

/// Split text into lowercase Unicode words (UAX #29 word boundaries).
///
/// Punctuation and whitespace are dropped, so "Shit!" and "shit" produce the
/// same token while "shitake" stays a single, different token.
pub fn normalize_words(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Characters UAX #29 keeps inside a word ("it's", "a.b", "snake_case").
const INNER_JOINERS: &[char] = &['\'', '\u{2019}', '.', '_'];

/// The pieces of a token between inner joiners, skipping the token itself.
///
/// "shit's" yields "shit" and "s"; a token with no joiner yields nothing.
pub fn joined_parts(token: &str) -> impl Iterator<Item = &str> {
    let whole = token.len();
    token
        .split(INNER_JOINERS)
        .filter(move |part| !part.is_empty() && part.len() < whole)
}

/// An immutable view of the list at one point in time.
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    /// Single-word entries
    words: HashSet<String>,
    /// Multi-word entries, stored as normalized word sequences
    phrases: HashSet<Vec<String>>,
}

impl WordSet {
    /// Insert one raw entry. Returns true if it wasn't already present.
    /// Entries that normalize to nothing (blank, pure punctuation) are ignored.
    fn insert(&mut self, entry: &str) -> bool {
        let mut tokens = normalize_words(entry);
        match tokens.len() {
            0 => false,
            1 => self.words.insert(tokens.remove(0)),
            _ => self.phrases.insert(tokens),
        }
    }

    /// Whether a single normalized word is on the list.
    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Multi-word entries as word sequences.
    pub fn phrases(&self) -> impl Iterator<Item = &[String]> {
        self.phrases.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.words.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The append-only profanity list shared by every classification.
#[derive(Debug)]
pub struct ProfanityList {
    current: RwLock<Arc<WordSet>>,
}

impl ProfanityList {
    /// Create a list holding exactly the given entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = WordSet::default();
        for entry in entries {
            set.insert(entry.as_ref());
        }
        Self {
            current: RwLock::new(Arc::new(set)),
        }
    }

    /// Create a list seeded with `DEFAULT_PROFANITY`.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_PROFANITY.iter().copied())
    }

    /// Take a snapshot for one classification pass.
    pub fn snapshot(&self) -> Arc<WordSet> {
        // A poisoned lock still holds a complete snapshot since writers
        // only ever swap a fully built Arc.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Append entries. Returns how many were new; entries already present
    /// are no-ops. The new set is visible to every classification that
    /// starts after this returns.
    pub fn extend<I, S>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = WordSet::clone(&guard);

        let added = entries
            .into_iter()
            .filter(|entry| next.insert(entry.as_ref()))
            .count();

        if added > 0 {
            *guard = Arc::new(next);
        }

        debug!(added, total = guard.len(), "Updated profanity list");
        added
    }

    /// Number of entries currently on the list.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProfanityList {
    fn default() -> Self {
        Self::with_defaults()
    }
}
