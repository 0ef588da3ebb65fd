/*!
 * Line-break rule tables and split predicates.
 *
 * This module holds the closed word-class dictionaries consumed by the
 * line splitter and the predicates built on top of them:
 * - `is_forbidden_split`: boundaries that must never become a line break
 * - `is_preferred_split`: boundaries linguistically favorable for a break
 * - `split_quality`: integer quality score for a candidate boundary
 * - `is_bad_split`: structural rejection test for a left/right line pair
 *
 * The tables live in an explicit, swappable `RuleSet` so locale variants
 * can be substituted without touching the scoring algorithm.
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::tokenizer::{first_visible_word, last_visible_word, visible_len_str, visible_word_count};

/// Minimum visible length below which a line is considered uncomfortably short
pub const SHORT_LINE_LEN: usize = 10;

/// Minimum number of visible words for either side of a split
pub const MIN_SPLIT_WORDS: usize = 2;

/// Default English rule tables.
pub static ENGLISH: Lazy<RuleSet> = Lazy::new(RuleSet::english);

/// Closed word-class dictionaries and phrase tables for one language.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Articles (a, an, the)
    pub articles: HashSet<String>,
    /// Possessive and demonstrative pronouns
    pub pronouns: HashSet<String>,
    /// Subject pronouns
    pub subject_pronouns: HashSet<String>,
    /// Auxiliary and modal verbs
    pub auxiliaries: HashSet<String>,
    /// Coordinating and subordinating conjunctions, shared with the chunker
    pub conjunctions: HashSet<String>,
    /// Prepositions
    pub prepositions: HashSet<String>,
    /// Phrasal-verb bigrams (verb, particle)
    pub phrasal_verbs: HashSet<(String, String)>,
    /// Fixed three-word expressions that must stay on one line
    pub fixed_expressions: Vec<[String; 3]>,
    /// Words that should never end a displayed line
    pub bad_endings: HashSet<String>,
}

impl RuleSet {
    /// An empty rule set: every predicate degrades to its structural checks.
    pub fn empty() -> Self {
        RuleSet {
            articles: HashSet::new(),
            pronouns: HashSet::new(),
            subject_pronouns: HashSet::new(),
            auxiliaries: HashSet::new(),
            conjunctions: HashSet::new(),
            prepositions: HashSet::new(),
            phrasal_verbs: HashSet::new(),
            fixed_expressions: Vec::new(),
            bad_endings: HashSet::new(),
        }
    }

    /// The built-in English tables.
    pub fn english() -> Self {
        let articles = word_set(&["a", "an", "the"]);
        let pronouns = word_set(&[
            "my", "your", "his", "her", "its", "our", "their", "this", "that", "these", "those",
        ]);
        let subject_pronouns = word_set(&["i", "you", "he", "she", "it", "we", "they"]);
        let auxiliaries = word_set(&[
            "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
            "does", "did", "will", "would", "can", "could", "shall", "should", "may", "might",
            "must",
        ]);
        // Shared with the semantic chunker; keep this list closed.
        let conjunctions = word_set(&[
            "and", "but", "or", "so", "because", "however", "although", "though", "while", "when",
            "if",
        ]);
        let prepositions = word_set(&[
            "in", "on", "at", "to", "for", "with", "from", "by", "of", "about", "into", "onto",
            "over", "under", "between", "through", "during", "against", "without", "within",
            "upon", "toward", "towards", "across", "behind", "beyond", "near",
        ]);
        let phrasal_verbs = pair_set(&[
            ("give", "up"),
            ("give", "in"),
            ("look", "after"),
            ("look", "up"),
            ("pick", "up"),
            ("turn", "on"),
            ("turn", "off"),
            ("put", "on"),
            ("take", "off"),
            ("come", "back"),
            ("go", "on"),
            ("get", "up"),
            ("find", "out"),
            ("run", "out"),
            ("work", "out"),
            ("carry", "on"),
            ("hold", "on"),
            ("wake", "up"),
            ("sit", "down"),
            ("calm", "down"),
        ]);
        let fixed_expressions = trigram_list(&[
            ("as", "soon", "as"),
            ("as", "well", "as"),
            ("as", "long", "as"),
            ("as", "far", "as"),
            ("in", "front", "of"),
            ("in", "spite", "of"),
            ("on", "top", "of"),
            ("by", "the", "way"),
        ]);
        let bad_endings = word_set(&[
            // articles
            "a", "an", "the",
            // pronouns
            "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "my", "your",
            "his", "her", "its", "our", "their", "this", "that", "these", "those",
            // auxiliaries
            "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
            "does", "did", "will", "would", "can", "could", "shall", "should", "may", "might",
            "must",
            // negations
            "not", "can't", "don't", "won't", "isn't", "aren't", "wasn't", "weren't", "didn't",
            "doesn't", "couldn't", "wouldn't", "shouldn't", "ain't",
            // short prepositions
            "to", "of", "in", "on", "at", "by", "for", "with", "from", "into", "about",
            // conjunctions
            "and", "but", "or", "so", "because", "nor", "yet",
            // degree words
            "very", "quite", "rather", "too",
        ]);

        RuleSet {
            articles,
            pronouns,
            subject_pronouns,
            auxiliaries,
            conjunctions,
            prepositions,
            phrasal_verbs,
            fixed_expressions,
            bad_endings,
        }
    }

    /// Whether a word belongs to the conjunction table.
    pub fn is_conjunction(&self, word: &str) -> bool {
        self.conjunctions.contains(normalize_word(word).as_str())
    }

    /// Whether a word belongs to the preposition table.
    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(normalize_word(word).as_str())
    }

    /// Whether breaking a line between `left_word` and `right_word` is
    /// linguistically forbidden.
    pub fn is_forbidden_split(&self, left_word: &str, right_word: &str) -> bool {
        let left = normalize_word(left_word);
        let right = normalize_word(right_word);
        if left.is_empty() || right.is_empty() {
            return false;
        }

        // A determiner, pronoun or auxiliary never ends a line before its head.
        if self.articles.contains(left.as_str())
            || self.pronouns.contains(left.as_str())
            || self.subject_pronouns.contains(left.as_str())
            || self.auxiliaries.contains(left.as_str())
            || left.ends_with("n't")
            || left.ends_with("'t")
        {
            return true;
        }

        if self.prepositions.contains(left.as_str()) {
            return true;
        }

        if self
            .phrasal_verbs
            .contains(&(left.clone(), right.clone()))
        {
            return true;
        }

        if self.in_fixed_expression(&left, &right) {
            return true;
        }

        // Proper-noun heuristic: keep capitalized pairs together.
        if starts_uppercase(left_word) && starts_uppercase(right_word) {
            return true;
        }

        // A bare number binds to the lowercase word that follows it.
        if !left.is_empty()
            && left.chars().all(|c| c.is_ascii_digit())
            && starts_lowercase(right_word)
        {
            return true;
        }

        // Comparative/superlative suffix binds to what follows.
        if (left.ends_with("er") || left.ends_with("est")) && starts_lowercase(right_word) {
            return true;
        }

        false
    }

    /// Whether a boundary is linguistically favorable for a line break.
    pub fn is_preferred_split(&self, left: &str, right: &str) -> bool {
        if let Some(ch) = ending_char(left) {
            if matches!(ch, '.' | '!' | '?' | ';' | ':' | ',') {
                return true;
            }
        }
        first_visible_word(right).is_some_and(|w| self.is_conjunction(&w))
    }

    /// Integer quality score for a candidate left/right pair.
    pub fn split_quality(&self, left: &str, right: &str) -> i32 {
        let mut score = 0;

        match ending_char(left) {
            Some('.') | Some('!') | Some('?') => score += 10,
            Some(';') | Some(':') | Some(',') => score += 5,
            _ => {}
        }

        if first_visible_word(right).is_some_and(|w| self.is_conjunction(&w)) {
            score += 5;
        }

        let left_word = last_visible_word(left).unwrap_or_default();
        let right_word = first_visible_word(right).unwrap_or_default();
        if self.is_forbidden_split(&left_word, &right_word) {
            score -= 20;
        }

        let left_len = visible_len_str(left);
        let right_len = visible_len_str(right);
        if left_len < SHORT_LINE_LEN {
            score -= 5;
        }

        let diff = left_len.abs_diff(right_len);
        if diff < 5 {
            score += 3;
        } else if diff < 10 {
            score += 1;
        }

        score
    }

    /// Structural rejection test for a left/right line pair.
    pub fn is_bad_split(&self, left: &str, right: &str) -> bool {
        if left.trim().is_empty() || right.trim().is_empty() {
            return true;
        }
        if visible_len_str(right) < SHORT_LINE_LEN {
            return true;
        }
        if visible_word_count(right) < MIN_SPLIT_WORDS {
            return true;
        }
        if let Some(last) = last_visible_word(left) {
            if self.bad_endings.contains(normalize_word(&last).as_str()) {
                return true;
            }
        }
        false
    }

    fn in_fixed_expression(&self, left: &str, right: &str) -> bool {
        self.fixed_expressions.iter().any(|expr| {
            expr.windows(2)
                .any(|pair| pair[0] == left && pair[1] == right)
        })
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::english()
    }
}

/// Lowercase a word and trim non-alphanumeric edge characters, keeping
/// internal apostrophes so contractions survive the lookup.
pub fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Last character of the last visible word of a fragment.
fn ending_char(text: &str) -> Option<char> {
    last_visible_word(text).and_then(|w| w.chars().last())
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

fn starts_lowercase(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_lowercase())
}

fn word_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn pair_set(pairs: &[(&str, &str)]) -> HashSet<(String, String)> {
    pairs
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

fn trigram_list(trigrams: &[(&str, &str, &str)]) -> Vec<[String; 3]> {
    trigrams
        .iter()
        .map(|(a, b, c)| [a.to_string(), b.to_string(), c.to_string()])
        .collect()
}
