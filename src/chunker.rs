/*!
 * Semantic decomposition of cue text into coarse clauses.
 *
 * Normalized cue text is split first on sentence boundaries, then (if that
 * produced nothing) on conjunction words, with the matched conjunction
 * re-attached to the clause that follows it. When neither rule applies the
 * whole text is returned as a single chunk. Chunks joined with single
 * spaces reproduce the normalized input.
 */

use crate::rules::{RuleSet, normalize_word};

/// Collapse all whitespace runs to single spaces and trim.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decompose normalized cue text into clause-level chunks.
pub fn chunk(text: &str, rules: &RuleSet) -> Vec<String> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let sentences = split_sentences(&normalized);
    if sentences.len() > 1 {
        return sentences;
    }

    let clauses = split_on_conjunctions(&normalized, rules);
    if clauses.len() > 1 {
        return clauses;
    }

    vec![normalized]
}

/// Split after every `. ! ? ;` that closes a word, keeping the punctuation
/// attached to the preceding fragment. Punctuation inside formatting tags
/// never produces a boundary.
fn split_sentences(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut tag_closer: Option<char> = None;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        current.push(ch);

        match tag_closer {
            Some(closer) => {
                if ch == closer {
                    tag_closer = None;
                }
                continue;
            }
            None => {
                if ch == '<' {
                    tag_closer = Some('>');
                    continue;
                }
                if ch == '{' {
                    tag_closer = Some('}');
                    continue;
                }
            }
        }

        if matches!(ch, '.' | '!' | '?' | ';')
            && chars.peek().is_some_and(|next| next.is_whitespace())
        {
            let fragment = current.trim();
            if !fragment.is_empty() {
                fragments.push(fragment.to_string());
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        fragments.push(tail.to_string());
    }

    fragments
}

/// Split on whole-word conjunctions, attaching each matched conjunction to
/// the start of the clause that follows it.
fn split_on_conjunctions(text: &str, rules: &RuleSet) -> Vec<String> {
    let mut clauses: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        let is_tag = word.starts_with('<') || word.starts_with('{');
        if !is_tag && rules.conjunctions.contains(normalize_word(word).as_str()) && !current.is_empty()
        {
            clauses.push(std::mem::take(&mut current));
        }
        current.push(word);
    }
    if !current.is_empty() {
        clauses.push(current);
    }

    // A trailing clause that is nothing but the conjunction folds back into
    // the clause before it.
    if clauses.len() >= 2 {
        let lone_conjunction = clauses
            .last()
            .is_some_and(|c| c.len() == 1 && rules.conjunctions.contains(normalize_word(c[0]).as_str()));
        if lone_conjunction {
            let tail = clauses.pop().unwrap_or_default();
            if let Some(prev) = clauses.last_mut() {
                prev.extend(tail);
            }
        }
    }

    clauses.into_iter().map(|words| words.join(" ")).collect()
}
