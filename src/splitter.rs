/*!
 * Scored line splitting for overlong cue text.
 *
 * Given a token run whose visible length exceeds the limit, every word
 * boundary is enumerated, filtered, and scored; the best surviving
 * candidate wins, with the earliest boundary breaking ties. When no
 * candidate survives or the best score is hopeless, a greedy
 * accumulate-until-full fallback takes over. The routine repeats on the
 * remaining tail until every produced line fits.
 */

use log::debug;

use crate::rules::RuleSet;
use crate::tokenizer::{
    Token, first_visible_word, join, last_visible_word, slice_at_visible_limit, tokenize,
    visible_len, visible_len_str,
};

/// Minimum visible length for the right side of any candidate split
const MIN_TAIL_LEN: usize = 3;

/// Candidates scoring below this are abandoned in favor of the greedy fallback
const MIN_ACCEPTABLE_SCORE: i32 = -50;

/// Penalty for splitting a forbidden word pair
const FORBIDDEN_PENALTY: i32 = 200;

/// Wrap a text fragment into lines of at most `limit` visible characters.
///
/// Text already within the limit is returned as a single untouched line. A
/// single token longer than the limit is forced onto its own line unsplit.
pub fn wrap(text: &str, limit: usize, rules: &RuleSet) -> Vec<String> {
    let mut lines = Vec::new();
    let mut remaining = text.trim().to_string();

    while !remaining.is_empty() {
        let tokens = tokenize(&remaining);
        if visible_len(&tokens) <= limit {
            lines.push(remaining);
            break;
        }

        let (head, tail) = split_once(&tokens, limit, rules);
        if head.is_empty() {
            // No split made progress; emit what is left rather than loop.
            lines.push(remaining);
            break;
        }
        lines.push(head);
        remaining = tail;
    }

    lines
}

/// Split one oversized token run into a head line and the remaining tail.
fn split_once(tokens: &[Token], limit: usize, rules: &RuleSet) -> (String, String) {
    let word_positions: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_word())
        .map(|(i, _)| i)
        .collect();
    let total_words = word_positions.len();

    if total_words <= 1 {
        // A lone token (possibly with tags) cannot be split at a word
        // boundary; force it onto its own line.
        return (join(tokens), String::new());
    }

    let mut best: Option<(i32, usize)> = None;
    for k in 1..total_words {
        let boundary = boundary_before_word(tokens, word_positions[k]);
        let left = join(&tokens[..boundary]);
        let right = join(&tokens[boundary..]);

        if visible_len_str(&left) > limit {
            continue;
        }
        if visible_len_str(&right) < MIN_TAIL_LEN {
            continue;
        }
        if rules.is_bad_split(&left, &right) {
            continue;
        }

        let score = score_candidate(&left, &right, rules);
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, boundary));
        }
    }

    match best {
        Some((score, boundary)) if score >= MIN_ACCEPTABLE_SCORE => {
            let left = join(&tokens[..boundary]);
            let right = join(&tokens[boundary..]);
            debug!("split candidate accepted with score {}: {:?}", score, left);
            (left, right)
        }
        _ => {
            debug!("no acceptable split candidate, using greedy fallback");
            greedy_split(tokens, limit)
        }
    }
}

/// Score a surviving candidate boundary.
///
/// Sentence-final punctuation is rewarded twice, once directly and once
/// inside `split_quality`; the combined weight is intentional.
fn score_candidate(left: &str, right: &str, rules: &RuleSet) -> i32 {
    let mut score = 0;

    if last_visible_word(left)
        .and_then(|w| w.chars().last())
        .is_some_and(|c| matches!(c, '.' | '!' | '?'))
    {
        score += 30;
    }

    score += rules.split_quality(left, right);

    if let Some(first) = first_visible_word(right) {
        if rules.is_conjunction(&first) {
            score += 20;
        }
        if rules.is_preposition(&first) {
            score += 15;
        }
    }

    let left_word = last_visible_word(left).unwrap_or_default();
    let right_word = first_visible_word(right).unwrap_or_default();
    if rules.is_forbidden_split(&left_word, &right_word) {
        score -= FORBIDDEN_PENALTY;
    }

    let diff = visible_len_str(left).abs_diff(visible_len_str(right));
    if diff < 6 {
        score += 5;
    } else if diff < 12 {
        score += 2;
    }

    score
}

/// Accumulate tokens left to right until the next word would overflow the
/// limit, then cut immediately before it. A first token that alone exceeds
/// the limit is kept whole on the head line.
fn greedy_split(tokens: &[Token], limit: usize) -> (String, String) {
    let mut used = 0;
    let mut has_word = false;
    let mut cut = tokens.len();

    for (i, token) in tokens.iter().enumerate() {
        if let Token::Word(w) = token {
            let joiner = usize::from(has_word);
            let word_len = w.chars().count();
            if has_word && used + joiner + word_len > limit {
                cut = boundary_before_word(tokens, i);
                break;
            }
            used += joiner + word_len;
            has_word = true;
        }
    }

    (join(&tokens[..cut]), join(&tokens[cut..]))
}

/// Token index to cut at so tags directly before a word stay with it.
fn boundary_before_word(tokens: &[Token], word_index: usize) -> usize {
    let mut boundary = word_index;
    while boundary > 0 && tokens[boundary - 1].is_tag() {
        boundary -= 1;
    }
    boundary
}

/// Last-resort hard wrap of a line at visible-character boundaries.
///
/// Only used when oversized single tokens must be forced under the limit;
/// tag contents are never cut.
pub fn hard_slice(text: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = text.to_string();

    while visible_len_str(&rest) > limit {
        let (head, tail) = slice_at_visible_limit(&rest, limit);
        if head.trim().is_empty() || tail.trim().is_empty() {
            break;
        }
        pieces.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }

    pieces
}
