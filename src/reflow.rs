/*!
 * Per-cue reflow and the whole-document fix pass.
 *
 * A cue needing reflow has its text normalized, decomposed into clause
 * chunks, wrapped into compliant lines and regrouped into one or more
 * output cues. When a cue splits, its time interval is partitioned across
 * the new cues so chronological order and exact coverage are preserved.
 * Every fix pass re-indexes the whole document densely as 1..N.
 */

use log::debug;

use crate::chunker;
use crate::rules::{MIN_SPLIT_WORDS, RuleSet};
use crate::splitter;
use crate::subtitle_processor::Cue;
use crate::timecode;
use crate::tokenizer::{first_visible_word, last_visible_word, visible_len_str, visible_word_count};

/// Display constraints for reflowed cues.
#[derive(Debug, Clone, Copy)]
pub struct LayoutLimits {
    /// Maximum visible characters per line
    pub line_limit: usize,
    /// Maximum lines per cue
    pub max_lines: usize,
    /// Hard-wrap single tokens longer than the line limit
    pub hard_wrap_oversized: bool,
}

impl Default for LayoutLimits {
    fn default() -> Self {
        LayoutLimits {
            line_limit: 42,
            max_lines: 2,
            hard_wrap_oversized: false,
        }
    }
}

/// Whether a cue violates the layout constraints or carries a bad two-line
/// split.
pub fn needs_reflow(cue: &Cue, rules: &RuleSet, limits: &LayoutLimits) -> bool {
    if cue.lines.len() > limits.max_lines {
        return true;
    }
    if cue
        .lines
        .iter()
        .any(|line| visible_len_str(line) > limits.line_limit)
    {
        return true;
    }
    if cue.lines.len() == 2 {
        return is_bad_line_pair(&cue.lines[0], &cue.lines[1], rules);
    }
    false
}

/// Top-level judgement of an existing two-line split.
fn is_bad_line_pair(first: &str, second: &str, rules: &RuleSet) -> bool {
    if first.trim().is_empty() || second.trim().is_empty() {
        return true;
    }
    // A conjunction dangling at the end of line one or opening line two
    // reads badly on screen.
    if last_visible_word(first).is_some_and(|w| rules.is_conjunction(&w)) {
        return true;
    }
    if first_visible_word(second).is_some_and(|w| rules.is_conjunction(&w)) {
        return true;
    }
    if let (Some(left), Some(right)) = (last_visible_word(first), first_visible_word(second)) {
        if rules.is_forbidden_split(&left, &right) {
            return true;
        }
    }
    if visible_word_count(first) < MIN_SPLIT_WORDS || visible_word_count(second) < MIN_SPLIT_WORDS {
        return true;
    }
    false
}

/// Reflow one cue into one or more compliant cues.
///
/// The input cue is never mutated; replacement cues are returned. Indices
/// are left for the document-level pass to renumber.
pub fn reflow_cue(cue: &Cue, rules: &RuleSet, limits: &LayoutLimits) -> Vec<Cue> {
    let normalized = chunker::normalize(&cue.lines.join(" "));
    let chunks = chunker::chunk(&normalized, rules);

    let mut lines: Vec<String> = Vec::new();
    for chunk in &chunks {
        lines.extend(splitter::wrap(chunk, limits.line_limit, rules));
    }

    if limits.hard_wrap_oversized {
        lines = lines
            .into_iter()
            .flat_map(|line| {
                if visible_len_str(&line) > limits.line_limit {
                    splitter::hard_slice(&line, limits.line_limit)
                } else {
                    vec![line]
                }
            })
            .collect();
    }

    let groups: Vec<Vec<String>> = lines
        .chunks(limits.max_lines.max(1))
        .map(|group| group.to_vec())
        .collect();

    if groups.len() <= 1 {
        return vec![Cue::new(
            cue.index,
            cue.start_time_ms,
            cue.end_time_ms,
            groups.into_iter().next().unwrap_or_default(),
        )];
    }

    debug!(
        "cue {} reflowed into {} cues across {}ms",
        cue.index,
        groups.len(),
        cue.end_time_ms.saturating_sub(cue.start_time_ms)
    );

    let ranges = timecode::partition(cue.start_time_ms, cue.end_time_ms, groups.len());
    groups
        .into_iter()
        .zip(ranges)
        .map(|(group, (start_ms, end_ms))| Cue::new(cue.index, start_ms, end_ms, group))
        .collect()
}

/// Fix a whole document: reflow every non-compliant cue and renumber the
/// result densely as 1..N.
pub fn fix(cues: &[Cue], rules: &RuleSet, limits: &LayoutLimits) -> Vec<Cue> {
    let mut fixed: Vec<Cue> = Vec::with_capacity(cues.len());
    for cue in cues {
        if needs_reflow(cue, rules, limits) {
            fixed.extend(reflow_cue(cue, rules, limits));
        } else {
            fixed.push(cue.clone());
        }
    }

    for (i, cue) in fixed.iter_mut().enumerate() {
        cue.index = i + 1;
    }
    fixed
}
