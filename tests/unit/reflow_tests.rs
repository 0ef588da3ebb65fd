/*!
 * Tests for the cue reflow engine
 */

use cuefix::reflow::{LayoutLimits, fix, needs_reflow, reflow_cue};
use cuefix::rules::RuleSet;
use cuefix::subtitle_processor::Cue;
use cuefix::tokenizer::visible_len_str;

fn limits() -> LayoutLimits {
    LayoutLimits::default()
}

fn cue(lines: &[&str]) -> Cue {
    Cue::new(
        1,
        1_000,
        5_000,
        lines.iter().map(|l| l.to_string()).collect(),
    )
}

/// Test that compliant cues are left alone
#[test]
fn test_needsReflow_withCompliantCue_shouldBeFalse() {
    let rules = RuleSet::english();
    assert!(!needs_reflow(&cue(&["This line is fine"]), &rules, &limits()));
    assert!(!needs_reflow(
        &cue(&["We finished the work yesterday,", "then we all went home."]),
        &rules,
        &limits()
    ));
}

/// Test line-count violations
#[test]
fn test_needsReflow_withTooManyLines_shouldBeTrue() {
    let rules = RuleSet::english();
    assert!(needs_reflow(&cue(&["Hi", "there", "friend"]), &rules, &limits()));
}

/// Test visible-length violations, tags excluded from the count
#[test]
fn test_needsReflow_withOverlongLine_shouldUseVisibleLength() {
    let rules = RuleSet::english();
    let long = "this single line is much much longer than the limit allows";
    assert!(needs_reflow(&cue(&[long]), &rules, &limits()));

    let tagged = "<i>short enough once the tags are stripped</i>";
    assert!(visible_len_str(tagged) <= 42);
    assert!(!needs_reflow(&cue(&[tagged, "plus a second decent line"]), &rules, &limits()));
}

/// Test bad two-line pairs
#[test]
fn test_needsReflow_withBadLinePair_shouldBeTrue() {
    let rules = RuleSet::english();
    // Dangling conjunction at the end of line one
    assert!(needs_reflow(
        &cue(&["we waited and", "nobody came today"]),
        &rules,
        &limits()
    ));
    // Conjunction opening line two
    assert!(needs_reflow(
        &cue(&["we waited patiently", "but nobody came"]),
        &rules,
        &limits()
    ));
    // Forbidden boundary between the lines
    assert!(needs_reflow(
        &cue(&["I saw John", "Smith yesterday morning"]),
        &rules,
        &limits()
    ));
    // One-word side
    assert!(needs_reflow(&cue(&["Hello", "there friend"]), &rules, &limits()));
}

/// Test merging of needlessly split short lines
#[test]
fn test_reflowCue_withShortFragments_shouldMergeToOneLine() {
    let rules = RuleSet::english();
    let out = reflow_cue(&cue(&["Hi", "there", "friend"]), &rules, &limits());

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].lines, vec!["Hi there friend"]);
    assert_eq!(out[0].start_time_ms, 1_000);
    assert_eq!(out[0].end_time_ms, 5_000);
}

/// Test that a cue splitting into three lines becomes two cues with a
/// partitioned time range
#[test]
fn test_reflowCue_withThreeOutputLines_shouldPartitionTimeRange() {
    let rules = RuleSet::english();
    let text = "I can't believe you did this to me after everything we have been through together";
    let source = Cue::new(3, 1_000, 7_000, vec![text.to_string()]);
    let out = reflow_cue(&source, &rules, &limits());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].lines.len(), 2);
    assert_eq!(out[1].lines.len(), 1);
    assert_eq!(out[0].start_time_ms, 1_000);
    assert_eq!(out[0].end_time_ms, out[1].start_time_ms);
    assert_eq!(out[1].end_time_ms, 7_000);

    let joined: Vec<String> = out.iter().flat_map(|c| c.lines.clone()).collect();
    assert_eq!(joined.join(" "), text);
    for line in &joined {
        assert!(visible_len_str(line) <= 42, "overlong line: {:?}", line);
    }
}

/// Test that reflow preserves an empty cue
#[test]
fn test_reflowCue_withEmptyText_shouldYieldEmptyLines() {
    let rules = RuleSet::english();
    let source = Cue::new(1, 1_000, 2_000, vec![]);
    let out = reflow_cue(&source, &rules, &limits());

    assert_eq!(out.len(), 1);
    assert!(out[0].lines.is_empty());
    assert_eq!(out[0].start_time_ms, 1_000);
    assert_eq!(out[0].end_time_ms, 2_000);
}

/// Test that fix renumbers the whole document densely
#[test]
fn test_fix_shouldReindexDensely() {
    let rules = RuleSet::english();
    let cues = vec![
        Cue::new(5, 1_000, 2_000, vec!["First cue here".to_string()]),
        Cue::new(9, 3_000, 4_000, vec!["Second cue here".to_string()]),
    ];
    let fixed = fix(&cues, &rules, &limits());

    let indices: Vec<usize> = fixed.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1, 2]);
}

/// Test that fix leaves compliant cue text untouched
#[test]
fn test_fix_withCompliantCues_shouldLeaveTextUnchanged() {
    let rules = RuleSet::english();
    let cues = vec![
        Cue::new(1, 1_000, 2_000, vec!["This line is fine".to_string()]),
        Cue::new(
            2,
            3_000,
            4_000,
            vec![
                "We finished the work yesterday,".to_string(),
                "then we all went home.".to_string(),
            ],
        ),
    ];
    let fixed = fix(&cues, &rules, &limits());

    assert_eq!(fixed.len(), 2);
    assert_eq!(fixed[0].lines, cues[0].lines);
    assert_eq!(fixed[1].lines, cues[1].lines);
    assert_eq!(fixed[1].start_time_ms, 3_000);
    assert_eq!(fixed[1].end_time_ms, 4_000);
}

/// Test that fixed output always satisfies the layout invariants
#[test]
fn test_fix_shouldEnforceLayoutInvariants() {
    let rules = RuleSet::english();
    let cues = vec![
        Cue::new(
            1,
            0,
            6_000,
            vec![
                "We tried everything we could think of. Nothing worked and nobody came to help us"
                    .to_string(),
            ],
        ),
        Cue::new(2, 6_500, 8_000, vec!["Short and sweet here".to_string()]),
    ];
    let fixed = fix(&cues, &rules, &limits());

    for (i, cue) in fixed.iter().enumerate() {
        assert_eq!(cue.index, i + 1);
        assert!(cue.lines.len() <= 2);
        for line in &cue.lines {
            assert!(visible_len_str(line) <= 42, "overlong line: {:?}", line);
        }
    }

    // Time order is preserved across the document
    for pair in fixed.windows(2) {
        assert!(pair[0].start_time_ms <= pair[1].start_time_ms);
    }
}

/// Test custom layout limits
#[test]
fn test_fix_withCustomLimits_shouldRespectThem() {
    let rules = RuleSet::english();
    let custom = LayoutLimits {
        line_limit: 20,
        max_lines: 1,
        hard_wrap_oversized: false,
    };
    let cues = vec![Cue::new(
        1,
        0,
        4_000,
        vec!["a handful of plain words that overflow".to_string()],
    )];
    let fixed = fix(&cues, &rules, &custom);

    assert!(fixed.len() > 1);
    for cue in &fixed {
        assert_eq!(cue.lines.len(), 1);
        assert!(visible_len_str(&cue.lines[0]) <= 20);
    }
}
