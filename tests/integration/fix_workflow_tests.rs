/*!
 * End-to-end tests for the parse -> fix -> build workflow
 */

use cuefix::app_config::Config;
use cuefix::reflow::fix;
use cuefix::rules::RuleSet;
use cuefix::subtitle_processor::{build, parse};
use cuefix::tokenizer::visible_len_str;

/// Run a whole document through the engine with default limits
fn fix_document(document: &str) -> String {
    let rules = RuleSet::english();
    let limits = Config::default().layout_limits();
    let cues = parse(document);
    build(&fix(&cues, &rules, &limits))
}

/// Test that an oversized cue is split into compliant cues covering the
/// original time range
#[test]
fn test_fixWorkflow_withOversizedCue_shouldProduceCompliantDocument() {
    let document = "\
1
00:00:01,000 --> 00:00:07,000
I can't believe you did this to me after everything we have been through together

2
00:00:08,000 --> 00:00:10,000
A fine short cue
";
    let fixed = parse(&fix_document(document));

    // Indices are dense 1..N
    let indices: Vec<usize> = fixed.iter().map(|c| c.index).collect();
    assert_eq!(indices, (1..=fixed.len()).collect::<Vec<_>>());

    // Every cue is compliant
    for cue in &fixed {
        assert!(cue.lines.len() <= 2);
        for line in &cue.lines {
            assert!(visible_len_str(line) <= 42, "overlong line: {:?}", line);
        }
    }

    // The oversized cue split; its replacements cover the original range
    assert!(fixed.len() > 2);
    let split: Vec<_> = fixed
        .iter()
        .filter(|c| c.start_time_ms < 8_000)
        .collect();
    assert!(split.len() >= 2);
    assert_eq!(split.first().unwrap().start_time_ms, 1_000);
    assert_eq!(split.last().unwrap().end_time_ms, 7_000);
    for pair in split.windows(2) {
        assert_eq!(pair[0].end_time_ms, pair[1].start_time_ms);
    }

    // No words were lost or reordered
    let flattened: Vec<String> = split.iter().flat_map(|c| c.lines.clone()).collect();
    assert_eq!(
        flattened.join(" "),
        "I can't believe you did this to me after everything we have been through together"
    );
}

/// Test that fixing is idempotent on its own output
#[test]
fn test_fixWorkflow_shouldBeIdempotent() {
    let document = "\
1
00:00:01,000 --> 00:00:07,000
We tried everything we could think of. Nothing worked and nobody came to help us

2
00:00:08,000 --> 00:00:10,000
We could leave early when the show ends tonight
";
    let once = fix_document(document);
    let twice = fix_document(&once);

    assert_eq!(once, twice);
}

/// Test that formatting tags survive the whole pipeline untouched
#[test]
fn test_fixWorkflow_withTags_shouldPreserveThem() {
    let document = "\
1
00:00:01,000 --> 00:00:06,000
<i>I can't believe you did this to me after everything we have been through</i>
";
    let output = fix_document(document);

    assert!(output.contains("<i>"));
    assert!(output.contains("</i>"));
    for cue in parse(&output) {
        for line in &cue.lines {
            assert!(visible_len_str(line) <= 42, "overlong line: {:?}", line);
        }
    }
}

/// Test that a pathological token is emitted verbatim rather than being
/// silently character-sliced
#[test]
fn test_fixWorkflow_withPathologicalToken_shouldNotTruncate() {
    let token = "Donaudampfschifffahrtsgesellschaftskapitaenswitwe";
    let document = format!("1\n00:00:01,000 --> 00:00:03,000\n{} sings loudly\n", token);
    let output = fix_document(&document);

    assert!(output.contains(token));
}

/// Test graceful degradation on partially malformed documents
#[test]
fn test_fixWorkflow_withMalformedBlocks_shouldKeepValidCues() {
    let document = "\
1
garbage line without timecodes

2
00:00:03,000 --> 00:00:04,000
Still valid here
";
    let fixed = parse(&fix_document(document));

    assert_eq!(fixed.len(), 1);
    assert_eq!(fixed[0].index, 1);
    assert_eq!(fixed[0].lines, vec!["Still valid here"]);
}
