// Tests for transcript condensation
//
// Segments are joined with a trailing space each; the cap is checked after
// every append, so truncation happens on segment boundaries.

use tube_tutor::{RelayError, TranscriptCondenser, TranscriptSegment};

fn segments(texts: &[&str]) -> Vec<TranscriptSegment> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| TranscriptSegment::new(*t, i as f64, 1.0))
        .collect()
}

#[test]
fn test_short_transcript_is_joined_whole() {
    let condenser = TranscriptCondenser::default();
    let out = condenser
        .condense(&segments(&["welcome to", "the lecture", "on ownership"]))
        .unwrap();

    assert_eq!(out, "welcome to the lecture on ownership ");
}

#[test]
fn test_empty_transcript() {
    let out = TranscriptCondenser::default().condense(&[]).unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_crossing_segment_is_kept_whole() {
    let chunk = "a".repeat(399);
    let tail = "never included";
    let input = segments(&[&chunk, &chunk, &chunk, tail]);

    let out = TranscriptCondenser::default().condense(&input).unwrap();

    // 400 + 400 + 400: the third segment crosses 1000 and is kept entirely
    assert_eq!(out.len(), 1200);
    assert!(!out.contains(tail));
    assert!(out.ends_with("a "));
}

#[test]
fn test_stops_when_cap_is_reached_exactly() {
    let chunk = "b".repeat(499);
    let input = segments(&[&chunk, &chunk, "after"]);

    let out = TranscriptCondenser::default().condense(&input).unwrap();

    assert_eq!(out.chars().count(), 1000);
    assert!(!out.contains("after"));
}

#[test]
fn test_cap_counts_characters_not_bytes() {
    let condenser = TranscriptCondenser::new(10);
    // 4 chars + space = 5, twice = 10
    let out = condenser.condense(&segments(&["été!", "çava", "next"])).unwrap();

    assert_eq!(out, "été! çava ");
}

#[test]
fn test_missing_text_is_rejected() {
    let mut input = segments(&["first", "second"]);
    input[1].text = None;

    let err = TranscriptCondenser::default().condense(&input).unwrap_err();
    assert!(matches!(err, RelayError::InvalidSegment { index: 1 }));
    assert_eq!(err.kind(), "invalid_segment");
}

#[test]
fn test_missing_text_after_cap_is_never_read() {
    let mut input = segments(&["0123456789", "later"]);
    input[1].text = None;

    let out = TranscriptCondenser::new(5).condense(&input).unwrap();
    assert_eq!(out, "0123456789 ");
}

#[test]
fn test_segment_without_text_deserializes() {
    let json = r#"[{"text": "hello", "timestamp": 0.0, "duration": 1.5}, {"timestamp": 1.5}]"#;
    let input: Vec<TranscriptSegment> = serde_json::from_str(json).unwrap();

    assert_eq!(input[0].text.as_deref(), Some("hello"));
    assert_eq!(input[1].text, None);
    assert_eq!(input[1].duration, 0.0);
}
