//! Speaker segmentation behavior tests.

use meetnote::gateway::RawSegment;
use meetnote::transcript::{format_timestamp, segment};

fn raw(start: f64, end: f64, text: &str) -> RawSegment {
    RawSegment {
        start,
        end,
        text: text.to_string(),
    }
}

#[test]
fn first_segment_is_participant_one() {
    let out = segment(&[raw(0.0, 2.0, "hello everyone, welcome to the meeting")]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].speaker, "Participant 1");
}

#[test]
fn small_gap_keeps_current_speaker() {
    // Gap of 0.5 s is below the change threshold even with many words.
    let out = segment(&[
        raw(0.0, 1.0, "hi"),
        raw(1.5, 3.0, "let me walk you through the agenda for today"),
    ]);
    assert_eq!(out[0].speaker, "Participant 1");
    assert_eq!(out[1].speaker, "Participant 1");
}

#[test]
fn large_gap_with_few_words_keeps_current_speaker() {
    // Long silence but only two words: not enough evidence of a new speaker.
    let out = segment(&[raw(0.0, 1.0, "hello"), raw(10.0, 11.0, "okay then")]);
    assert_eq!(out[1].speaker, "Participant 1");
}

#[test]
fn large_gap_with_enough_words_changes_speaker() {
    let out = segment(&[
        raw(0.0, 1.0, "short"),
        raw(5.0, 8.0, "this is definitely more than five words total here"),
    ]);
    assert_eq!(out[0].speaker, "Participant 1");
    assert_eq!(out[1].speaker, "Participant 2");
}

#[test]
fn speakers_cycle_through_pool_of_three() {
    let long = "one two three four five six seven";
    let out = segment(&[
        raw(0.0, 1.0, long),
        raw(5.0, 6.0, long),
        raw(10.0, 11.0, long),
        raw(15.0, 16.0, long),
        raw(20.0, 21.0, long),
    ]);
    let speakers: Vec<&str> = out.iter().map(|s| s.speaker.as_str()).collect();
    assert_eq!(
        speakers,
        vec![
            "Participant 1",
            "Participant 2",
            "Participant 3",
            "Participant 1",
            "Participant 2",
        ]
    );
}

#[test]
fn segmentation_is_deterministic() {
    let input = vec![
        raw(0.0, 3.0, "opening remarks from the chair of the meeting"),
        raw(6.5, 9.0, "thanks, I would like to add a few points here"),
        raw(9.2, 10.0, "sure"),
    ];
    let first = segment(&input);
    let second = segment(&input);
    assert_eq!(first, second);
}

#[test]
fn timestamps_are_formatted_hms() {
    let out = segment(&[raw(3661.5, 3725.0, "moving on to the next item")]);
    assert_eq!(out[0].start, "01:01:01");
    assert_eq!(out[0].end, "01:02:05");
}

#[test]
fn malformed_timestamps_render_as_zero() {
    assert_eq!(format_timestamp(f64::NAN), "00:00:00");
    assert_eq!(format_timestamp(f64::NEG_INFINITY), "00:00:00");
    assert_eq!(format_timestamp(-0.1), "00:00:00");

    let out = segment(&[raw(f64::NAN, -1.0, "odd timing data")]);
    assert_eq!(out[0].start, "00:00:00");
    assert_eq!(out[0].end, "00:00:00");
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(segment(&[]).is_empty());
}
