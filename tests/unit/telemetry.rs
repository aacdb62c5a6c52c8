use super::*;
use std::path::PathBuf;

use crate::model::{SlideSpec, TimelineEntry, Transition};

fn timing() -> TimingConfig {
    TimingConfig {
        additional_secs: 3.0,
        default_secs: 6.0,
        min_secs: 2.0,
        max_secs: 10.0,
    }
}

fn entry(
    index: u32,
    role: SlideRole,
    narration_secs: Option<f64>,
    start: f64,
    duration: f64,
) -> TimelineEntry {
    TimelineEntry {
        slide: SlideSpec {
            index,
            visual: PathBuf::from(format!("slide_{index}.png")),
            narration: narration_secs.map(|_| PathBuf::from(format!("slide_{index}.wav"))),
            narration_secs,
            reveal_visual: None,
            role,
            transition_in: Transition::none(),
            transition_out: Transition::none(),
        },
        start_offset_secs: start,
        duration_secs: duration,
        reveal_at_secs: None,
    }
}

#[test]
fn report_recomputes_expected_without_clamping() {
    // ceil(8.5) + 3 = 12 expected, but the max clamp applied 10.
    let timeline = Timeline {
        entries: vec![entry(0, SlideRole::Content, Some(8.5), 0.0, 10.0)],
        total_secs: 10.0,
    };
    let report = timing_report(&timeline, &timing());

    assert_eq!(report.slides.len(), 1);
    let s = &report.slides[0];
    assert_eq!(s.expected_duration, 12.0);
    assert_eq!(s.actual_audio_duration, Some(8.5));
    assert_eq!(s.applied_duration, 10.0);
    assert_eq!(report.total_secs, 10.0);
}

#[test]
fn unclamped_slides_show_no_drift() {
    let timeline = Timeline {
        entries: vec![entry(0, SlideRole::Content, Some(4.2), 0.0, 8.0)],
        total_secs: 8.0,
    };
    let s = &timing_report(&timeline, &timing()).slides[0];
    assert_eq!(s.expected_duration, 8.0);
    assert_eq!(s.applied_duration, 8.0);
}

#[test]
fn silent_slides_expect_the_default_duration() {
    let timeline = Timeline {
        entries: vec![entry(0, SlideRole::Content, None, 0.0, 6.0)],
        total_secs: 6.0,
    };
    let s = &timing_report(&timeline, &timing()).slides[0];
    assert_eq!(s.expected_duration, 6.0);
    assert_eq!(s.actual_audio_duration, None);
}

#[test]
fn bookends_never_report_drift() {
    let timeline = Timeline {
        entries: vec![
            entry(u32::MIN, SlideRole::Start, None, 0.0, 5.0),
            entry(0, SlideRole::Content, Some(4.2), 5.0, 8.0),
            entry(u32::MAX, SlideRole::End, None, 13.0, 4.0),
        ],
        total_secs: 17.0,
    };
    let report = timing_report(&timeline, &timing());

    assert_eq!(report.slides[0].expected_duration, 5.0);
    assert_eq!(report.slides[0].applied_duration, 5.0);
    assert_eq!(report.slides[2].expected_duration, 4.0);
    assert_eq!(report.slides[2].applied_duration, 4.0);
}

#[test]
fn report_round_trips_through_json() {
    let timeline = Timeline {
        entries: vec![entry(0, SlideRole::Content, Some(4.2), 0.0, 8.0)],
        total_secs: 8.0,
    };
    let report = timing_report(&timeline, &timing());
    let json = serde_json::to_string(&report).unwrap();
    let back: TimingReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
