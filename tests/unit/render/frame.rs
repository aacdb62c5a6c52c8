use super::*;

use crate::model::{SlideRole, SlideSpec, Transition};

const FPS: u32 = 1;

fn canvas() -> Canvas {
    Canvas::new(2, 2).unwrap()
}

fn solid(value: [u8; 3]) -> PreparedSlideImage {
    let mut rgba8 = Vec::new();
    for _ in 0..4 {
        rgba8.extend_from_slice(&[value[0], value[1], value[2], 255]);
    }
    PreparedSlideImage {
        width: 2,
        height: 2,
        rgba8,
    }
}

fn spec(index: u32, visual: &str) -> SlideSpec {
    SlideSpec {
        index,
        visual: PathBuf::from(visual),
        narration: None,
        narration_secs: None,
        reveal_visual: None,
        role: SlideRole::Content,
        transition_in: Transition::none(),
        transition_out: Transition::none(),
    }
}

fn two_slide_timeline(second_in: Transition) -> (Timeline, HashMap<PathBuf, PreparedSlideImage>) {
    let overlap = second_in.overlap_secs();
    let timeline = Timeline {
        entries: vec![
            TimelineEntry {
                slide: spec(0, "a.png"),
                start_offset_secs: 0.0,
                duration_secs: 8.0,
                reveal_at_secs: None,
            },
            TimelineEntry {
                slide: SlideSpec {
                    transition_in: second_in,
                    ..spec(1, "b.png")
                },
                start_offset_secs: 8.0 - overlap,
                duration_secs: 8.0,
                reveal_at_secs: None,
            },
        ],
        total_secs: 16.0 - overlap,
    };
    let mut prepared = HashMap::new();
    prepared.insert(PathBuf::from("a.png"), solid([200, 0, 0]));
    prepared.insert(PathBuf::from("b.png"), solid([0, 0, 100]));
    (timeline, prepared)
}

#[test]
fn hard_cut_switches_exactly_at_boundary() {
    let (timeline, prepared) = two_slide_timeline(Transition::none());
    let bg = Rgb8::default();

    let before = compose_frame(&timeline, &prepared, canvas(), bg, 7, FPS).unwrap();
    assert_eq!(&before.data[0..4], &[200, 0, 0, 255]);

    let after = compose_frame(&timeline, &prepared, canvas(), bg, 8, FPS).unwrap();
    assert_eq!(&after.data[0..4], &[0, 0, 100, 255]);
}

#[test]
fn crossfade_blends_midway() {
    let (timeline, prepared) = two_slide_timeline(Transition {
        kind: TransitionKind::Crossfade,
        duration_secs: 2.0,
    });
    let bg = Rgb8::default();

    // Second entry starts at 6.0; frame 7 is the overlap midpoint.
    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 7, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[100, 0, 50, 255]);

    // After the overlap, the incoming slide is fully visible.
    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 9, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[0, 0, 100, 255]);
}

#[test]
fn wipe_shows_old_pixels_ahead_of_the_sweep() {
    let (timeline, prepared) = two_slide_timeline(Transition {
        kind: TransitionKind::Wipe {
            dir: WipeDir::LeftToRight,
        },
        duration_secs: 2.0,
    });
    let bg = Rgb8::default();

    // Overlap midpoint: the sweep covers the left column only.
    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 7, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[0, 0, 100, 255], "left pixel is new");
    assert_eq!(&frame.data[4..8], &[200, 0, 0, 255], "right pixel is old");
}

#[test]
fn fade_in_starts_at_background() {
    let mut timeline = Timeline {
        entries: vec![TimelineEntry {
            slide: SlideSpec {
                transition_in: Transition {
                    kind: TransitionKind::Fade,
                    duration_secs: 2.0,
                },
                ..spec(0, "a.png")
            },
            start_offset_secs: 0.0,
            duration_secs: 8.0,
            reveal_at_secs: None,
        }],
        total_secs: 8.0,
    };
    let mut prepared = HashMap::new();
    prepared.insert(PathBuf::from("a.png"), solid([200, 0, 0]));

    let bg = Rgb8 { r: 0, g: 0, b: 0 };
    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 0, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[0, 0, 0, 255]);

    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 1, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[100, 0, 0, 255]);

    // Past the fade the slide is fully visible.
    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 4, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[200, 0, 0, 255]);

    // Fade-out over the tail mirrors the ramp.
    timeline.entries[0].slide.transition_in = Transition::none();
    timeline.entries[0].slide.transition_out = Transition {
        kind: TransitionKind::Fade,
        duration_secs: 2.0,
    };
    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 7, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[100, 0, 0, 255]);
}

#[test]
fn reveal_switches_visual_at_anchor() {
    let timeline = Timeline {
        entries: vec![TimelineEntry {
            slide: SlideSpec {
                reveal_visual: Some(PathBuf::from("answer.png")),
                ..spec(0, "a.png")
            },
            start_offset_secs: 0.0,
            duration_secs: 8.0,
            reveal_at_secs: Some(4.2),
        }],
        total_secs: 8.0,
    };
    let mut prepared = HashMap::new();
    prepared.insert(PathBuf::from("a.png"), solid([200, 0, 0]));
    prepared.insert(PathBuf::from("answer.png"), solid([0, 200, 0]));

    let bg = Rgb8::default();
    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 4, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[200, 0, 0, 255], "before reveal");

    let frame = compose_frame(&timeline, &prepared, canvas(), bg, 5, FPS).unwrap();
    assert_eq!(&frame.data[0..4], &[0, 200, 0, 255], "after reveal");
}

#[test]
fn missing_prepared_image_is_a_render_error() {
    let (timeline, mut prepared) = two_slide_timeline(Transition::none());
    prepared.remove(&PathBuf::from("b.png"));

    let err =
        compose_frame(&timeline, &prepared, canvas(), Rgb8::default(), 9, FPS).unwrap_err();
    assert!(matches!(
        err,
        crate::foundation::error::SlidecastError::Render(_)
    ));
}
