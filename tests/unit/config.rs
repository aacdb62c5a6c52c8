use super::*;
use crate::model::TransitionKind;

#[test]
fn empty_document_yields_defaults() {
    let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.timing.additional_secs, 3.0);
    assert_eq!(cfg.timing.default_secs, 6.0);
    assert_eq!(cfg.timing.min_secs, 2.0);
    assert_eq!(cfg.timing.max_secs, 60.0);
    assert_eq!(cfg.default_transition.kind, TransitionKind::None);
    assert!(cfg.start_slide.is_none());
    assert!(cfg.end_slide.is_none());
    assert!(cfg.music.is_none());
    assert_eq!(cfg.render.width, 1920);
    assert_eq!(cfg.render.height, 1080);
    assert_eq!(cfg.render.fps, 30);
    assert_eq!(cfg.render.codec, "libx264");
    cfg.validate().unwrap();
}

#[test]
fn validation_reports_all_faults_together() {
    let cfg: EngineConfig = serde_json::from_str(
        r#"{
            "timing": {"additional_secs": -1.0, "min_secs": 5.0, "max_secs": 2.0},
            "music": {"source": "bed.mp3", "target_volume": 1.5},
            "render": {"width": 1921, "fps": 0}
        }"#,
    )
    .unwrap();

    let err = cfg.validate().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("timing.additional_secs"), "{msg}");
    assert!(msg.contains("timing.max_secs"), "{msg}");
    assert!(msg.contains("music.target_volume"), "{msg}");
    assert!(msg.contains("render.width/height"), "{msg}");
    assert!(msg.contains("render.fps"), "{msg}");
}

#[test]
fn music_defaults_applied() {
    let cfg: EngineConfig =
        serde_json::from_str(r#"{"music": {"source": "bed.mp3"}}"#).unwrap();
    let music = cfg.music.unwrap();
    assert_eq!(music.target_volume, 0.1);
    assert_eq!(music.fade_in_secs, 2.0);
    assert_eq!(music.fade_out_secs, 3.0);
}

#[test]
fn bookend_duration_must_be_positive() {
    let cfg: EngineConfig = serde_json::from_str(
        r#"{"start_slide": {"visual": "start.png", "duration_secs": 0.0}}"#,
    )
    .unwrap();
    let msg = cfg.validate().unwrap_err().to_string();
    assert!(msg.contains("start_slide.duration_secs"), "{msg}");
}

#[test]
fn default_transition_parses_from_config() {
    let cfg: EngineConfig = serde_json::from_str(
        r#"{"default_transition": {"kind": "crossfade", "duration_secs": 1.0}}"#,
    )
    .unwrap();
    assert_eq!(cfg.default_transition.kind, TransitionKind::Crossfade);
    assert_eq!(cfg.default_transition.duration_secs, 1.0);
    cfg.validate().unwrap();
}
