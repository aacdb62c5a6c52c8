use super::*;

#[test]
fn constructors_build_matching_variants() {
    assert!(matches!(
        SlidecastError::asset_resolution("x"),
        SlidecastError::AssetResolution(_)
    ));
    assert!(matches!(
        SlidecastError::config("x"),
        SlidecastError::Config(_)
    ));
    assert!(matches!(
        SlidecastError::timeline("x"),
        SlidecastError::TimelineConsistency(_)
    ));
    assert!(matches!(
        SlidecastError::audio_mix("x"),
        SlidecastError::AudioMix(_)
    ));
    assert!(matches!(
        SlidecastError::render("x"),
        SlidecastError::Render(_)
    ));
}

#[test]
fn display_includes_category_prefix() {
    let e = SlidecastError::timeline("slide 3: bad overlap");
    assert_eq!(
        e.to_string(),
        "timeline consistency error: slide 3: bad overlap"
    );
}

#[test]
fn anyhow_errors_pass_through() {
    let e: SlidecastError = anyhow::anyhow!("io exploded").into();
    assert_eq!(e.to_string(), "io exploded");
}
