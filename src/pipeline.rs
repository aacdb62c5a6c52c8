use std::path::PathBuf;

use crate::{
    assets::media::MIX_SAMPLE_RATE,
    assets::resolver::resolve_slides,
    audio::mix::mix_timeline,
    config::EngineConfig,
    foundation::error::SlidecastResult,
    model::{SlideAssets, Timeline},
    render::pipeline::{RenderStats, render_video},
    telemetry::{TimingReport, log_report, timing_report},
    timeline::builder::build_timeline,
};

/// Result of a full assembly run.
#[derive(Clone, Debug)]
pub struct AssembleOutput {
    /// Path of the finished video.
    pub out_path: PathBuf,
    /// Per-slide timing records for drift diagnosis.
    pub report: TimingReport,
    /// Rendering counters.
    pub stats: RenderStats,
}

/// Resolve assets and build the timeline without mixing or rendering.
///
/// Useful for inspecting computed durations and offsets before committing
/// to a long encode.
pub fn plan_timeline(
    sources: &[SlideAssets],
    config: &EngineConfig,
) -> SlidecastResult<Timeline> {
    config.validate()?;
    let slides = resolve_slides(sources, &config.default_transition)?;
    build_timeline(&slides, config)
}

/// Run the full pipeline: resolve, compute durations, build the timeline,
/// mix audio, render and mux the output video.
///
/// Each stage completes before the next begins; the only internal
/// parallelism is the bounded image-preparation pool. No state survives
/// the run except the output file.
#[tracing::instrument(skip(sources, config), fields(slides = sources.len()))]
pub fn assemble(
    sources: &[SlideAssets],
    config: &EngineConfig,
    out_path: impl Into<PathBuf> + std::fmt::Debug,
) -> SlidecastResult<AssembleOutput> {
    let out_path = out_path.into();
    config.validate()?;

    let slides = resolve_slides(sources, &config.default_transition)?;
    let timeline = build_timeline(&slides, config)?;
    let report = timing_report(&timeline, &config.timing);
    log_report(&report);

    let mixed = mix_timeline(&timeline, config.music.as_ref(), MIX_SAMPLE_RATE)?;
    let stats = render_video(&timeline, &mixed, &config.render, &out_path)?;

    Ok(AssembleOutput {
        out_path,
        report,
        stats,
    })
}
