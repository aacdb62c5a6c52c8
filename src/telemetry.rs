use crate::{
    config::TimingConfig,
    foundation::core::ceil_to_second,
    model::{SlideRole, Timeline},
};

/// Per-slide timing record for post-hoc drift diagnosis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideTiming {
    /// Ordinal position of the slide.
    pub slide_index: u32,
    /// Duration the padding formula produced before clamping.
    pub expected_duration: f64,
    /// Probed narration length, when narration was present.
    pub actual_audio_duration: Option<f64>,
    /// Duration the timeline actually carries for this slide.
    pub applied_duration: f64,
}

/// Timing records for a whole run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingReport {
    /// One record per timeline entry, in playback order.
    pub slides: Vec<SlideTiming>,
    /// Total timeline duration in seconds.
    pub total_secs: f64,
}

/// Build the drift report for an assembled timeline.
///
/// `expected_duration` is recomputed from the padding formula without
/// clamping, so a gap between expected and applied points at the clamp or
/// at a fixed-duration bookend.
pub fn timing_report(timeline: &Timeline, timing: &TimingConfig) -> TimingReport {
    let slides = timeline
        .entries
        .iter()
        .map(|entry| {
            let expected = match (entry.slide.role, entry.slide.narration_secs) {
                (SlideRole::Start | SlideRole::End, _) => entry.duration_secs,
                (SlideRole::Content, Some(len)) => ceil_to_second(len) + timing.additional_secs,
                (SlideRole::Content, None) => timing.default_secs,
            };
            SlideTiming {
                slide_index: entry.slide.index,
                expected_duration: expected,
                actual_audio_duration: entry.slide.narration_secs,
                applied_duration: entry.duration_secs,
            }
        })
        .collect();

    TimingReport {
        slides,
        total_secs: timeline.total_secs,
    }
}

/// Emit one structured log line per slide, plus the total.
pub fn log_report(report: &TimingReport) {
    for s in &report.slides {
        tracing::info!(
            slide_index = s.slide_index,
            expected_duration = s.expected_duration,
            actual_audio_duration = s.actual_audio_duration,
            applied_duration = s.applied_duration,
            "slide timing"
        );
    }
    tracing::info!(total_secs = report.total_secs, "timeline total");
}

#[cfg(test)]
#[path = "../tests/unit/telemetry.rs"]
mod tests;
