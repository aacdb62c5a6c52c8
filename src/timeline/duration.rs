use crate::{config::TimingConfig, foundation::core::ceil_to_second, model::SlideSpec};

/// Derive a slide's on-screen duration from its narration length.
///
/// With narration: `ceil(narration) + additional_secs`, clamped to
/// `[min_secs, max_secs]`. Rounding always biases toward longer, so a
/// slide never transitions away before its audio finishes.
///
/// Without narration: `default_secs`, clamped the same way.
///
/// The `max_secs` clamp limits only the padding: when narration alone
/// exceeds `max_secs`, the duration yields upward to `ceil(narration)`
/// and a drift warning is logged, rather than truncating speech.
pub fn compute_duration(slide: &SlideSpec, timing: &TimingConfig) -> f64 {
    match slide.narration_secs {
        Some(len) => {
            let padded = ceil_to_second(len) + timing.additional_secs;
            let mut applied = padded.clamp(timing.min_secs, timing.max_secs);
            if applied < len {
                tracing::warn!(
                    slide_index = slide.index,
                    narration_secs = len,
                    max_secs = timing.max_secs,
                    "narration exceeds max duration, yielding clamp to avoid truncating speech"
                );
                applied = ceil_to_second(len);
            }
            applied
        }
        None => timing.default_secs.clamp(timing.min_secs, timing.max_secs),
    }
}

/// Delay from slide start to the reveal visual switch.
///
/// Anchored to the *end* of narration (raw length, not the rounded
/// duration), so a reveal never fires before the narration describing it
/// has finished, independent of padding added afterwards.
pub fn reveal_delay(slide: &SlideSpec) -> Option<f64> {
    slide.reveal_visual.as_ref()?;
    Some(slide.narration_secs.unwrap_or(0.0))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/duration.rs"]
mod tests;
