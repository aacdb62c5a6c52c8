use crate::{
    config::{BookendConfig, EngineConfig},
    foundation::error::{SlidecastError, SlidecastResult},
    model::{SlideRole, SlideSpec, Timeline, TimelineEntry},
    timeline::duration::{compute_duration, reveal_delay},
};

/// Assemble resolved slides into the canonical timeline.
///
/// Prepends/appends the configured start and end slides (fixed durations,
/// not narration-derived), computes each entry's absolute start offset as
/// the cumulative sum of prior durations minus cumulative transition
/// overlaps, and validates the result before returning it.
#[tracing::instrument(skip(slides, config))]
pub fn build_timeline(slides: &[SlideSpec], config: &EngineConfig) -> SlidecastResult<Timeline> {
    let mut ordered: Vec<(SlideSpec, f64)> = Vec::with_capacity(slides.len() + 2);

    if let Some(start) = &config.start_slide {
        ordered.push((bookend_spec(start, SlideRole::Start, config), start.duration_secs));
    }
    for slide in slides {
        let duration = compute_duration(slide, &config.timing);
        ordered.push((slide.clone(), duration));
    }
    if let Some(end) = &config.end_slide {
        ordered.push((bookend_spec(end, SlideRole::End, config), end.duration_secs));
    }

    if ordered.is_empty() {
        return Err(SlidecastError::timeline("timeline has no slides"));
    }

    let mut entries = Vec::with_capacity(ordered.len());
    let mut offset = 0.0f64;
    for (i, (slide, duration)) in ordered.into_iter().enumerate() {
        // The incoming transition of entry i defines the overlap with i-1.
        let overlap = if i > 0 { slide.transition_in.overlap_secs() } else { 0.0 };
        if i > 0 {
            offset -= overlap;
        }

        let reveal_at = reveal_delay(&slide);
        tracing::info!(
            slide_index = slide.index,
            expected_duration = duration,
            actual_audio_duration = slide.narration_secs,
            applied_duration = duration,
            start_offset = offset,
            "timeline entry"
        );
        entries.push(TimelineEntry {
            slide,
            start_offset_secs: offset,
            duration_secs: duration,
            reveal_at_secs: reveal_at,
        });
        offset += duration;
    }

    let timeline = Timeline {
        total_secs: offset,
        entries,
    };
    validate(&timeline)?;
    tracing::info!(
        entries = timeline.entries.len(),
        total_secs = timeline.total_secs,
        "timeline built"
    );
    Ok(timeline)
}

fn bookend_spec(bookend: &BookendConfig, role: SlideRole, config: &EngineConfig) -> SlideSpec {
    let index = match role {
        SlideRole::Start => u32::MIN,
        _ => u32::MAX,
    };
    SlideSpec {
        index,
        visual: bookend.visual.clone(),
        narration: None,
        narration_secs: None,
        reveal_visual: None,
        role,
        transition_in: config.default_transition,
        transition_out: config.default_transition,
    }
}

fn validate(timeline: &Timeline) -> SlidecastResult<()> {
    if !(timeline.total_secs.is_finite() && timeline.total_secs > 0.0) {
        return Err(SlidecastError::timeline(format!(
            "total timeline duration must be positive, got {}",
            timeline.total_secs
        )));
    }

    let mut prev_offset = f64::NEG_INFINITY;
    for (i, entry) in timeline.entries.iter().enumerate() {
        let duration = entry.duration_secs;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SlidecastError::timeline(format!(
                "slide {}: duration must be positive, got {duration}",
                entry.slide.index
            )));
        }
        for (label, tr) in [
            ("transition_in", &entry.slide.transition_in),
            ("transition_out", &entry.slide.transition_out),
        ] {
            if tr.effect_secs() >= duration {
                return Err(SlidecastError::timeline(format!(
                    "slide {}: {label} duration {} must be below slide duration {duration}",
                    entry.slide.index, tr.duration_secs
                )));
            }
        }
        if i > 0 {
            let prev = &timeline.entries[i - 1];
            let overlap = entry.slide.transition_in.overlap_secs();
            if overlap >= prev.duration_secs {
                return Err(SlidecastError::timeline(format!(
                    "slide {}: transition overlap {overlap} exceeds previous slide duration {}",
                    entry.slide.index, prev.duration_secs
                )));
            }
        }
        if entry.start_offset_secs <= prev_offset {
            return Err(SlidecastError::timeline(format!(
                "slide {}: start offsets must be strictly increasing",
                entry.slide.index
            )));
        }
        prev_offset = entry.start_offset_secs;
    }

    let last = timeline
        .entries
        .last()
        .ok_or_else(|| SlidecastError::timeline("timeline has no entries"))?;
    let computed_total = last.end_secs();
    if (computed_total - timeline.total_secs).abs() > 1e-9 {
        return Err(SlidecastError::timeline(format!(
            "total duration {} does not match last entry end {computed_total}",
            timeline.total_secs
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
