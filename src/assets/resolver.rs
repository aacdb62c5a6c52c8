use std::collections::HashSet;
use std::path::Path;

use crate::{
    assets::media,
    foundation::error::{SlidecastError, SlidecastResult},
    model::{SlideAssets, SlideSpec, Transition},
};

/// Resolve the external slide asset list into verified [`SlideSpec`]s.
///
/// A missing visual aborts the run; a missing narration file degrades that
/// slide to the configured default duration with a warning. Narration files
/// that exist are probed for their duration here, once, so later stages
/// never touch the filesystem for timing decisions.
#[tracing::instrument(skip(sources, default_transition))]
pub fn resolve_slides(
    sources: &[SlideAssets],
    default_transition: &Transition,
) -> SlidecastResult<Vec<SlideSpec>> {
    let mut seen = HashSet::new();
    for s in sources {
        if !seen.insert(s.index) {
            return Err(SlidecastError::config(format!(
                "duplicate slide index {} in asset list",
                s.index
            )));
        }
    }

    let mut slides = Vec::with_capacity(sources.len());
    for src in sources {
        require_visual(&src.visual, src.index)?;
        if let Some(reveal) = &src.reveal_visual {
            require_visual(reveal, src.index)?;
        }

        let (narration, narration_secs) = match &src.narration {
            Some(path) if path.exists() => {
                let secs = media::probe_audio_duration(path)?;
                (Some(path.clone()), Some(secs))
            }
            Some(path) => {
                tracing::warn!(
                    slide_index = src.index,
                    narration = %path.display(),
                    "narration missing, falling back to default duration"
                );
                (None, None)
            }
            None => (None, None),
        };

        slides.push(SlideSpec {
            index: src.index,
            visual: src.visual.clone(),
            narration,
            narration_secs,
            reveal_visual: src.reveal_visual.clone(),
            role: src.role,
            transition_in: src.transition_in.unwrap_or(*default_transition),
            transition_out: src.transition_out.unwrap_or(*default_transition),
        });
    }

    tracing::info!(slides = slides.len(), "resolved slide assets");
    Ok(slides)
}

fn require_visual(path: &Path, index: u32) -> SlidecastResult<()> {
    if !path.is_file() {
        return Err(SlidecastError::asset_resolution(format!(
            "slide {index}: visual asset '{}' not found",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
