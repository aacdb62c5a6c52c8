use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{
    assets::media::PreparedSlideImage,
    foundation::core::{Canvas, Rgb8},
    foundation::error::{SlidecastError, SlidecastResult},
    model::{Timeline, TimelineEntry, TransitionKind, WipeDir},
};

/// One rendered output frame: opaque row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

/// Compose the output frame at `frame_idx`.
///
/// During a crossfade/wipe overlap window the incoming entry owns the time
/// slot and blends with the outgoing entry's tail. `Fade` transitions blend
/// with the background inside the entry's own head or tail. Reveal visuals
/// switch in at the entry's reveal anchor.
pub fn compose_frame(
    timeline: &Timeline,
    prepared: &HashMap<PathBuf, PreparedSlideImage>,
    canvas: Canvas,
    background: Rgb8,
    frame_idx: u64,
    fps: u32,
) -> SlidecastResult<FrameRGBA> {
    let t = (frame_idx as f64) / f64::from(fps);
    let idx = timeline
        .entry_index_at(t)
        .unwrap_or(timeline.entries.len().saturating_sub(1));
    let entry = timeline
        .entries
        .get(idx)
        .ok_or_else(|| SlidecastError::render("timeline has no entries to render"))?;
    let local_t = t - entry.start_offset_secs;

    let cur = prepared_image(prepared, visual_at(entry, local_t))?;
    let mut data = cur.rgba8.clone();

    let overlap = entry.slide.transition_in.overlap_secs();
    if idx > 0 && overlap > 0.0 && local_t < overlap {
        let prev = &timeline.entries[idx - 1];
        let prev_local = t - prev.start_offset_secs;
        let prev_img = prepared_image(prepared, visual_at(prev, prev_local))?;
        let progress = (local_t / overlap).clamp(0.0, 1.0);
        match entry.slide.transition_in.kind {
            TransitionKind::Crossfade => {
                blend_frames(&mut data, &prev_img.rgba8, 1.0 - progress as f32);
            }
            TransitionKind::Wipe { dir } => {
                wipe_frames(&mut data, &prev_img.rgba8, canvas, dir, progress);
            }
            TransitionKind::None | TransitionKind::Fade => {}
        }
    } else {
        apply_edge_fades(&mut data, entry, local_t, background);
    }

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data,
    })
}

fn visual_at(entry: &TimelineEntry, local_t: f64) -> &Path {
    if let (Some(reveal_at), Some(reveal)) = (entry.reveal_at_secs, &entry.slide.reveal_visual)
        && local_t >= reveal_at
    {
        return reveal;
    }
    &entry.slide.visual
}

fn prepared_image<'a>(
    prepared: &'a HashMap<PathBuf, PreparedSlideImage>,
    path: &Path,
) -> SlidecastResult<&'a PreparedSlideImage> {
    prepared.get(path).ok_or_else(|| {
        SlidecastError::render(format!("slide image '{}' was not prepared", path.display()))
    })
}

fn apply_edge_fades(data: &mut [u8], entry: &TimelineEntry, local_t: f64, background: Rgb8) {
    let tr_in = &entry.slide.transition_in;
    if tr_in.kind == TransitionKind::Fade && local_t < tr_in.duration_secs {
        let visible = (local_t / tr_in.duration_secs).clamp(0.0, 1.0) as f32;
        fade_to_background(data, background, visible);
        return;
    }

    let tr_out = &entry.slide.transition_out;
    let remaining = entry.duration_secs - local_t;
    if tr_out.kind == TransitionKind::Fade && remaining < tr_out.duration_secs {
        let visible = (remaining / tr_out.duration_secs).clamp(0.0, 1.0) as f32;
        fade_to_background(data, background, visible);
    }
}

/// Linear blend of `other` into `data` with weight `other_weight`.
fn blend_frames(data: &mut [u8], other: &[u8], other_weight: f32) {
    let w = other_weight.clamp(0.0, 1.0);
    for (d, o) in data.iter_mut().zip(other.iter()) {
        *d = lerp_u8(*d, *o, w);
    }
}

/// Blend `data` toward the background color; `visible` 1.0 keeps the slide.
fn fade_to_background(data: &mut [u8], background: Rgb8, visible: f32) {
    let w = 1.0 - visible.clamp(0.0, 1.0);
    let bg = [background.r, background.g, background.b, 255];
    for (i, d) in data.iter_mut().enumerate() {
        *d = lerp_u8(*d, bg[i % 4], w);
    }
}

/// Reveal the incoming frame (already in `data`) behind a sweeping edge;
/// pixels the sweep has not reached yet show the outgoing frame.
fn wipe_frames(data: &mut [u8], prev: &[u8], canvas: Canvas, dir: WipeDir, progress: f64) {
    let width = canvas.width as usize;
    let height = canvas.height as usize;
    for y in 0..height {
        for x in 0..width {
            let covered = match dir {
                WipeDir::LeftToRight => (x as f64) < progress * (width as f64),
                WipeDir::RightToLeft => (x as f64) >= (1.0 - progress) * (width as f64),
                WipeDir::TopToBottom => (y as f64) < progress * (height as f64),
                WipeDir::BottomToTop => (y as f64) >= (1.0 - progress) * (height as f64),
            };
            if !covered {
                let i = (y * width + x) * 4;
                data[i..i + 4].copy_from_slice(&prev[i..i + 4]);
            }
        }
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
