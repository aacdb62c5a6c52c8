use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    assets::media::{MIX_SAMPLE_RATE, PreparedSlideImage, load_slide_image},
    audio::mix::{MixedAudio, write_mix_to_f32le_file},
    config::RenderConfig,
    encode::ffmpeg::{AudioInput, EncodeConfig, FfmpegEncoder},
    foundation::core::{Canvas, Rgb8, secs_to_frames},
    foundation::error::{SlidecastError, SlidecastResult},
    model::Timeline,
    render::frame::compose_frame,
};

/// Aggregated rendering counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames written to the encoder.
    pub frames_total: u64,
    /// Distinct slide images prepared.
    pub images_prepared: u64,
}

/// Decode and letterbox every distinct slide image in the timeline.
///
/// Each image is independent and write-once to its own map slot, so the
/// work runs on the rayon pool and joins before the frame loop starts.
#[tracing::instrument(skip(timeline))]
pub fn prepare_slide_images(
    timeline: &Timeline,
    canvas: Canvas,
    background: Rgb8,
) -> SlidecastResult<HashMap<PathBuf, PreparedSlideImage>> {
    let mut paths: Vec<&PathBuf> = Vec::new();
    for entry in &timeline.entries {
        paths.push(&entry.slide.visual);
        if let Some(reveal) = &entry.slide.reveal_visual {
            paths.push(reveal);
        }
    }
    paths.sort();
    paths.dedup();

    let prepared: Vec<(PathBuf, PreparedSlideImage)> = paths
        .par_iter()
        .map(|path| {
            let img = load_slide_image(path, canvas, background)?;
            Ok(((*path).clone(), img))
        })
        .collect::<SlidecastResult<_>>()?;

    tracing::info!(images = prepared.len(), "prepared slide images");
    Ok(prepared.into_iter().collect())
}

/// Render the timeline to an MP4 at `out_path`, muxing the mixed audio.
///
/// The export writes to a temporary sibling path and renames on success, so
/// a failed run never leaves a partial file at the final path.
#[tracing::instrument(skip(timeline, mixed))]
pub fn render_video(
    timeline: &Timeline,
    mixed: &MixedAudio,
    cfg: &RenderConfig,
    out_path: &Path,
) -> SlidecastResult<RenderStats> {
    let canvas = cfg.canvas()?;
    let prepared = prepare_slide_images(timeline, canvas, cfg.background)?;

    let mut audio_tmp = TempFileGuard(None);
    let audio_path = temp_sibling(out_path, "f32le");
    write_mix_to_f32le_file(&mixed.interleaved_f32, &audio_path)?;
    audio_tmp.0 = Some(audio_path.clone());

    let mut video_tmp = TempFileGuard(None);
    let part_path = temp_sibling(out_path, "part.mp4");
    video_tmp.0 = Some(part_path.clone());

    let mut encoder = FfmpegEncoder::new(EncodeConfig {
        width: canvas.width,
        height: canvas.height,
        fps: cfg.fps,
        codec: cfg.codec.clone(),
        video_bitrate: cfg.video_bitrate.clone(),
        out_path: part_path.clone(),
        overwrite: true,
        audio: Some(AudioInput {
            path: audio_path,
            sample_rate: MIX_SAMPLE_RATE,
            channels: mixed.channels,
        }),
    })?;

    let total_frames = secs_to_frames(timeline.total_secs, cfg.fps);
    for frame_idx in 0..total_frames {
        let frame = compose_frame(
            timeline,
            &prepared,
            canvas,
            cfg.background,
            frame_idx,
            cfg.fps,
        )?;
        encoder.encode_frame(&frame)?;
    }
    let frames_total = encoder.frames_written();
    encoder.finish()?;

    std::fs::rename(&part_path, out_path).map_err(|e| {
        SlidecastError::render(format!(
            "failed to move finished video into place at '{}': {e}",
            out_path.display()
        ))
    })?;
    video_tmp.0 = None;

    let stats = RenderStats {
        frames_total,
        images_prepared: prepared.len() as u64,
    };
    tracing::info!(
        frames = stats.frames_total,
        total_secs = timeline.total_secs,
        out = %out_path.display(),
        "rendered video"
    );
    Ok(stats)
}

fn temp_sibling(out_path: &Path, suffix: &str) -> PathBuf {
    let stem = out_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    out_path.with_file_name(format!(".{stem}.{}.{suffix}", std::process::id()))
}

/// Removes the held path on drop unless disarmed.
struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
