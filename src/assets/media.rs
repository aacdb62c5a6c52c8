use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Rgb8},
    foundation::error::{SlidecastError, SlidecastResult},
};

/// Sample rate of the engine's mix bus.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

/// Decoded PCM audio in interleaved `f32` form.
#[derive(Clone, Debug)]
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> u64 {
        if self.channels == 0 {
            return 0;
        }
        (self.interleaved_f32.len() / usize::from(self.channels)) as u64
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (self.frames() as f64) / f64::from(self.sample_rate)
    }
}

/// Probe an audio file's duration in seconds via the system `ffprobe` binary.
pub fn probe_audio_duration(path: &Path) -> SlidecastResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()
        .map_err(|e| SlidecastError::audio_mix(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(SlidecastError::audio_mix(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| SlidecastError::audio_mix(format!("ffprobe json parse failed: {e}")))?;
    let duration = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| {
            SlidecastError::audio_mix(format!(
                "ffprobe reported no duration for '{}'",
                path.display()
            ))
        })?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(SlidecastError::audio_mix(format!(
            "ffprobe reported invalid duration for '{}'",
            path.display()
        )));
    }
    Ok(duration)
}

/// Decode an audio file to interleaved stereo `f32` PCM at `sample_rate`
/// using the system `ffmpeg` binary.
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> SlidecastResult<AudioPcm> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| {
            SlidecastError::audio_mix(format!("failed to run ffmpeg for audio decode: {e}"))
        })?;

    if !out.status.success() {
        return Err(SlidecastError::audio_mix(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    if !out.stdout.len().is_multiple_of(4) {
        return Err(SlidecastError::audio_mix(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let mut pcm = Vec::<f32>::with_capacity(out.stdout.len() / 4);
    for chunk in out.stdout.chunks_exact(4) {
        pcm.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    Ok(AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32: pcm,
    })
}

/// A slide still decoded and letterboxed to the output canvas.
///
/// Pixels are opaque row-major RGBA8 at exactly canvas size.
#[derive(Clone, Debug)]
pub struct PreparedSlideImage {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Opaque RGBA8 pixel bytes, `width * height * 4` long.
    pub rgba8: Vec<u8>,
}

/// Decode a slide image and scale it onto the canvas, preserving aspect
/// ratio and filling the remainder with the background color.
pub fn load_slide_image(
    path: &Path,
    canvas: Canvas,
    background: Rgb8,
) -> SlidecastResult<PreparedSlideImage> {
    let img = image::open(path)
        .with_context(|| format!("decode slide image '{}'", path.display()))?
        .to_rgba8();
    let (src_w, src_h) = img.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(SlidecastError::asset_resolution(format!(
            "slide image '{}' has zero dimensions",
            path.display()
        )));
    }

    // Fit inside the canvas.
    let scale = f64::min(
        f64::from(canvas.width) / f64::from(src_w),
        f64::from(canvas.height) / f64::from(src_h),
    );
    let dst_w = ((f64::from(src_w) * scale).round() as u32)
        .clamp(1, canvas.width);
    let dst_h = ((f64::from(src_h) * scale).round() as u32)
        .clamp(1, canvas.height);

    let scaled = image::imageops::resize(&img, dst_w, dst_h, image::imageops::FilterType::Triangle);

    let mut rgba8 = Vec::with_capacity(canvas.frame_bytes());
    for _ in 0..(canvas.width as usize * canvas.height as usize) {
        rgba8.extend_from_slice(&[background.r, background.g, background.b, 255]);
    }

    let off_x = (canvas.width - dst_w) / 2;
    let off_y = (canvas.height - dst_h) / 2;
    for y in 0..dst_h {
        for x in 0..dst_w {
            let px = scaled.get_pixel(x, y).0;
            let a = u16::from(px[3]);
            let di = (((y + off_y) as usize * canvas.width as usize) + (x + off_x) as usize) * 4;
            // Composite straight alpha over the background color.
            let inv = 255 - a;
            let r = mul_div255(u16::from(px[0]), a) + mul_div255(u16::from(background.r), inv);
            let g = mul_div255(u16::from(px[1]), a) + mul_div255(u16::from(background.g), inv);
            let b = mul_div255(u16::from(px[2]), a) + mul_div255(u16::from(background.b), inv);
            rgba8[di] = r.min(255) as u8;
            rgba8[di + 1] = g.min(255) as u8;
            rgba8[di + 2] = b.min(255) as u8;
            rgba8[di + 3] = 255;
        }
    }

    Ok(PreparedSlideImage {
        width: canvas.width,
        height: canvas.height,
        rgba8,
    })
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
