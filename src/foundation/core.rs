use crate::foundation::error::{SlidecastError, SlidecastResult};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas. Dimensions must be non-zero and even
    /// (yuv420p MP4 output requires even dimensions).
    pub fn new(width: u32, height: u32) -> SlidecastResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlidecastError::config("canvas width/height must be non-zero"));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(SlidecastError::config(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(Self { width, height })
    }

    /// Byte length of one opaque RGBA8 frame at this size.
    pub fn frame_bytes(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Opaque RGB8 color, used for letterbox bars and fade-to-background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// Round a narration length up to the next whole second.
///
/// This is the timeline's rounding policy: always bias toward longer, never
/// shorter, so a slide can never transition away before its narration ends.
pub fn ceil_to_second(secs: f64) -> f64 {
    secs.ceil()
}

/// Convert seconds to a frame count at an integer fps, nearest rounding.
pub fn secs_to_frames(secs: f64, fps: u32) -> u64 {
    round_to_count(secs * f64::from(fps))
}

/// Convert a frame index back to seconds at an integer fps.
pub fn frames_to_secs(frames: u64, fps: u32) -> f64 {
    (frames as f64) / f64::from(fps)
}

/// Convert seconds to a sample-frame count at a sample rate, nearest rounding.
pub fn secs_to_samples(secs: f64, sample_rate: u32) -> u64 {
    round_to_count(secs * f64::from(sample_rate))
}

fn round_to_count(v: f64) -> u64 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.round() as u64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
