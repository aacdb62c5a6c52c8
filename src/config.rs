use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::core::Canvas,
    foundation::core::Rgb8,
    foundation::error::{SlidecastError, SlidecastResult},
    model::Transition,
};

/// Duration derivation policy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingConfig {
    /// Seconds added after narration ends (reading/reaction time).
    #[serde(default = "default_additional_secs")]
    pub additional_secs: f64,
    /// Duration used for slides without narration.
    #[serde(default = "default_default_secs")]
    pub default_secs: f64,
    /// Lower clamp for computed durations.
    #[serde(default = "default_min_secs")]
    pub min_secs: f64,
    /// Upper clamp for computed durations. Narration itself is never
    /// truncated by this clamp; only the padding is.
    #[serde(default = "default_max_secs")]
    pub max_secs: f64,
}

fn default_additional_secs() -> f64 {
    3.0
}
fn default_default_secs() -> f64 {
    6.0
}
fn default_min_secs() -> f64 {
    2.0
}
fn default_max_secs() -> f64 {
    60.0
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            additional_secs: default_additional_secs(),
            default_secs: default_default_secs(),
            min_secs: default_min_secs(),
            max_secs: default_max_secs(),
        }
    }
}

/// Background music bed configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MusicConfig {
    /// Path to the music source file.
    pub source: PathBuf,
    /// Music gain under narration, 0.0–1.0. Narration is never attenuated.
    #[serde(default = "default_music_volume")]
    pub target_volume: f64,
    /// Fade-in applied at the start of the final bed.
    #[serde(default = "default_music_fade_in")]
    pub fade_in_secs: f64,
    /// Fade-out applied over the final seconds of the bed.
    #[serde(default = "default_music_fade_out")]
    pub fade_out_secs: f64,
}

fn default_music_volume() -> f64 {
    0.1
}
fn default_music_fade_in() -> f64 {
    2.0
}
fn default_music_fade_out() -> f64 {
    3.0
}

/// A fixed-duration start or end slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BookendConfig {
    /// Path to the slide's still image.
    pub visual: PathBuf,
    /// Fixed on-screen duration, not derived from narration.
    pub duration_secs: f64,
}

/// Output encoding parameters. Immutable once rendering begins.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Output width in pixels (must be even).
    #[serde(default = "default_width")]
    pub width: u32,
    /// Output height in pixels (must be even).
    #[serde(default = "default_height")]
    pub height: u32,
    /// Output frames per second.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Video codec passed to ffmpeg.
    #[serde(default = "default_codec")]
    pub codec: String,
    /// Optional video bitrate, e.g. `"4M"`.
    #[serde(default)]
    pub video_bitrate: Option<String>,
    /// Background color for letterbox bars and fades.
    #[serde(default)]
    pub background: Rgb8,
}

fn default_width() -> u32 {
    1920
}
fn default_height() -> u32 {
    1080
}
fn default_fps() -> u32 {
    30
}
fn default_codec() -> String {
    "libx264".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            codec: default_codec(),
            video_bitrate: None,
            background: Rgb8::default(),
        }
    }
}

impl RenderConfig {
    /// The output canvas, validated.
    pub fn canvas(&self) -> SlidecastResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

/// Full engine configuration for one assembly run.
///
/// Loaded once from a JSON document and validated up front; components
/// receive it by reference and never read ambient global state.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Duration derivation policy.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Transition applied between slides that carry no per-slide override.
    /// Defaults to a hard cut.
    #[serde(default)]
    pub default_transition: Transition,
    /// Optional fixed-duration opening slide.
    #[serde(default)]
    pub start_slide: Option<BookendConfig>,
    /// Optional fixed-duration closing slide.
    #[serde(default)]
    pub end_slide: Option<BookendConfig>,
    /// Optional background music bed.
    #[serde(default)]
    pub music: Option<MusicConfig>,
    /// Output encoding parameters.
    #[serde(default)]
    pub render: RenderConfig,
}

impl EngineConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_path(path: &Path) -> SlidecastResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            SlidecastError::config(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every field and report all problems together in one error,
    /// rather than failing field-by-field deep inside a render loop.
    pub fn validate(&self) -> SlidecastResult<()> {
        let mut faults = Vec::new();

        let t = &self.timing;
        if !t.additional_secs.is_finite() || t.additional_secs < 0.0 {
            faults.push("timing.additional_secs must be finite and >= 0".to_string());
        }
        if !t.default_secs.is_finite() || t.default_secs <= 0.0 {
            faults.push("timing.default_secs must be finite and > 0".to_string());
        }
        if !t.min_secs.is_finite() || t.min_secs <= 0.0 {
            faults.push("timing.min_secs must be finite and > 0".to_string());
        }
        if !t.max_secs.is_finite() || t.max_secs < t.min_secs {
            faults.push("timing.max_secs must be finite and >= timing.min_secs".to_string());
        }

        validate_transition(&self.default_transition, "default_transition", &mut faults);

        for (label, bookend) in [("start_slide", &self.start_slide), ("end_slide", &self.end_slide)]
        {
            if let Some(b) = bookend
                && (!b.duration_secs.is_finite() || b.duration_secs <= 0.0)
            {
                faults.push(format!("{label}.duration_secs must be finite and > 0"));
            }
        }

        if let Some(m) = &self.music {
            if !(0.0..=1.0).contains(&m.target_volume) {
                faults.push("music.target_volume must be within 0.0..=1.0".to_string());
            }
            if !m.fade_in_secs.is_finite() || m.fade_in_secs < 0.0 {
                faults.push("music.fade_in_secs must be finite and >= 0".to_string());
            }
            if !m.fade_out_secs.is_finite() || m.fade_out_secs < 0.0 {
                faults.push("music.fade_out_secs must be finite and >= 0".to_string());
            }
        }

        let r = &self.render;
        if r.width == 0 || r.height == 0 {
            faults.push("render.width/height must be non-zero".to_string());
        } else if !r.width.is_multiple_of(2) || !r.height.is_multiple_of(2) {
            faults.push("render.width/height must be even (yuv420p output)".to_string());
        }
        if r.fps == 0 {
            faults.push("render.fps must be non-zero".to_string());
        }
        if r.codec.trim().is_empty() {
            faults.push("render.codec must be non-empty".to_string());
        }

        if faults.is_empty() {
            Ok(())
        } else {
            Err(SlidecastError::config(faults.join("; ")))
        }
    }
}

fn validate_transition(tr: &Transition, label: &str, faults: &mut Vec<String>) {
    if !tr.duration_secs.is_finite() || tr.duration_secs < 0.0 {
        faults.push(format!("{label}.duration_secs must be finite and >= 0"));
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
