//! Slidecast is a narrated-slide timeline assembly engine.
//!
//! Given an ordered list of slide images with optional narration clips, it
//! derives each slide's on-screen duration from its narration length,
//! assembles a transition-aware timeline, mixes narration over a looped and
//! faded background-music bed, and renders/muxes a single MP4 through the
//! system `ffmpeg` binary.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `[SlideAssets] -> [SlideSpec]` (verify visuals, probe narration)
//! 2. **Build**: `[SlideSpec] -> Timeline` (durations, offsets, transition overlaps)
//! 3. **Mix**: `Timeline -> MixedAudio` (narration sub-mix + music bed, sample-exact)
//! 4. **Render**: `Timeline + MixedAudio -> MP4` (per-frame compositing, ffmpeg encode)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Never truncate speech**: durations round up from narration length and
//!   the mixer pads with silence rather than cutting audio.
//! - **Deterministic timelines**: identical inputs and configuration produce
//!   identical entry sequences.
//! - **No ambient state**: configuration is loaded and validated once per
//!   run and passed explicitly into each stage.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod audio;
mod config;
mod encode;
mod foundation;
mod model;
mod pipeline;
mod render;
mod telemetry;
mod timeline;

pub use assets::media::{
    AudioPcm, MIX_SAMPLE_RATE, PreparedSlideImage, decode_audio_f32_stereo, load_slide_image,
    probe_audio_duration,
};
pub use assets::resolver::resolve_slides;
pub use audio::mix::{MixedAudio, mix_timeline, write_mix_to_f32le_file};
pub use config::{BookendConfig, EngineConfig, MusicConfig, RenderConfig, TimingConfig};
pub use encode::ffmpeg::{
    AudioInput, EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use foundation::core::{
    Canvas, Rgb8, ceil_to_second, frames_to_secs, secs_to_frames, secs_to_samples,
};
pub use foundation::error::{SlidecastError, SlidecastResult};
pub use model::{
    SlideAssets, SlideRole, SlideSpec, Timeline, TimelineEntry, Transition, TransitionKind,
    WipeDir,
};
pub use pipeline::{AssembleOutput, assemble, plan_timeline};
pub use render::frame::{FrameRGBA, compose_frame};
pub use render::pipeline::{RenderStats, prepare_slide_images, render_video};
pub use telemetry::{SlideTiming, TimingReport, log_report, timing_report};
pub use timeline::builder::build_timeline;
pub use timeline::duration::{compute_duration, reveal_delay};
