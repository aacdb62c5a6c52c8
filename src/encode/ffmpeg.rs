use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    foundation::error::{SlidecastError, SlidecastResult},
    render::frame::FrameRGBA,
};

/// Raw PCM audio handed to ffmpeg as a second input.
#[derive(Clone, Debug)]
pub struct AudioInput {
    /// Path to interleaved `f32le` PCM data.
    pub path: PathBuf,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
}

/// Encoder configuration for one export.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames per second.
    pub fps: u32,
    /// Video codec passed to ffmpeg (`libx264` by default upstream).
    pub codec: String,
    /// Optional video bitrate, e.g. `"4M"`.
    pub video_bitrate: Option<String>,
    /// Output file path.
    pub out_path: PathBuf,
    /// Whether to overwrite an existing output file.
    pub overwrite: bool,
    /// Optional mixed audio input.
    pub audio: Option<AudioInput>,
}

impl EncodeConfig {
    /// Validate encoder parameters before spawning ffmpeg.
    pub fn validate(&self) -> SlidecastResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SlidecastError::render("encode width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // Default settings target yuv420p output for maximum compatibility.
            return Err(SlidecastError::render(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.fps == 0 {
            return Err(SlidecastError::render("encode fps must be non-zero"));
        }
        if self.codec.trim().is_empty() {
            return Err(SlidecastError::render("encode codec must be non-empty"));
        }
        if let Some(audio) = &self.audio {
            if audio.sample_rate == 0 {
                return Err(SlidecastError::render(
                    "audio sample_rate must be non-zero when audio is enabled",
                ));
            }
            if audio.channels == 0 {
                return Err(SlidecastError::render(
                    "audio channels must be non-zero when audio is enabled",
                ));
            }
        }
        Ok(())
    }
}

/// Whether the system `ffmpeg` binary is available.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> SlidecastResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streaming MP4 encoder backed by the system `ffmpeg` binary.
///
/// Frames are piped as raw opaque RGBA8 to ffmpeg's stdin; the mixed audio
/// rides along as a raw `f32le` file input and is encoded to AAC. The
/// system binary is used rather than native FFmpeg bindings to avoid
/// dev header/lib requirements.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    frames_written: u64,
}

impl FfmpegEncoder {
    /// Spawn ffmpeg for this export.
    pub fn new(cfg: EncodeConfig) -> SlidecastResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(SlidecastError::render(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SlidecastError::render(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
        ]);

        if let Some(audio) = &cfg.audio {
            cmd.args([
                "-f",
                "f32le",
                "-ar",
                &audio.sample_rate.to_string(),
                "-ac",
                &audio.channels.to_string(),
                "-i",
            ])
            .arg(&audio.path)
            .args(["-c:v", &cfg.codec]);
            if let Some(bitrate) = &cfg.video_bitrate {
                cmd.args(["-b:v", bitrate]);
            }
            cmd.args([
                "-pix_fmt",
                "yuv420p",
                "-c:a",
                "aac",
                "-shortest",
                "-movflags",
                "+faststart",
            ]);
        } else {
            cmd.args(["-an", "-c:v", &cfg.codec]);
            if let Some(bitrate) = &cfg.video_bitrate {
                cmd.args(["-b:v", bitrate]);
            }
            cmd.args(["-pix_fmt", "yuv420p", "-movflags", "+faststart"]);
        }
        cmd.arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            SlidecastError::render(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SlidecastError::render("failed to open ffmpeg stdin (unexpected)"))?;

        Ok(Self {
            cfg,
            child,
            stdin: Some(stdin),
            frames_written: 0,
        })
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Stream one frame to ffmpeg. Frames must arrive in timeline order.
    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> SlidecastResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(SlidecastError::render(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        let expected = self.cfg.width as usize * self.cfg.height as usize * 4;
        if frame.data.len() != expected {
            return Err(SlidecastError::render(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SlidecastError::render("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            SlidecastError::render(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames_written += 1;
        Ok(())
    }

    /// Close the stream and wait for ffmpeg to finish the container.
    pub fn finish(mut self) -> SlidecastResult<()> {
        drop(self.stdin.take());

        let output = self.child.wait_with_output().map_err(|e| {
            SlidecastError::render(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SlidecastError::render(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
