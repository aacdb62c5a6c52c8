use std::path::Path;

use crate::{
    assets::media::{self, AudioPcm},
    config::MusicConfig,
    foundation::core::secs_to_samples,
    foundation::error::{SlidecastError, SlidecastResult},
    model::Timeline,
};

/// The fully mixed program audio: narration sub-mix layered over the
/// background music bed, sample-exact to the timeline total.
#[derive(Clone, Debug)]
pub struct MixedAudio {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count (always 2).
    pub channels: u16,
    /// Interleaved stereo samples, exactly `total_frames * 2` long.
    pub interleaved_f32: Vec<f32>,
}

impl MixedAudio {
    /// Number of sample frames.
    pub fn frames(&self) -> u64 {
        (self.interleaved_f32.len() / usize::from(self.channels)) as u64
    }
}

/// Mix the timeline's narration clips and the optional music bed into one
/// stereo track whose length equals the timeline total exactly.
#[tracing::instrument(skip(timeline, music))]
pub fn mix_timeline(
    timeline: &Timeline,
    music: Option<&MusicConfig>,
    sample_rate: u32,
) -> SlidecastResult<MixedAudio> {
    let total_frames = secs_to_samples(timeline.total_secs, sample_rate);
    if total_frames == 0 {
        return Err(SlidecastError::audio_mix(
            "mix target duration must be non-empty",
        ));
    }
    let mut out = vec![0.0f32; (total_frames as usize) * 2];

    for entry in &timeline.entries {
        let Some(narration) = &entry.slide.narration else {
            continue;
        };
        let pcm = media::decode_audio_f32_stereo(narration, sample_rate)?;
        let slot_start = secs_to_samples(entry.start_offset_secs, sample_rate);
        let slot_frames = secs_to_samples(entry.duration_secs, sample_rate);
        let spilled = add_narration(&mut out, &pcm, slot_start, slot_frames);
        if spilled {
            tracing::warn!(
                slide_index = entry.slide.index,
                narration_secs = pcm.duration_secs(),
                slot_secs = entry.duration_secs,
                "narration longer than slide duration, spilling past slot instead of truncating"
            );
        }
    }

    if let Some(music) = music {
        let src = media::decode_audio_f32_stereo(&music.source, sample_rate)?;
        if src.frames() == 0 {
            return Err(SlidecastError::audio_mix(format!(
                "music source '{}' contains no audio",
                music.source.display()
            )));
        }
        let bed = build_music_bed(&src, total_frames, music, sample_rate);
        for (o, b) in out.iter_mut().zip(bed.iter()) {
            *o += *b;
        }
    }

    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }

    tracing::info!(
        total_frames,
        total_secs = timeline.total_secs,
        "mixed program audio"
    );
    Ok(MixedAudio {
        sample_rate,
        channels: 2,
        interleaved_f32: out,
    })
}

/// Add one narration clip into the mix at its slot start.
///
/// The slot's remainder past the narration stays silent; narration longer
/// than the slot is written past the slot boundary rather than truncated
/// (only the absolute end of the track bounds it). Returns whether the
/// clip spilled past its slot.
pub(crate) fn add_narration(
    out: &mut [f32],
    pcm: &AudioPcm,
    slot_start: u64,
    slot_frames: u64,
) -> bool {
    let total_frames = (out.len() / 2) as u64;
    let src_frames = pcm.frames();
    let writable = total_frames.saturating_sub(slot_start).min(src_frames);

    for frame in 0..writable {
        let dst = ((slot_start + frame) as usize) * 2;
        let src = (frame as usize) * usize::from(pcm.channels);
        let (l, r) = if pcm.channels == 1 {
            let v = pcm.interleaved_f32[src];
            (v, v)
        } else {
            (pcm.interleaved_f32[src], pcm.interleaved_f32[src + 1])
        };
        out[dst] += l;
        out[dst + 1] += r;
    }

    src_frames > slot_frames
}

/// Build the background bed at exactly `total_frames` frames.
///
/// A source shorter than the program is looped by whole copies until it
/// covers the program, then trimmed to the exact length; a longer source is
/// subclipped from offset zero. Fade-in/fade-out and the target volume are
/// applied to the final trimmed bed, never to the raw source.
pub(crate) fn build_music_bed(
    src: &AudioPcm,
    total_frames: u64,
    music: &MusicConfig,
    sample_rate: u32,
) -> Vec<f32> {
    let src_frames = src.frames();
    let mut bed = Vec::with_capacity((total_frames as usize) * 2);

    for frame in 0..total_frames {
        let sf = (frame % src_frames) as usize;
        let si = sf * usize::from(src.channels);
        let (l, r) = if src.channels == 1 {
            let v = src.interleaved_f32[si];
            (v, v)
        } else {
            (src.interleaved_f32[si], src.interleaved_f32[si + 1])
        };
        let gain = bed_gain(frame, total_frames, music, sample_rate) * music.target_volume as f32;
        bed.push(l * gain);
        bed.push(r * gain);
    }

    bed
}

/// Fade envelope of the final bed at `frame`.
fn bed_gain(frame: u64, total_frames: u64, music: &MusicConfig, sample_rate: u32) -> f32 {
    let mut gain = 1.0f32;
    let fade_in_frames = secs_to_samples(music.fade_in_secs, sample_rate);
    if fade_in_frames > 0 && frame < fade_in_frames {
        gain *= (frame as f32) / (fade_in_frames as f32);
    }
    let fade_out_frames = secs_to_samples(music.fade_out_secs, sample_rate);
    let remaining = total_frames.saturating_sub(frame);
    if fade_out_frames > 0 && remaining < fade_out_frames {
        gain *= (remaining as f32) / (fade_out_frames as f32);
    }
    gain
}

/// Write interleaved samples as raw little-endian `f32` bytes, the format
/// the encoder hands to ffmpeg as its audio input.
pub fn write_mix_to_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> SlidecastResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SlidecastError::audio_mix(format!(
                "failed to create audio mix output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        SlidecastError::audio_mix(format!(
            "failed to write mixed audio file '{}': {e}",
            out_path.display()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
