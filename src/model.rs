use std::path::PathBuf;

/// Position of a slide within the assembled program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideRole {
    /// Fixed-duration opening slide (no narration-derived timing).
    Start,
    /// Regular narrated content slide.
    #[default]
    Content,
    /// Fixed-duration closing slide.
    End,
}

/// Direction of a wipe transition sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WipeDir {
    /// Sweep from the left edge to the right.
    LeftToRight,
    /// Sweep from the right edge to the left.
    RightToLeft,
    /// Sweep from the top edge down.
    TopToBottom,
    /// Sweep from the bottom edge up.
    BottomToTop,
}

/// How a slide enters or leaves the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TransitionKind {
    /// Hard cut. The default when no transition is configured.
    #[default]
    None,
    /// Fade from/to the background color within the clip's own duration.
    Fade,
    /// Blend with the adjacent clip over a shared overlap window.
    Crossfade,
    /// Sweep a mask over the adjacent clip during the overlap window.
    Wipe {
        /// Sweep direction.
        dir: WipeDir,
    },
}

/// A transition spec: kind plus its duration in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    /// Transition kind.
    #[serde(flatten)]
    pub kind: TransitionKind,
    /// Transition duration in seconds. Ignored for `None`.
    #[serde(default)]
    pub duration_secs: f64,
}

impl Default for Transition {
    fn default() -> Self {
        Self::none()
    }
}

impl Transition {
    /// Hard cut.
    pub fn none() -> Self {
        Self {
            kind: TransitionKind::None,
            duration_secs: 0.0,
        }
    }

    /// Seconds this transition overlaps the adjacent clip.
    ///
    /// Only `Crossfade` and `Wipe` overlap; `Fade` plays out inside its own
    /// clip and `None` cuts instantly, so both contribute zero overlap.
    pub fn overlap_secs(&self) -> f64 {
        match self.kind {
            TransitionKind::Crossfade | TransitionKind::Wipe { .. } => self.duration_secs,
            TransitionKind::None | TransitionKind::Fade => 0.0,
        }
    }

    /// Effective on-screen duration of the effect itself.
    pub fn effect_secs(&self) -> f64 {
        match self.kind {
            TransitionKind::None => 0.0,
            _ => self.duration_secs,
        }
    }
}

/// One row of the external slide asset list, as provided by the collaborator
/// that rendered slide images and synthesized narration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideAssets {
    /// Ordinal position; insertion order is playback order.
    pub index: u32,
    /// Path to the slide's still image.
    pub visual: PathBuf,
    /// Optional path to the slide's narration clip.
    #[serde(default)]
    pub narration: Option<PathBuf>,
    /// Optional secondary visual revealed after narration finishes
    /// (e.g. an answer highlight).
    #[serde(default)]
    pub reveal_visual: Option<PathBuf>,
    /// Role within the program.
    #[serde(default)]
    pub role: SlideRole,
    /// Per-slide override for the inbound transition.
    #[serde(default)]
    pub transition_in: Option<Transition>,
    /// Per-slide override for the outbound transition.
    #[serde(default)]
    pub transition_out: Option<Transition>,
}

/// A resolved slide: assets verified on disk, narration probed for length.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideSpec {
    /// Ordinal position within the assembled program.
    pub index: u32,
    /// Verified path to the slide's still image.
    pub visual: PathBuf,
    /// Verified narration path, or `None` when absent (degraded mode).
    pub narration: Option<PathBuf>,
    /// Probed narration length in seconds, when narration is present.
    pub narration_secs: Option<f64>,
    /// Verified reveal visual path, if any.
    pub reveal_visual: Option<PathBuf>,
    /// Role within the program.
    pub role: SlideRole,
    /// Inbound transition.
    pub transition_in: Transition,
    /// Outbound transition.
    pub transition_out: Transition,
}

/// A slide annotated with its computed placement on the timeline.
///
/// Entries are derived by the timeline builder and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineEntry {
    /// The resolved slide this entry places.
    pub slide: SlideSpec,
    /// Absolute start offset in seconds from the program start.
    pub start_offset_secs: f64,
    /// On-screen duration in seconds.
    pub duration_secs: f64,
    /// Seconds after entry start at which the reveal visual switches in,
    /// anchored to the end of narration.
    pub reveal_at_secs: Option<f64>,
}

impl TimelineEntry {
    /// Absolute end offset in seconds.
    pub fn end_secs(&self) -> f64 {
        self.start_offset_secs + self.duration_secs
    }
}

/// The fully resolved, ordered program timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Entries in playback order with strictly increasing offsets.
    pub entries: Vec<TimelineEntry>,
    /// Total program duration: `sum(durations) - sum(overlaps)`.
    pub total_secs: f64,
}

impl Timeline {
    /// Index of the entry on screen at time `t`, ignoring overlap windows
    /// (during an overlap the incoming entry owns the time slot).
    pub fn entry_index_at(&self, t: f64) -> Option<usize> {
        let mut active = None;
        for (i, e) in self.entries.iter().enumerate() {
            if e.start_offset_secs <= t {
                active = Some(i);
            } else {
                break;
            }
        }
        active.filter(|&i| t < self.entries[i].end_secs())
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
