/// Convenience result type used across Slidecast.
pub type SlidecastResult<T> = Result<T, SlidecastError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlidecastError {
    /// A slide's visual asset cannot be located. Fatal per run.
    #[error("asset resolution error: {0}")]
    AssetResolution(String),

    /// Invalid or inconsistent configuration, reported in aggregate at load time.
    #[error("configuration error: {0}")]
    Config(String),

    /// Computed durations/offsets violate timeline invariants.
    #[error("timeline consistency error: {0}")]
    TimelineConsistency(String),

    /// A narration or music track cannot be probed or decoded.
    #[error("audio mix error: {0}")]
    AudioMix(String),

    /// Encoder or IO failure while rendering the output video.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidecastError {
    /// Build a [`SlidecastError::AssetResolution`] value.
    pub fn asset_resolution(msg: impl Into<String>) -> Self {
        Self::AssetResolution(msg.into())
    }

    /// Build a [`SlidecastError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SlidecastError::TimelineConsistency`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::TimelineConsistency(msg.into())
    }

    /// Build a [`SlidecastError::AudioMix`] value.
    pub fn audio_mix(msg: impl Into<String>) -> Self {
        Self::AudioMix(msg.into())
    }

    /// Build a [`SlidecastError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
