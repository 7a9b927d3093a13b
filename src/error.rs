/// Errors that can occur when configuring a wave.
///
/// A rejected call never leaves the wave half-updated: whatever was configured before the call
/// stays in effect.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("wave length must be at least 1")]
    WaveLengthTooSmall,

    #[error("visible length {visible} is too short for a wave of length {wave} (needs at least {})", .wave + 2)]
    VisibleLengthTooShort { visible: usize, wave: usize },

    #[error("visible length {0} is too large")]
    VisibleLengthTooLarge(usize),

    #[error("interval {0} is too large")]
    IntervalTooLarge(u32),

    #[error("duration can't be negative")]
    NegativeDuration,

    #[error("interval can't be negative")]
    NegativeInterval,

    #[error("ghost alpha range {min}..{max} is invalid")]
    AlphaOutOfRange { min: i32, max: i32 },

    #[error("style can't be changed while rendering text")]
    StyleLocked,

    #[error("custom style requires a custom image")]
    MissingCustomImage,

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
}
