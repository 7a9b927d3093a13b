use crate::{Color, ConfigError};
use serde::Deserialize;
use std::path::PathBuf;

/// The default time between two steps of the wave, in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 100;

/// The default spacing between elements, in pixels.
pub const DEFAULT_INTERVAL: u32 = 5;

/// The default width and height of an element, in pixels.
pub const DEFAULT_ELEMENT_SIZE: u32 = 10;

/// The default glyph size when rendering text, in pixels.
pub const DEFAULT_TEXT_SIZE: u32 = 10;

/// The wave configuration.
///
/// Every field has a default so a configuration file only needs to mention what it changes.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct WaveConfig {
    /// Text to ripple, one character per element.
    ///
    /// Only used when it has at least 2 more characters than the wave length.
    pub text: Option<String>,

    /// The color every element is drawn with.
    pub color: Color,

    /// The shape of each element.
    pub image_type: ImageType,

    /// The number of elements a single wave spans.
    pub wave_length: usize,

    /// The number of elements drawn. Defaults to the wave length plus 2.
    pub visible_length: Option<usize>,

    /// How tall the wave is.
    pub wave_height: WaveHeight,

    /// The time between two steps of the wave, in milliseconds.
    pub duration: u64,

    /// The spacing between elements, in pixels.
    pub interval: u32,

    /// The width and height of every non-text element, in pixels.
    pub element_size: u32,

    /// The glyph size when rendering text, in pixels.
    pub text_size: u32,

    /// The corner radius of squares and rectangles.
    pub rect_radius: u32,

    /// Whether elements fade in and out around the crest.
    pub ghost_effect: bool,

    /// The opacity of elements far from the crest.
    pub ghost_alpha_min: i32,

    /// The opacity of the crest.
    pub ghost_alpha_max: i32,

    /// An image to use for every element.
    pub custom_image: Option<PathBuf>,

    /// Space around the wave, in pixels.
    pub padding: Padding,
}

impl WaveConfig {
    /// Parse a configuration from YAML.
    pub fn from_yaml(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub(crate) fn visible_length(&self) -> usize {
        self.visible_length.unwrap_or(self.wave_length + 2)
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            text: None,
            color: Color::BLUE,
            image_type: ImageType::Circle,
            wave_length: 1,
            visible_length: None,
            wave_height: WaveHeight::Normal,
            duration: DEFAULT_DURATION_MS,
            interval: DEFAULT_INTERVAL,
            element_size: DEFAULT_ELEMENT_SIZE,
            text_size: DEFAULT_TEXT_SIZE,
            rect_radius: 0,
            ghost_effect: false,
            ghost_alpha_min: crate::wave::GHOST_ALPHA_MIN_DEFAULT as i32,
            ghost_alpha_max: crate::wave::GHOST_ALPHA_MAX_DEFAULT as i32,
            custom_image: None,
            padding: Padding::default(),
        }
    }
}

/// The shape every element in the wave is drawn as.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ImageType {
    /// One character of the configured text per element.
    Text,

    #[default]
    Circle,

    /// A square, optionally with rounded corners.
    Square,

    /// A bar going from the element down to the baseline.
    Rect,

    /// Four bars of random height per element.
    Noise,

    /// A user supplied image.
    Custom,
}

/// How tall the wave is, relative to the size of an element.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WaveHeight {
    Slight,
    #[default]
    Normal,
    Big,
    Large,
}

impl WaveHeight {
    /// How much each step towards the crest lifts an element, as a fraction of its height.
    pub fn ratio(&self) -> f32 {
        match self {
            Self::Slight => 0.25,
            Self::Normal => 0.5,
            Self::Big => 0.75,
            Self::Large => 1.0,
        }
    }
}

/// Space around the wave, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}
