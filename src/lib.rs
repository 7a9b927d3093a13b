//! A loading indicator made of elements rippling left to right.
//!
//! The wave lives in a ring of elements that's a bit wider than what's on screen, so it can slide
//! in and out one element at a time. Every step moves the crest, every frame recomputes each
//! element's height and opacity and turns them into [DrawCommand]s for the host to paint.

mod color;
mod config;
mod error;
mod style;
mod view;

pub mod compositor;
pub mod driver;
pub mod wave;

pub use color::Color;
pub use compositor::DrawCommand;
pub use config::{
    DEFAULT_DURATION_MS, DEFAULT_ELEMENT_SIZE, DEFAULT_INTERVAL, DEFAULT_TEXT_SIZE, ImageType, Padding, WaveConfig,
    WaveHeight,
};
pub use driver::{AnimationDriver, PollableState, Tick, Ticker};
pub use error::ConfigError;
pub use style::{CustomImage, ElementStyle, glyph_height};
pub use view::{SizeConstraint, SurfaceSize, WaveLoadingView};
