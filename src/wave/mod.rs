mod alpha;
mod buffer;
mod engine;

pub use alpha::{AlphaGradient, GHOST_ALPHA_FLOOR, GHOST_ALPHA_MAX_DEFAULT, GHOST_ALPHA_MIN_DEFAULT};
pub use buffer::{Element, ElementBuffer};
pub use engine::{CrestRegion, FrameGeometry, StepFn, WaveEngine};
