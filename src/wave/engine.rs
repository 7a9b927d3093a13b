use super::{AlphaGradient, ElementBuffer};
use std::{fmt, sync::Arc};

/// Decides where the crest goes next.
///
/// Called with the current crest and the inclusive bounds it may move within. Returning a smaller
/// value moves the wave left, a larger one moves it right. Anything outside the bounds sends the
/// crest back to 0.
pub type StepFn = Arc<dyn Fn(i64, i64, i64) -> i64 + Send + Sync>;

/// Per-frame inputs the geometry depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Height of a single element, in pixels.
    pub element_height: i32,
    /// How much each step up the wave lifts an element, relative to its height.
    pub height_ratio: f32,
    /// The y coordinate elements rest on.
    pub baseline: i32,
}

impl FrameGeometry {
    fn offset(&self) -> f32 {
        self.element_height as f32 * self.height_ratio
    }

    fn flat(&self) -> i32 {
        self.baseline - self.element_height
    }

    fn lifted(&self, level: i64) -> i32 {
        (self.baseline as f32 - self.element_height as f32 - level as f32 * self.offset()) as i32
    }
}

/// Where the highest element of the wave sits relative to the visible window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrestRegion {
    /// The peak is drawn this frame.
    Visible,
    /// The peak already left through the left edge; only the trailing slope shows.
    BeforeWindow,
    /// The peak hasn't entered yet; only the leading slope shows.
    AfterWindow,
}

/// The wave's position state machine.
pub struct WaveEngine {
    buffer: ElementBuffer,
    gradient: AlphaGradient,
    wave_length: usize,
    crest: usize,
    step_fn: Option<StepFn>,
}

impl WaveEngine {
    pub fn new(visible_length: usize, wave_length: usize, gradient: AlphaGradient) -> Self {
        let wave_length = wave_length.max(1);
        let buffer = ElementBuffer::new(visible_length, wave_length, gradient.min());
        Self { buffer, gradient, wave_length, crest: 0, step_fn: None }
    }

    /// Reallocate the ring for a new shape. The crest goes back to 0.
    pub fn resize(&mut self, visible_length: usize, wave_length: usize) {
        self.wave_length = wave_length.max(1);
        self.buffer = ElementBuffer::new(visible_length, self.wave_length, self.gradient.min());
        self.crest = 0;
    }

    /// Swap the alpha ramp. The ramp must have been built for the current wave length.
    ///
    /// Every element drops to the new minimum until the next frame reshapes it.
    pub fn set_gradient(&mut self, gradient: AlphaGradient) {
        self.buffer.reset_alpha(gradient.min());
        self.gradient = gradient;
    }

    pub fn set_step_fn(&mut self, step_fn: Option<StepFn>) {
        self.step_fn = step_fn;
    }

    pub fn buffer(&self) -> &ElementBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ElementBuffer {
        &mut self.buffer
    }

    pub fn gradient(&self) -> &AlphaGradient {
        &self.gradient
    }

    pub fn wave_length(&self) -> usize {
        self.wave_length
    }

    pub fn crest(&self) -> usize {
        self.crest
    }

    /// Advance the crest by one tick.
    pub fn step(&mut self) -> usize {
        let total = self.buffer.len() as i64;
        let current = self.crest as i64;
        let next = match &self.step_fn {
            Some(step_fn) => step_fn(current, 0, total - 1),
            None => current + 1,
        };
        self.crest = if next >= total || next < 0 { 0 } else { next as usize };
        self.crest
    }

    /// Index of the element that gets the peak height this frame.
    ///
    /// Even waves have no middle element, so the peak is attributed to the one just before the
    /// midpoint. That can be -1 when the midpoint wrapped around to 0.
    pub fn peak(&self) -> i64 {
        let total = self.buffer.len() as i64;
        let half = self.wave_length as i64 / 2;
        let peak = (self.crest as i64 + half) % total;
        if self.is_odd() { peak } else { peak - 1 }
    }

    /// Which slice of the wave is on screen.
    pub fn region(&self) -> CrestRegion {
        let peak = self.peak();
        let start = self.buffer.display_start() as i64;
        let end = self.buffer.display_end() as i64;
        // odd waves count a peak on the first drawn element as visible, even ones don't
        let past_start = if self.is_odd() { peak >= start } else { peak > start };
        if past_start && peak <= end {
            CrestRegion::Visible
        } else if peak > end {
            CrestRegion::AfterWindow
        } else {
            CrestRegion::BeforeWindow
        }
    }

    fn is_odd(&self) -> bool {
        self.wave_length % 2 != 0
    }

    /// Recompute every visible element's height and opacity for the current crest.
    pub fn recompute(&mut self, frame: &FrameGeometry) {
        let total = self.buffer.len() as i64;
        if total == 0 {
            return;
        }
        let crest = self.crest as i64;
        let wave_end = (crest + self.wave_length as i64 - 1) % total;
        let peak = self.peak();
        let start = self.buffer.display_start() as i64;
        let end = self.buffer.display_end() as i64;
        let region = self.region();
        let odd = self.is_odd();

        let flat = frame.flat();
        let min = self.gradient.min();
        let max = self.gradient.max();
        let gradient = &self.gradient;
        let buffer = &mut self.buffer;
        let mut level: i64 = 1;
        let rise = |buffer: &mut ElementBuffer, index: i64, level: i64| {
            buffer.set(index, frame.lifted(level), gradient.level(level as usize));
        };

        match region {
            CrestRegion::Visible => {
                for i in crest..=wave_end {
                    if i < peak {
                        rise(buffer, i, level);
                        level += 1;
                    } else if i > peak {
                        // odd waves have a true middle, so the way down starts one step lower
                        if odd {
                            level -= 1;
                            rise(buffer, i, level);
                        } else {
                            rise(buffer, i, level);
                            level -= 1;
                        }
                    } else {
                        buffer.set(i, frame.lifted(level), max);
                    }
                }
                for i in start..crest {
                    buffer.set(i, flat, min);
                }
                for i in wave_end + 1..=end {
                    buffer.set(i, flat, min);
                }
            }
            CrestRegion::BeforeWindow => {
                let tail_end = if odd { start } else { peak + 1 };
                for i in (tail_end..=wave_end).rev() {
                    rise(buffer, i, level);
                    level += 1;
                }
                // an even peak on the first drawn element shares its neighbour's height
                let top = (level - 1).max(1);
                for i in start..tail_end {
                    rise(buffer, i, top);
                }
                for i in wave_end + 1..=end {
                    buffer.set(i, flat, min);
                }
            }
            CrestRegion::AfterWindow => {
                for i in start..crest {
                    buffer.set(i, flat, min);
                }
                let head_end = if odd { end - 1 } else { end };
                for i in crest..=head_end {
                    rise(buffer, i, level);
                    level += 1;
                }
            }
        }
    }
}

impl fmt::Debug for WaveEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveEngine")
            .field("wave_length", &self.wave_length)
            .field("crest", &self.crest)
            .field("elements", &self.buffer.len())
            .field("custom_step", &self.step_fn.is_some())
            .finish()
    }
}
