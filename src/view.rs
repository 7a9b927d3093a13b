use crate::{
    Color, ConfigError, CustomImage, ElementStyle, ImageType, Padding, WaveConfig, WaveHeight,
    compositor::{self, DrawCommand, Scene},
    driver::{AnimationDriver, PollableState},
    wave::{AlphaGradient, FrameGeometry, WaveEngine},
};
use log::{debug, warn};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// The size of the surface the wave is drawn on, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: i32,
    pub height: i32,
}

/// A constraint the host puts on one dimension of the wave when measuring it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeConstraint {
    /// The dimension must be exactly this size.
    Exactly(i32),
    /// The dimension can be anything up to this size.
    AtMost(i32),
    /// The host doesn't care; this is only a hint.
    Unspecified(i32),
}

impl SizeConstraint {
    fn size(&self) -> i32 {
        match self {
            Self::Exactly(size) | Self::AtMost(size) | Self::Unspecified(size) => *size,
        }
    }
}

/// An animated loading wave.
///
/// This ties the wave's geometry to its configuration and timing. The host drives it by calling
/// [WaveLoadingView::poll] from its render loop and drawing whatever [WaveLoadingView::render]
/// returns whenever the wave changed.
#[derive(Debug)]
pub struct WaveLoadingView {
    style: ElementStyle,
    custom_image: Option<CustomImage>,
    color: Color,
    wave_height: WaveHeight,
    interval: i32,
    element_size: u32,
    rect_radius: i32,
    ghost_effect: bool,
    ghost_alpha: (i32, i32),
    padding: Padding,
    surface: SurfaceSize,
    visible_length: usize,
    engine: WaveEngine,
    driver: AnimationDriver,
    attached: bool,
    /// The most recent instant the host handed in, so restarts stay on the host's clock.
    last_seen: Option<Instant>,
}

impl WaveLoadingView {
    pub fn new(config: &WaveConfig) -> Result<Self, ConfigError> {
        let wave_length = config.wave_length;
        if wave_length == 0 {
            return Err(ConfigError::WaveLengthTooSmall);
        }

        let mut visible_length = config.visible_length();
        let mut style = match config.image_type {
            ImageType::Circle => ElementStyle::Circle,
            ImageType::Square => ElementStyle::Square,
            ImageType::Rect => ElementStyle::Rect,
            ImageType::Noise => ElementStyle::Noise,
            ImageType::Text | ImageType::Custom => {
                debug!("{} style is picked from the text or image, falling back to circles", config.image_type);
                ElementStyle::Circle
            }
        };
        if let Some(text) = &config.text {
            let text: Vec<char> = text.chars().collect();
            if text.len() >= wave_length + 2 {
                visible_length = text.len();
                style = ElementStyle::Glyph { text, size: config.text_size };
            } else {
                warn!("text is too short for a wave of length {wave_length}, ignoring it");
            }
        }
        if visible_length < wave_length + 2 {
            return Err(ConfigError::VisibleLengthTooShort { visible: visible_length, wave: wave_length });
        }

        let custom_image = config.custom_image.as_ref().map(CustomImage::open).transpose()?;
        if let Some(image) = &custom_image {
            style = ElementStyle::Custom(image.clone());
        }

        let interval = i32::try_from(config.interval).map_err(|_| ConfigError::IntervalTooLarge(config.interval))?;
        if i32::try_from(visible_length).is_err() {
            return Err(ConfigError::VisibleLengthTooLarge(visible_length));
        }

        let ghost_alpha = (config.ghost_alpha_min, config.ghost_alpha_max);
        let gradient = AlphaGradient::build(wave_length, ghost_alpha.0, ghost_alpha.1);
        Ok(Self {
            style,
            custom_image,
            color: config.color,
            wave_height: config.wave_height,
            interval,
            element_size: config.element_size,
            rect_radius: clamp_radius(config.rect_radius as i32, config.element_size as i32),
            ghost_effect: config.ghost_effect,
            ghost_alpha,
            padding: config.padding,
            surface: SurfaceSize::default(),
            visible_length,
            engine: WaveEngine::new(visible_length, wave_length, gradient),
            driver: AnimationDriver::new(Duration::from_millis(config.duration)),
            attached: true,
            last_seen: None,
        })
    }

    /// Start animating. Does nothing if already running or detached.
    pub fn start(&mut self, now: Instant) {
        if !self.attached {
            warn!("not starting a detached wave");
            return;
        }
        self.last_seen = Some(now);
        self.driver.start(now);
    }

    /// Stop animating. Does nothing if already paused.
    pub fn pause(&mut self) {
        self.driver.pause();
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    /// The driver that schedules the wave's steps.
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn engine(&self) -> &WaveEngine {
        &self.engine
    }

    /// Tear down: stop animating and refuse to start again until re-attached.
    pub fn detach(&mut self) {
        self.driver.pause();
        self.attached = false;
        debug!("wave detached");
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Step the wave if it's due. The host should redraw on [PollableState::Modified].
    pub fn poll(&mut self, now: Instant) -> PollableState {
        self.last_seen = Some(now);
        let state = self.driver.poll(now);
        if state == PollableState::Modified {
            self.tick();
        }
        state
    }

    /// Move the wave one step regardless of timing.
    pub fn tick(&mut self) {
        self.engine.step();
    }

    /// Record the size the host laid the wave out at.
    pub fn layout(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    /// The size the wave needs to be drawn in full, padding included.
    pub fn preferred_size(&self) -> SurfaceSize {
        let (element_width, element_height) = self.style.element_size(self.element_size);
        // fits: checked when the view was built
        let visible = self.visible_length as i32;
        let width = visible * element_width + (visible - 1) * self.interval + self.padding.left + self.padding.right;

        let wave_length = self.engine.wave_length() as i32;
        let steps = if wave_length % 2 != 0 { wave_length / 2 + 1 } else { wave_length / 2 };
        let wave_height =
            (element_height as f32 + (steps * element_height) as f32 * self.wave_height.ratio()) as i32;
        SurfaceSize { width, height: wave_height + self.padding.top + self.padding.bottom }
    }

    /// Pick a size given the host's constraints.
    pub fn measure(&self, width: SizeConstraint, height: SizeConstraint) -> SurfaceSize {
        let preferred = self.preferred_size();
        let (width, height) = match (width, height) {
            (SizeConstraint::AtMost(_), SizeConstraint::AtMost(_)) => (preferred.width, preferred.height),
            (SizeConstraint::Exactly(width), SizeConstraint::AtMost(_)) => (width, preferred.height),
            (SizeConstraint::AtMost(_), SizeConstraint::Exactly(height)) => (preferred.width, height),
            (width, height) => (width.size(), height.size()),
        };
        SurfaceSize { width, height }
    }

    /// The geometry inputs for the current configuration and layout.
    pub fn frame_geometry(&self) -> FrameGeometry {
        let (_, element_height) = self.style.element_size(self.element_size);
        FrameGeometry {
            element_height,
            height_ratio: self.wave_height.ratio(),
            baseline: self.surface.height - self.padding.bottom,
        }
    }

    /// Lay out and shape the current frame and turn it into draw commands.
    pub fn render(&mut self, rng: &mut fastrand::Rng) -> Vec<DrawCommand> {
        let (element_width, _) = self.style.element_size(self.element_size);
        let frame = self.frame_geometry();
        self.engine.buffer_mut().assign_x(element_width, self.interval, self.padding.left);
        self.engine.recompute(&frame);

        let scene = Scene {
            style: &self.style,
            color: self.color,
            element_size: self.element_size as i32,
            rect_radius: self.rect_radius,
            ghost_effect: self.ghost_effect,
            baseline: frame.baseline,
        };
        compositor::compose(&scene, self.engine.buffer().visible(), rng)
    }

    pub fn duration(&self) -> Duration {
        self.driver.duration()
    }

    /// Set the time between two steps, in milliseconds.
    pub fn set_duration(&mut self, millis: i64) -> Result<(), ConfigError> {
        let millis = u64::try_from(millis).map_err(|_| reject(ConfigError::NegativeDuration))?;
        self.driver.set_duration(Duration::from_millis(millis));
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn wave_length(&self) -> usize {
        self.engine.wave_length()
    }

    pub fn visible_length(&self) -> usize {
        self.visible_length
    }

    /// Change the number of elements a wave spans. This reallocates the wave and restarts it from
    /// the left.
    pub fn set_wave_length(&mut self, wave_length: usize) -> Result<(), ConfigError> {
        if wave_length == 0 {
            return Err(reject(ConfigError::WaveLengthTooSmall));
        }
        if wave_length + 2 > self.visible_length {
            return Err(reject(ConfigError::VisibleLengthTooShort { visible: self.visible_length, wave: wave_length }));
        }
        self.reconfigure(|view| {
            let (min, max) = view.ghost_alpha;
            view.engine.set_gradient(AlphaGradient::build(wave_length, min, max));
            view.engine.resize(view.visible_length, wave_length);
        });
        Ok(())
    }

    pub fn interval(&self) -> i32 {
        self.interval
    }

    /// Set the spacing between elements, in pixels.
    pub fn set_interval(&mut self, interval: i32) -> Result<(), ConfigError> {
        if interval < 0 {
            return Err(reject(ConfigError::NegativeInterval));
        }
        self.reconfigure(|view| view.interval = interval);
        Ok(())
    }

    pub fn image_type(&self) -> ImageType {
        self.style.image_type()
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    /// Switch to another shape.
    ///
    /// Text waves keep their style, and the custom style is only available once an image was
    /// set.
    pub fn set_style(&mut self, image_type: ImageType) -> Result<(), ConfigError> {
        if matches!(self.style, ElementStyle::Glyph { .. }) {
            return Err(reject(ConfigError::StyleLocked));
        }
        self.style = match image_type {
            ImageType::Text => return Err(reject(ConfigError::StyleLocked)),
            ImageType::Circle => ElementStyle::Circle,
            ImageType::Square => ElementStyle::Square,
            ImageType::Rect => ElementStyle::Rect,
            ImageType::Noise => ElementStyle::Noise,
            ImageType::Custom => match &self.custom_image {
                Some(image) => ElementStyle::Custom(image.clone()),
                None => return Err(reject(ConfigError::MissingCustomImage)),
            },
        };
        Ok(())
    }

    /// Draw every element as `image`. This switches to the custom style.
    pub fn set_custom_image(&mut self, image: CustomImage) {
        self.style = ElementStyle::Custom(image.clone());
        self.custom_image = Some(image);
    }

    pub fn ghost_effect(&self) -> bool {
        self.ghost_effect
    }

    pub fn set_ghost_effect(&mut self, enabled: bool) {
        self.ghost_effect = enabled;
    }

    /// The effective opacity bounds, after clamping.
    pub fn ghost_alpha(&self) -> (u8, u8) {
        let gradient = self.engine.gradient();
        (gradient.min(), gradient.max())
    }

    /// Set the opacity far from the crest and at the crest, both within `0..=255`.
    pub fn set_ghost_alpha(&mut self, min: i32, max: i32) -> Result<(), ConfigError> {
        if min > max || min < 0 || max > 255 {
            return Err(reject(ConfigError::AlphaOutOfRange { min, max }));
        }
        self.reconfigure(|view| {
            view.ghost_alpha = (min, max);
            view.engine.set_gradient(AlphaGradient::build(view.engine.wave_length(), min, max));
        });
        Ok(())
    }

    /// Replace the default left to right movement.
    ///
    /// `step` gets the current crest and the inclusive bounds it may move within, and returns the
    /// next crest.
    pub fn set_step_fn<F>(&mut self, step: F)
    where
        F: Fn(i64, i64, i64) -> i64 + Send + Sync + 'static,
    {
        self.engine.set_step_fn(Some(Arc::new(step)));
    }

    /// Go back to moving one element to the right per step.
    pub fn clear_step_fn(&mut self) {
        self.engine.set_step_fn(None);
    }

    pub fn rect_radius(&self) -> i32 {
        self.rect_radius
    }

    pub fn wave_height(&self) -> WaveHeight {
        self.wave_height
    }

    pub fn set_wave_height(&mut self, wave_height: WaveHeight) {
        self.wave_height = wave_height;
    }

    /// Apply a change that reshapes the wave with the animation paused around it.
    fn reconfigure<F: FnOnce(&mut Self)>(&mut self, change: F) {
        let was_running = self.driver.is_running();
        self.driver.pause();
        change(self);
        debug!("wave reconfigured: {:?}", self.engine);
        if was_running {
            self.driver.start(self.last_seen.unwrap_or_else(Instant::now));
        }
    }
}

fn clamp_radius(radius: i32, element_size: i32) -> i32 {
    if radius * 2 > element_size { element_size / 2 - 1 } else { radius }
}

fn reject(error: ConfigError) -> ConfigError {
    warn!("ignoring configuration change: {error}");
    error
}
