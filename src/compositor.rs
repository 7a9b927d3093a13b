use crate::{Color, CustomImage, ElementStyle, wave::Element};

/// Number of noise bars drawn per element.
const NOISE_BARS: i32 = 4;

/// A single primitive for the host surface to draw.
///
/// Coordinates are in pixels with the origin at the top left of the surface. `alpha` is only set
/// when the ghost effect is on; otherwise the color's own alpha applies.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A character whose glyph box has its top left corner at `(x, y)`.
    Glyph { ch: char, x: i32, y: i32, size: u32, color: Color, alpha: Option<u8> },

    Circle { cx: i32, cy: i32, radius: i32, color: Color, alpha: Option<u8> },

    /// A rectangle, rounded when `radius` is set.
    Rect { left: i32, top: i32, right: i32, bottom: i32, radius: Option<i32>, color: Color, alpha: Option<u8> },

    /// The custom image stretched over the given bounds.
    Image { image: CustomImage, left: i32, top: i32, right: i32, bottom: i32, alpha: Option<u8> },
}

/// Everything about a frame that doesn't change from one element to the next.
#[derive(Clone, Debug)]
pub struct Scene<'a> {
    pub style: &'a ElementStyle,
    pub color: Color,
    pub element_size: i32,
    pub rect_radius: i32,
    pub ghost_effect: bool,
    pub baseline: i32,
}

impl Scene<'_> {
    fn alpha(&self, element: &Element) -> Option<u8> {
        self.ghost_effect.then_some(element.alpha)
    }

    fn radius(&self) -> Option<i32> {
        (self.rect_radius > 0).then_some(self.rect_radius)
    }
}

/// Turn the visible elements into draw commands.
///
/// `rng` only feeds the noise style's bar heights.
pub fn compose(scene: &Scene<'_>, elements: &[Element], rng: &mut fastrand::Rng) -> Vec<DrawCommand> {
    let size = scene.element_size;
    let color = scene.color;
    let mut commands = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let alpha = scene.alpha(element);
        match scene.style {
            ElementStyle::Glyph { text, size } => {
                let Some(ch) = text.get(index) else {
                    break;
                };
                commands.push(DrawCommand::Glyph { ch: *ch, x: element.x, y: element.y, size: *size, color, alpha });
            }
            ElementStyle::Circle => {
                commands.push(DrawCommand::Circle {
                    cx: element.x + size / 2,
                    cy: element.y + size / 2,
                    radius: size / 2,
                    color,
                    alpha,
                });
            }
            ElementStyle::Square => {
                commands.push(DrawCommand::Rect {
                    left: element.x,
                    top: element.y,
                    right: element.x + size,
                    bottom: element.y + size,
                    radius: scene.radius(),
                    color,
                    alpha,
                });
            }
            ElementStyle::Rect => {
                commands.push(DrawCommand::Rect {
                    left: element.x,
                    top: element.y,
                    right: element.x + size,
                    bottom: scene.baseline,
                    radius: scene.radius(),
                    color,
                    alpha,
                });
            }
            ElementStyle::Noise => {
                let bar_width = size / 8;
                for bar in 0..NOISE_BARS {
                    let top = (element.y as f64 * 0.25 + element.y as f64 * 0.75 * rng.f64()) as i32;
                    let left = element.x + bar_width * 2 * bar;
                    commands.push(DrawCommand::Rect {
                        left,
                        top,
                        right: left + bar_width,
                        bottom: scene.baseline,
                        radius: None,
                        color,
                        alpha,
                    });
                }
            }
            ElementStyle::Custom(image) => {
                commands.push(DrawCommand::Image {
                    image: image.clone(),
                    left: element.x,
                    top: element.y,
                    right: element.x + size,
                    bottom: element.y + size,
                    alpha,
                });
            }
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn elements() -> Vec<Element> {
        vec![Element { x: 0, y: 80, alpha: 150 }, Element { x: 15, y: 90, alpha: 100 }]
    }

    fn scene(style: &ElementStyle) -> Scene<'_> {
        Scene { style, color: Color::BLUE, element_size: 10, rect_radius: 0, ghost_effect: false, baseline: 100 }
    }

    #[test]
    fn circles() {
        let commands = compose(&scene(&ElementStyle::Circle), &elements(), &mut fastrand::Rng::with_seed(1));
        assert_eq!(
            commands,
            &[
                DrawCommand::Circle { cx: 5, cy: 85, radius: 5, color: Color::BLUE, alpha: None },
                DrawCommand::Circle { cx: 20, cy: 95, radius: 5, color: Color::BLUE, alpha: None },
            ]
        );
    }

    #[test]
    fn ghost_effect_applies_alpha() {
        let style = ElementStyle::Circle;
        let scene = Scene { ghost_effect: true, ..scene(&style) };
        let commands = compose(&scene, &elements(), &mut fastrand::Rng::with_seed(1));
        let alphas: Vec<_> = commands
            .iter()
            .map(|c| match c {
                DrawCommand::Circle { alpha, .. } => *alpha,
                _ => None,
            })
            .collect();
        assert_eq!(alphas, &[Some(150), Some(100)]);
    }

    #[test]
    fn rounded_squares() {
        let style = ElementStyle::Square;
        let scene = Scene { rect_radius: 3, ..scene(&style) };
        let commands = compose(&scene, &elements(), &mut fastrand::Rng::with_seed(1));
        assert_eq!(
            commands[0],
            DrawCommand::Rect { left: 0, top: 80, right: 10, bottom: 90, radius: Some(3), color: Color::BLUE, alpha: None }
        );
    }

    #[test]
    fn rects_reach_baseline() {
        let commands = compose(&scene(&ElementStyle::Rect), &elements(), &mut fastrand::Rng::with_seed(1));
        assert_eq!(
            commands[1],
            DrawCommand::Rect { left: 15, top: 90, right: 25, bottom: 100, radius: None, color: Color::BLUE, alpha: None }
        );
    }

    #[test]
    fn noise_bars() {
        let style = ElementStyle::Noise;
        let scene = Scene { element_size: 16, ..scene(&style) };
        let commands = compose(&scene, &elements(), &mut fastrand::Rng::with_seed(7));
        assert_eq!(commands.len(), 8);
        for (index, command) in commands.iter().enumerate() {
            let DrawCommand::Rect { left, top, right, bottom, .. } = command else {
                panic!("not a rect: {command:?}");
            };
            let element = &elements()[index / 4];
            let bar = (index % 4) as i32;
            assert_eq!(*left, element.x + 4 * bar);
            assert_eq!(*right, *left + 2);
            assert_eq!(*bottom, 100);
            assert!(*top >= element.y / 4 && *top <= element.y, "top {top}");
        }
    }

    #[test]
    fn noise_is_reproducible() {
        let style = ElementStyle::Noise;
        let first = compose(&scene(&style), &elements(), &mut fastrand::Rng::with_seed(42));
        let second = compose(&scene(&style), &elements(), &mut fastrand::Rng::with_seed(42));
        assert_eq!(first, second);
    }

    #[test]
    fn glyphs() {
        let style = ElementStyle::Glyph { text: vec!['h', 'i'], size: 12 };
        let commands = compose(&scene(&style), &elements(), &mut fastrand::Rng::with_seed(1));
        assert_eq!(
            commands[1],
            DrawCommand::Glyph { ch: 'i', x: 15, y: 90, size: 12, color: Color::BLUE, alpha: None }
        );
    }

    #[test]
    fn glyphs_stop_at_end_of_text() {
        let style = ElementStyle::Glyph { text: vec!['h'], size: 12 };
        let commands = compose(&scene(&style), &elements(), &mut fastrand::Rng::with_seed(1));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn images() {
        let image = CustomImage::new(RgbaImage::new(4, 4));
        let style = ElementStyle::Custom(image.clone());
        let scene = Scene { ghost_effect: true, ..scene(&style) };
        let commands = compose(&scene, &elements(), &mut fastrand::Rng::with_seed(1));
        assert_eq!(
            commands[0],
            DrawCommand::Image { image, left: 0, top: 80, right: 10, bottom: 90, alpha: Some(150) }
        );
    }
}
