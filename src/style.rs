use crate::{ConfigError, ImageType};
use image::RgbaImage;
use std::{fmt, path::Path, sync::Arc};

/// Ratio between a glyph's size and the height of its box.
const GLYPH_HEIGHT_RATIO: f64 = 0.7535;

/// An image drawn in place of every element.
#[derive(Clone)]
pub struct CustomImage(Arc<RgbaImage>);

impl CustomImage {
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    /// Load an image from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let image = image::open(path)?;
        Ok(Self::new(image.into_rgba8()))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }
}

impl fmt::Debug for CustomImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomImage({}x{})", self.0.width(), self.0.height())
    }
}

impl PartialEq for CustomImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// What each element is drawn as, along with what that needs.
///
/// Both measuring and drawing go through this, so an element's size always matches its shape.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementStyle {
    /// One character per element.
    Glyph { text: Vec<char>, size: u32 },
    Circle,
    Square,
    Rect,
    Noise,
    Custom(CustomImage),
}

impl ElementStyle {
    pub fn image_type(&self) -> ImageType {
        match self {
            Self::Glyph { .. } => ImageType::Text,
            Self::Circle => ImageType::Circle,
            Self::Square => ImageType::Square,
            Self::Rect => ImageType::Rect,
            Self::Noise => ImageType::Noise,
            Self::Custom(_) => ImageType::Custom,
        }
    }

    /// The width and height of a single element.
    pub fn element_size(&self, element_size: u32) -> (i32, i32) {
        match self {
            Self::Glyph { size, .. } => (*size as i32, glyph_height(*size)),
            Self::Circle | Self::Square | Self::Rect | Self::Noise | Self::Custom(_) => {
                (element_size as i32, element_size as i32)
            }
        }
    }
}

/// The height of the box a glyph of the given size is drawn in.
pub fn glyph_height(size: u32) -> i32 {
    ((size as f64 + 0.00000007) / GLYPH_HEIGHT_RATIO) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_dimensions() {
        let style = ElementStyle::Glyph { text: "abc".chars().collect(), size: 10 };
        assert_eq!(style.element_size(40), (10, 13));
        assert_eq!(style.image_type(), ImageType::Text);
    }

    #[test]
    fn shape_dimensions() {
        for style in [ElementStyle::Circle, ElementStyle::Square, ElementStyle::Rect, ElementStyle::Noise] {
            assert_eq!(style.element_size(12), (12, 12));
        }
        let custom = ElementStyle::Custom(CustomImage::new(RgbaImage::new(3, 3)));
        assert_eq!(custom.element_size(7), (7, 7));
    }

    #[test]
    fn custom_image_identity() {
        let image = CustomImage::new(RgbaImage::new(2, 2));
        assert_eq!(image, image.clone());
        assert_ne!(image, CustomImage::new(RgbaImage::new(2, 2)));
        assert_eq!(format!("{image:?}"), "CustomImage(2x2)");
    }

    #[test]
    fn missing_image_file() {
        assert!(matches!(CustomImage::open("/nonexistent/wave.png"), Err(ConfigError::Image(_))));
    }
}
