use crate::ConfigError;
use serde::{Deserialize, Deserializer};
use std::{fmt, str::FromStr};

/// An RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLUE: Color = Color::new(0, 0, 255);

    /// Create an opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLUE
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let bytes = hex::decode(digits).map_err(|_| ConfigError::InvalidColor(input.to_string()))?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            [r, g, b, a] => Ok(Self::new(*r, *g, *b).with_alpha(*a)),
            _ => Err(ConfigError::InvalidColor(input.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b, self.a]))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        input.parse().map_err(serde::de::Error::custom)
    }
}
