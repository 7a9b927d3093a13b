/// Upper alpha bound used when the configured pair is unusable.
pub const GHOST_ALPHA_MAX_DEFAULT: u8 = 255;

/// Lower alpha bound used when the configured pair is unusable.
pub const GHOST_ALPHA_MIN_DEFAULT: u8 = 100;

/// Anything below this makes the wave's edges effectively invisible.
pub const GHOST_ALPHA_FLOOR: u8 = 10;

/// A symmetric opacity ramp across one wave cycle.
///
/// Values rise from just above `min` at both ends of the wave towards `max` in the middle. The
/// crest itself always uses `max`, so the ramp never needs to contain it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaGradient {
    min: u8,
    max: u8,
    ramp: Vec<u8>,
}

impl AlphaGradient {
    /// Build the ramp for a wave of the given length.
    ///
    /// Out of range bounds are clamped into `[10, 255]`. If after clamping `max < min`, both
    /// bounds fall back to the defaults.
    pub fn build(wave_length: usize, min: i32, max: i32) -> Self {
        let (min, max) = Self::sanitize(min, max);
        let mut ramp = vec![min as u8; wave_length];
        let half_len = if wave_length % 2 == 0 { wave_length / 2 + 1 } else { wave_length / 2 };
        let step = (max - min) / (half_len as u32 + 1);
        for i in 0..=half_len {
            // Mirrored writes past the middle would overwrite the other half.
            if i >= wave_length || i > wave_length - 1 - i {
                break;
            }
            let value = (min + (i as u32 + 1) * step) as u8;
            ramp[i] = value;
            ramp[wave_length - 1 - i] = value;
        }
        Self { min: min as u8, max: max as u8, ramp }
    }

    fn sanitize(min: i32, max: i32) -> (u32, u32) {
        let max = max.min(GHOST_ALPHA_MAX_DEFAULT as i32);
        let min = min.max(GHOST_ALPHA_FLOOR as i32);
        if max < min {
            (GHOST_ALPHA_MIN_DEFAULT as u32, GHOST_ALPHA_MAX_DEFAULT as u32)
        } else {
            (min as u32, max as u32)
        }
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.ramp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ramp.is_empty()
    }

    pub fn values(&self) -> &[u8] {
        &self.ramp
    }

    /// The alpha of an element `level` steps up the wave's slope (1-based).
    pub fn level(&self, level: usize) -> u8 {
        level.checked_sub(1).and_then(|index| self.ramp.get(index)).copied().unwrap_or(self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(7)]
    #[case(10)]
    #[case(31)]
    fn ramp_shape(#[case] wave_length: usize) {
        let gradient = AlphaGradient::build(wave_length, 100, 255);
        let values = gradient.values();
        assert_eq!(values.len(), wave_length);
        for i in 0..wave_length {
            assert_eq!(values[i], values[wave_length - 1 - i], "asymmetric at {i}");
            assert!(values[i] >= gradient.min() && values[i] <= gradient.max());
        }
        for i in 1..=(wave_length - 1) / 2 {
            assert!(values[i] >= values[i - 1], "not rising towards the middle at {i}");
        }
    }

    #[test]
    fn odd_ramp_values() {
        // half length 2, step (255 - 100) / 3 = 51
        let gradient = AlphaGradient::build(5, 100, 255);
        assert_eq!(gradient.values(), &[151, 202, 253, 202, 151]);
    }

    #[test]
    fn even_ramp_values() {
        // half length 3, step (200 - 100) / 4 = 25
        let gradient = AlphaGradient::build(4, 100, 200);
        assert_eq!(gradient.values(), &[125, 150, 150, 125]);
    }

    #[rstest]
    #[case::inverted(200, 100)]
    #[case::inverted_after_clamp(300, 5)]
    fn invalid_bounds_fall_back(#[case] min: i32, #[case] max: i32) {
        let gradient = AlphaGradient::build(3, min, max);
        assert_eq!(gradient.min(), GHOST_ALPHA_MIN_DEFAULT);
        assert_eq!(gradient.max(), GHOST_ALPHA_MAX_DEFAULT);
    }

    #[test]
    fn bounds_clamped() {
        let gradient = AlphaGradient::build(3, 0, 400);
        assert_eq!(gradient.min(), GHOST_ALPHA_FLOOR);
        assert_eq!(gradient.max(), 255);
    }

    #[test]
    fn level_lookup() {
        let gradient = AlphaGradient::build(5, 100, 255);
        assert_eq!(gradient.level(1), 151);
        assert_eq!(gradient.level(2), 202);
        assert_eq!(gradient.level(0), 100);
        assert_eq!(gradient.level(50), 100);
    }
}
