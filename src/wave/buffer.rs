/// One visual slot in the wave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub x: i32,
    pub y: i32,
    pub alpha: u8,
}

/// A fixed size ring of elements.
///
/// Only `visible_length` elements are ever drawn. The ring carries `wave_length - 1` extra
/// elements on each side so a wave can slide in and out of view one element at a time.
#[derive(Clone, Debug)]
pub struct ElementBuffer {
    elements: Vec<Element>,
    visible_length: usize,
    display_start: usize,
}

impl ElementBuffer {
    /// Allocate a buffer with every element reset to `alpha`.
    pub fn new(visible_length: usize, wave_length: usize, alpha: u8) -> Self {
        let wave_length = wave_length.max(1);
        let total = visible_length + (wave_length - 1) * 2;
        let elements = vec![Element { alpha, ..Default::default() }; total];
        Self { elements, visible_length, display_start: wave_length - 1 }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn visible_length(&self) -> usize {
        self.visible_length
    }

    /// Index of the first drawn element.
    pub fn display_start(&self) -> usize {
        self.display_start
    }

    /// Index one past the last drawn element.
    pub fn display_end(&self) -> usize {
        self.display_start + self.visible_length
    }

    /// Lay the visible elements out left to right.
    pub fn assign_x(&mut self, element_width: i32, interval: i32, left_padding: i32) {
        let start = self.display_start;
        for (offset, element) in self.elements[start..start + self.visible_length].iter_mut().enumerate() {
            element.x = left_padding + (element_width + interval) * offset as i32;
        }
    }

    /// The elements that get drawn, in order.
    pub fn visible(&self) -> &[Element] {
        &self.elements[self.display_start..self.display_end()]
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Give every element the same opacity, keeping heights.
    pub(crate) fn reset_alpha(&mut self, alpha: u8) {
        for element in &mut self.elements {
            element.alpha = alpha;
        }
    }

    pub(crate) fn set(&mut self, index: i64, y: i32, alpha: u8) {
        let Ok(index) = usize::try_from(index) else {
            return;
        };
        if let Some(element) = self.elements.get_mut(index) {
            element.y = y;
            element.alpha = alpha;
        }
    }
}
