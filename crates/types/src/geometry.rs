use serde::{Deserialize, Serialize};

/// Width and height in device-independent pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// A box is usable for layout when both sides are finite and strictly positive.
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl PartialEq<(f32, f32)> for Size {
    fn eq(&self, other: &(f32, f32)) -> bool {
        const EPSILON: f32 = 0.01;
        (self.width - other.0).abs() < EPSILON && (self.height - other.1).abs() < EPSILON
    }
}
