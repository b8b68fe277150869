use serde::{Deserialize, Serialize};

/// The font sizes a reader can pick from: `min..=max` in increments of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontScale {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Size used for a new session and after [`reset`](crate::ReaderSession::reset).
    pub default: f32,
}

impl Default for FontScale {
    fn default() -> Self {
        Self {
            min: 14.0,
            max: 24.0,
            step: 2.0,
            default: 16.0,
        }
    }
}

impl FontScale {
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min > 0.0
            && self.max >= self.min
            && self.step > 0.0
            && (self.min..=self.max).contains(&self.default)
    }

    /// The nearest size on the scale. Non-finite input maps to the default.
    pub fn snap(&self, size: f32) -> f32 {
        if !size.is_finite() {
            return self.default;
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return size;
        }
        let clamped = size.clamp(self.min, self.max.max(self.min));
        if self.step.is_nan() || self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// One step larger than `size`, capped at `max`.
    pub fn increase(&self, size: f32) -> f32 {
        self.snap(self.snap(size) + self.step)
    }

    /// One step smaller than `size`, floored at `min`.
    pub fn decrease(&self, size: f32) -> f32 {
        self.snap(self.snap(size) - self.step)
    }

    /// Every size on the scale, smallest first.
    pub fn sizes(&self) -> Vec<f32> {
        let mut sizes = Vec::new();
        if !self.is_valid() {
            return sizes;
        }
        let mut size = self.min;
        while size <= self.max + f32::EPSILON {
            sizes.push(size);
            size += self.step;
        }
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale() {
        let scale = FontScale::default();
        assert!(scale.is_valid());
        assert_eq!(scale.sizes(), vec![14.0, 16.0, 18.0, 20.0, 22.0, 24.0]);
    }

    #[test]
    fn snapping() {
        let scale = FontScale::default();
        assert_eq!(scale.snap(17.2), 18.0);
        assert_eq!(scale.snap(16.9), 16.0);
        assert_eq!(scale.snap(3.0), 14.0);
        assert_eq!(scale.snap(40.0), 24.0);
        assert_eq!(scale.snap(f32::NAN), 16.0);
    }

    #[test]
    fn stepping_stops_at_the_ends() {
        let scale = FontScale::default();
        assert_eq!(scale.increase(16.0), 18.0);
        assert_eq!(scale.increase(24.0), 24.0);
        assert_eq!(scale.decrease(16.0), 14.0);
        assert_eq!(scale.decrease(14.0), 14.0);
    }

    #[test]
    fn rejects_inverted_or_zero_step_scales() {
        let scale = FontScale { min: 20.0, max: 10.0, ..Default::default() };
        assert!(!scale.is_valid());
        let flat = FontScale { step: 0.0, ..Default::default() };
        assert!(!flat.is_valid());
        assert_eq!(flat.snap(17.0), 17.0);
        assert!(flat.sizes().is_empty());
    }
}
