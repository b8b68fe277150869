use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// The style parameters a page is measured under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// The reading container's client box.
    pub container: Size,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 1.6,
            container: Size::new(640.0, 800.0),
        }
    }
}

impl PageStyle {
    pub fn new(font_size: f32, line_height: f32, container: Size) -> Self {
        Self {
            font_size,
            line_height,
            container,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_container(mut self, container: Size) -> Self {
        self.container = container;
        self
    }

    /// Line box height in pixels.
    pub fn line_px(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// True when every dimension is finite and positive, i.e. measuring under
    /// this style can terminate with non-empty pages.
    pub fn is_valid(&self) -> bool {
        self.font_size.is_finite()
            && self.font_size > 0.0
            && self.line_height.is_finite()
            && self.line_height > 0.0
            && self.container.is_usable()
    }
}
