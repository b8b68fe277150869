use serde::{Deserialize, Serialize};

/// Font metrics used by [`TextMetricsOracle`](crate::TextMetricsOracle).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextMetrics {
    /// Average advance of one character, as a multiple of the font size.
    ///
    /// - **Higher values**: fewer characters per line, so more lines and
    ///   shorter pages.
    /// - **Lower values**: denser lines.
    ///
    /// Defaults to `0.5`, a reasonable average for proportional serif faces.
    pub avg_char_width: f32,

    /// Vertical gap between consecutive blocks, as a multiple of the font size.
    /// Matches a collapsed `margin: 1em 0` on paragraphs when set to `1.0`.
    ///
    /// Defaults to `1.0`.
    pub block_spacing: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            avg_char_width: 0.5,
            block_spacing: 1.0,
        }
    }
}

impl TextMetrics {
    pub fn is_valid(&self) -> bool {
        self.avg_char_width.is_finite()
            && self.avg_char_width > 0.0
            && self.block_spacing.is_finite()
            && self.block_spacing >= 0.0
    }
}
