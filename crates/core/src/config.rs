use crate::error::ReaderError;
use crate::font_scale::FontScale;
use folio_annotate::MarkerStyle;
use folio_content::{DEFAULT_PLACEHOLDER, NormalizeOptions};
use folio_layout::TextMetrics;
use folio_types::{PageStyle, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a [`ReaderSession`](crate::ReaderSession) needs besides the oracle.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use folio_core::ReaderConfig;
///
/// let config = ReaderConfig::from_json(r#"{ "viewport": { "width": 360, "height": 640 } }"#).unwrap();
/// assert_eq!(config.viewport.width, 360.0);
/// assert_eq!(config.font_scale.default, 16.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReaderConfig {
    pub font_scale: FontScale,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Initial reading container box.
    pub viewport: Size,
    /// Shown when a chapter has no content.
    pub placeholder_text: String,
    /// Render single line breaks inside a paragraph as `<br>`.
    pub preserve_line_breaks: bool,
    pub marker_class: String,
    /// Used by the CLI's text-metrics oracle.
    pub metrics: TextMetrics,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        let style = PageStyle::default();
        Self {
            font_scale: FontScale::default(),
            line_height: style.line_height,
            viewport: style.container,
            placeholder_text: DEFAULT_PLACEHOLDER.to_string(),
            preserve_line_breaks: false,
            marker_class: MarkerStyle::default().class,
            metrics: TextMetrics::default(),
        }
    }
}

impl ReaderConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ReaderError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        log::debug!("Loading reader configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ReaderError> {
        if !self.font_scale.is_valid() {
            return Err(ReaderError::Config(format!(
                "font scale {}..={} step {} (default {}) is not usable",
                self.font_scale.min, self.font_scale.max, self.font_scale.step, self.font_scale.default
            )));
        }
        if !(self.line_height.is_finite() && self.line_height > 0.0) {
            return Err(ReaderError::Config(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        if !self.viewport.is_usable() {
            return Err(ReaderError::Config(format!(
                "viewport {}x{} is not usable",
                self.viewport.width, self.viewport.height
            )));
        }
        if !self.metrics.is_valid() {
            return Err(ReaderError::Config(format!("text metrics {:?} are not usable", self.metrics)));
        }
        if self.marker_class.trim().is_empty() {
            return Err(ReaderError::Config("marker class must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            placeholder_text: self.placeholder_text.clone(),
            preserve_line_breaks: self.preserve_line_breaks,
        }
    }

    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle {
            class: self.marker_class.clone(),
        }
    }

    pub fn page_style(&self, font_size: f32, viewport: Size) -> PageStyle {
        PageStyle::new(font_size, self.line_height, viewport)
    }
}
