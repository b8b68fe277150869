//! A headless, deterministic [`LayoutOracle`].
//!
//! Rendered height is estimated from the page's text: each block is
//! word-wrapped at the number of average-width characters that fit the box
//! width, each line is one line box tall, and consecutive blocks are separated
//! by the configured block spacing. `<br>` starts a new line inside a block.

use crate::config::TextMetrics;
use crate::wrap::count_lines;
use folio_content::{Token, decode_entities, tokens};
use folio_traits::{Fit, LayoutOracle, MeasureError, MeasureSurface, Measurement};
use folio_types::PageStyle;

#[derive(Debug, Clone, Default)]
pub struct TextMetricsOracle {
    metrics: TextMetrics,
}

impl TextMetricsOracle {
    pub fn new(metrics: TextMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Estimated height of `html` rendered under `style`, against the box height.
    pub fn measure(&self, html: &str, style: &PageStyle) -> Result<Measurement, MeasureError> {
        if !style.is_valid() {
            return Err(MeasureError::invalid_style(style));
        }
        if !self.metrics.is_valid() {
            return Err(MeasureError::Unavailable(format!(
                "unusable text metrics {:?}",
                self.metrics
            )));
        }
        Ok(Measurement {
            content_height: self.content_height(html, style),
            box_height: style.container.height,
        })
    }

    fn content_height(&self, html: &str, style: &PageStyle) -> f32 {
        let char_px = style.font_size * self.metrics.avg_char_width;
        let max_chars = (style.container.width / char_px).floor().max(1.0) as usize;
        let mut blocks = BlockCounter::new(max_chars);

        for token in tokens(html) {
            match token {
                Token::Text { text, .. } => blocks.push_text(&decode_entities(text)),
                Token::Tag(tag) if tag.is("br") => blocks.break_line(),
                Token::Tag(tag) if tag.is_block() => blocks.end_block(),
                Token::Tag(_) => {}
            }
        }
        blocks.end_block();

        let gaps = blocks.blocks.saturating_sub(1) as f32;
        blocks.lines as f32 * style.line_px() + gaps * self.metrics.block_spacing * style.font_size
    }
}

/// Line and block totals for one page.
struct BlockCounter {
    max_chars: usize,
    blocks: usize,
    lines: usize,
    block_lines: usize,
    run: String,
}

impl BlockCounter {
    fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            blocks: 0,
            lines: 0,
            block_lines: 0,
            run: String::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        self.run.push_str(text);
    }

    /// A forced break always produces a line, even an empty one.
    fn break_line(&mut self) {
        self.block_lines += count_lines(&self.run, self.max_chars).max(1);
        self.run.clear();
    }

    fn end_block(&mut self) {
        self.block_lines += count_lines(&self.run, self.max_chars);
        self.run.clear();
        if self.block_lines > 0 {
            self.blocks += 1;
            self.lines += self.block_lines;
            self.block_lines = 0;
        }
    }
}

struct TextMetricsSurface<'a> {
    oracle: &'a TextMetricsOracle,
    style: PageStyle,
}

impl MeasureSurface for TextMetricsSurface<'_> {
    fn fit(&mut self, candidate_html: &str) -> Result<Fit, MeasureError> {
        Ok(self.oracle.measure(candidate_html, &self.style)?.fit())
    }
}

impl LayoutOracle for TextMetricsOracle {
    fn open_surface(&self, style: &PageStyle) -> Result<Box<dyn MeasureSurface + '_>, MeasureError> {
        if !style.is_valid() {
            return Err(MeasureError::invalid_style(style));
        }
        Ok(Box::new(TextMetricsSurface {
            oracle: self,
            style: *style,
        }))
    }

    fn name(&self) -> &'static str {
        "text-metrics"
    }
}
