use folio_types::PageStyle;

/// Remembers the last page style that was valid to measure with.
///
/// A zero, negative or non-finite font size or box dimension would make the
/// paginator spin on empty pages, so such a style is replaced by the last good
/// one instead of being measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleGuard {
    last_good: PageStyle,
}

impl Default for StyleGuard {
    fn default() -> Self {
        Self {
            last_good: PageStyle::default(),
        }
    }
}

impl StyleGuard {
    /// Starts from `initial`, or from the default style if `initial` is invalid.
    pub fn new(initial: PageStyle) -> Self {
        let mut guard = Self::default();
        guard.resolve(initial);
        guard
    }

    pub fn last_good(&self) -> PageStyle {
        self.last_good
    }

    /// The style to measure with for a `requested` style.
    pub fn resolve(&mut self, requested: PageStyle) -> PageStyle {
        if requested.is_valid() {
            self.last_good = requested;
            return requested;
        }
        log::warn!(
            "Ignoring unusable page style (font size {}, box {}x{}); keeping font size {} in a {}x{} box.",
            requested.font_size,
            requested.container.width,
            requested.container.height,
            self.last_good.font_size,
            self.last_good.container.width,
            self.last_good.container.height,
        );
        self.last_good
    }
}
