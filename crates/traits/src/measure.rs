//! The measurement seam between the paginator and whatever renders pages.
//!
//! A [`LayoutOracle`] answers one question: does this candidate page HTML,
//! rendered under a given [`PageStyle`], overflow the container box? The
//! paginator never touches a layout engine directly.
//!
//! Measuring happens on a staging surface opened once per pagination pass with
//! [`LayoutOracle::open_surface`]. The surface is released when the returned box
//! is dropped, so it cannot outlive the pass, whichever way the pass ends.
//!
//! # Example
//!
//! ```
//! use folio_traits::{Fit, FnOracle, LayoutOracle};
//! use folio_types::PageStyle;
//!
//! // Fits while the candidate has fewer than 200 bytes of markup.
//! let oracle = FnOracle::new("byte-budget", |html, _style| {
//!     if html.len() < 200 { Fit::Fits } else { Fit::Overflows }
//! });
//! let mut surface = oracle.open_surface(&PageStyle::default()).unwrap();
//! assert_eq!(surface.fit("<p>short</p>").unwrap(), Fit::Fits);
//! ```

use folio_types::PageStyle;
use std::fmt::{self, Debug};
use thiserror::Error;

/// Error type for measurement operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("Measurement surface unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to measure candidate page: {0}")]
    Failed(String),

    #[error("Cannot measure with font size {font_size} in a {width}x{height} box")]
    InvalidStyle {
        font_size: f32,
        width: f32,
        height: f32,
    },
}

impl MeasureError {
    pub fn invalid_style(style: &PageStyle) -> Self {
        MeasureError::InvalidStyle {
            font_size: style.font_size,
            width: style.container.width,
            height: style.container.height,
        }
    }
}

/// Whether a candidate page fits its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Fits,
    Overflows,
}

impl Fit {
    pub fn overflows(self) -> bool {
        self == Fit::Overflows
    }
}

/// A measured content height against the height available to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub content_height: f32,
    pub box_height: f32,
}

impl Measurement {
    pub fn fit(&self) -> Fit {
        check_fit(self.content_height, self.box_height)
    }
}

/// Centralized check of whether content of a given height fits in a box.
///
/// A small epsilon absorbs floating point noise from summed line heights.
pub fn check_fit(content_height: f32, box_height: f32) -> Fit {
    const EPSILON: f32 = 0.01;
    if content_height > box_height.max(0.0) + EPSILON {
        Fit::Overflows
    } else {
        Fit::Fits
    }
}

/// A single-use staging area that candidate pages are rendered into.
///
/// Implementations release whatever they acquired (a detached DOM node, a
/// scratch layout tree) in `Drop`.
pub trait MeasureSurface {
    /// Measure `candidate_html` against the box this surface was opened for.
    fn fit(&mut self, candidate_html: &str) -> Result<Fit, MeasureError>;
}

/// A source of measurement surfaces.
///
/// Oracles must be pure functions of (HTML, style): two surfaces opened with
/// the same style must give the same answer for the same HTML.
pub trait LayoutOracle: Debug {
    /// Open a fresh staging surface for one pagination pass under `style`.
    fn open_surface(&self, style: &PageStyle) -> Result<Box<dyn MeasureSurface + '_>, MeasureError>;

    /// Returns a human-readable name for this oracle (for logging/debugging).
    fn name(&self) -> &'static str;
}

type FitFn = dyn Fn(&str, &PageStyle) -> Result<Fit, MeasureError>;

/// An oracle backed by a closure. Handy for fakes in tests and for embedding
/// hosts that already own a layout engine.
pub struct FnOracle {
    name: &'static str,
    fit: Box<FitFn>,
}

impl FnOracle {
    pub fn new<F>(name: &'static str, fit: F) -> Self
    where
        F: Fn(&str, &PageStyle) -> Fit + 'static,
    {
        Self {
            name,
            fit: Box::new(move |html: &str, style: &PageStyle| Ok(fit(html, style))),
        }
    }

    pub fn fallible<F>(name: &'static str, fit: F) -> Self
    where
        F: Fn(&str, &PageStyle) -> Result<Fit, MeasureError> + 'static,
    {
        Self {
            name,
            fit: Box::new(fit),
        }
    }
}

impl Debug for FnOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOracle").field("name", &self.name).finish()
    }
}

struct FnSurface<'a> {
    fit: &'a FitFn,
    style: PageStyle,
}

impl MeasureSurface for FnSurface<'_> {
    fn fit(&mut self, candidate_html: &str) -> Result<Fit, MeasureError> {
        (self.fit)(candidate_html, &self.style)
    }
}

impl LayoutOracle for FnOracle {
    fn open_surface(&self, style: &PageStyle) -> Result<Box<dyn MeasureSurface + '_>, MeasureError> {
        Ok(Box::new(FnSurface {
            fit: self.fit.as_ref(),
            style: *style,
        }))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
