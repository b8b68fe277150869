//! # folio-layout
//!
//! Splits a chapter's paragraphs into pages that fit a measured box.
//!
//! The [`Paginator`] packs whole paragraphs greedily, asking a
//! [`LayoutOracle`](folio_traits::LayoutOracle) whether each candidate page
//! overflows. It never fails: an invalid style falls back to the last style
//! that worked, and a failing oracle degrades the chapter to one page per
//! paragraph.
//!
//! [`TextMetricsOracle`] is a deterministic oracle for headless use (the CLI,
//! benches and tests) that estimates rendered height from character counts.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    Measure(#[from] folio_traits::MeasureError),
    #[error("Page {0} was finalized without any paragraphs.")]
    EmptyPage(usize),
}

pub mod config;
pub mod metrics;
pub mod paginator;
pub mod style;
pub mod wrap;

pub use self::config::TextMetrics;
pub use self::metrics::TextMetricsOracle;
pub use self::paginator::{Pagination, Paginator, paginate, render_page};
pub use self::style::StyleGuard;

// Re-export the fit primitives so callers of the layout crate need not depend
// on folio-traits directly.
pub use folio_traits::{Fit, LayoutOracle, MeasureError, Measurement, check_fit};

#[cfg(test)]
mod paginator_test;
#[cfg(test)]
mod test_utils;
