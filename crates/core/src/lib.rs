//! # folio-core
//!
//! Reading core of a serialized-fiction reader.
//!
//! This crate ties the pipeline together behind one explicit state object:
//! - **content**: raw chapter text → paragraphs (`folio-content`)
//! - **annotate**: highlights and author notes → marker spans (`folio-annotate`)
//! - **layout**: paragraphs → pages that fit the viewport (`folio-layout`)
//! - **session**: [`ReaderSession`], the current chapter, font size, viewport and page
//!
//! ## Design Principle
//!
//! This crate has **no platform dependencies**. Measuring rendered text is the
//! job of a [`LayoutOracle`] supplied by the host; everything else is pure
//! computation over strings.

// Re-export foundation crates
pub use folio_traits as traits;
pub use folio_types as types;

// Re-export algorithm crates
pub use folio_annotate as annotate;
pub use folio_content as content;
pub use folio_layout as layout;

pub mod config;
pub mod error;
pub mod font_scale;
pub mod session;

// Re-export commonly used types from foundation crates
pub use types::{Annotation, AnnotationId, AnnotationKind, ChapterKey, Page, PageStyle, Paragraph, RenderHint, Size};

// Re-export from internal modules
pub use config::ReaderConfig;
pub use error::ReaderError;
pub use font_scale::FontScale;
pub use session::{PageIndexPolicy, ReaderSession};

// Re-export the measurement seam
pub use traits::{Fit, FnOracle, LayoutOracle, MeasureError, MeasureSurface};
pub use layout::{Pagination, TextMetrics, TextMetricsOracle};
