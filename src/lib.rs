//! # folio
//!
//! Reading core for serialized fiction: splits chapters into pages that fit the
//! reader's viewport and overlays highlights and author notes onto the text.
//!
//! ```
//! use folio::{ChapterKey, ReaderConfig, ReaderSession, TextMetricsOracle, Annotation};
//!
//! let mut session = ReaderSession::new(ReaderConfig::default(), TextMetricsOracle::default());
//! session.open_chapter(
//!     ChapterKey::new(1, 1),
//!     Some("la estrella muerta brilla"),
//!     &[Annotation::highlight("h1", "estrella muerta")],
//! );
//! assert_eq!(session.page_count(), 1);
//! assert!(session.page().html.contains("data-marker-id=\"h1\""));
//! ```

pub use folio_core::*;

pub use folio_annotate::{Annotator, MarkerStyle, apply_annotations, build_pattern, strip_markers};
pub use folio_content::{NormalizeOptions, normalize, normalize_with, plain_text};
pub use folio_layout::{Paginator, paginate, render_page};

pub mod cli;
