//! # folio-annotate
//!
//! Anchors highlights and author notes to chapter HTML by substring match.
//!
//! Trigger text is compiled into a [`TriggerPattern`] that tolerates irregular
//! whitespace, inline tags between words and HTML entities. The [`Annotator`]
//! then wraps every occurrence in a marker span, longest trigger first, and never
//! wraps a byte that is already inside a marker.

pub mod markers;
pub mod matcher;
pub mod pattern;

pub use markers::{marker_ids, marker_regions, strip_markers};
pub use matcher::{Annotator, MarkerStyle, apply_annotations};
pub use pattern::{PatternError, TriggerPattern, build_pattern, pattern_source};
