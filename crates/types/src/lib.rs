pub mod annotation;
pub mod document;
pub mod geometry;
pub mod ids;
pub mod style;

pub use annotation::{Annotation, AnnotationKind, RenderHint};
pub use document::{Page, Paragraph};
pub use geometry::Size;
pub use ids::{AnnotationId, ChapterKey};
pub use style::PageStyle;
