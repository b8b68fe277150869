//! Highlights and author notes anchored to chapter text.
//!
//! Annotations are owned by an external store; the reader core only reads them.
//! The wire shape used by the store is `{ "id", "text", "kind", "color"?, "display"? }`,
//! which is mapped onto [`Annotation`] through [`AnnotationRecord`].

use crate::ids::AnnotationId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Background colour given to highlights that were stored without one.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#fff3a3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationKind {
    /// A reader's highlight.
    Highlight,
    /// A note attached by the author.
    #[serde(alias = "note", alias = "authorNote")]
    AuthorNote,
}

impl AnnotationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationKind::Highlight => "highlight",
            AnnotationKind::AuthorNote => "author-note",
        }
    }

    fn default_hint(self) -> RenderHint {
        match self {
            AnnotationKind::Highlight => RenderHint::Color(DEFAULT_HIGHLIGHT_COLOR.to_string()),
            AnnotationKind::AuthorNote => RenderHint::Tooltip,
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the renderer should present a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RenderHint {
    /// Paint the marked text with a background colour (CSS colour string).
    Color(String),
    /// Show the note in a tooltip on hover.
    Tooltip,
    /// Open the note in a modal on click.
    Modal,
}

impl RenderHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderHint::Color(_) => "color",
            RenderHint::Tooltip => "tooltip",
            RenderHint::Modal => "modal",
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            RenderHint::Color(c) => Some(c),
            _ => None,
        }
    }
}

/// A highlight or author note, anchored by substring match on its trigger text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AnnotationRecord", into = "AnnotationRecord")]
pub struct Annotation {
    pub id: AnnotationId,
    pub trigger_text: String,
    pub kind: AnnotationKind,
    pub hint: RenderHint,
}

impl Annotation {
    /// Creates an annotation with the default hint for its kind.
    pub fn new(id: impl Into<AnnotationId>, trigger_text: impl Into<String>, kind: AnnotationKind) -> Self {
        Self {
            id: id.into(),
            trigger_text: trigger_text.into(),
            kind,
            hint: kind.default_hint(),
        }
    }

    pub fn highlight(id: impl Into<AnnotationId>, trigger_text: impl Into<String>) -> Self {
        Self::new(id, trigger_text, AnnotationKind::Highlight)
    }

    pub fn author_note(id: impl Into<AnnotationId>, trigger_text: impl Into<String>) -> Self {
        Self::new(id, trigger_text, AnnotationKind::AuthorNote)
    }

    pub fn with_hint(mut self, hint: RenderHint) -> Self {
        self.hint = hint;
        self
    }

    pub fn with_color(self, color: impl Into<String>) -> Self {
        self.with_hint(RenderHint::Color(color.into()))
    }

    /// Length of the trimmed trigger text in characters. Used to order matching.
    pub fn trigger_len(&self) -> usize {
        self.trigger_text.trim().chars().count()
    }

    /// An annotation can only be anchored if its trigger has visible text.
    pub fn is_anchorable(&self) -> bool {
        !self.trigger_text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Tooltip,
    Modal,
}

/// The annotation shape used by the collaborator store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRecord {
    pub id: AnnotationId,
    #[serde(alias = "triggerText", alias = "trigger_text")]
    pub text: String,
    pub kind: AnnotationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
}

impl From<AnnotationRecord> for Annotation {
    fn from(record: AnnotationRecord) -> Self {
        let hint = match (record.display, record.color) {
            (Some(DisplayMode::Tooltip), _) => RenderHint::Tooltip,
            (Some(DisplayMode::Modal), _) => RenderHint::Modal,
            (None, Some(color)) if !color.trim().is_empty() => RenderHint::Color(color),
            (None, _) => record.kind.default_hint(),
        };
        Self {
            id: record.id,
            trigger_text: record.text,
            kind: record.kind,
            hint,
        }
    }
}

impl From<Annotation> for AnnotationRecord {
    fn from(annotation: Annotation) -> Self {
        let (color, display) = match annotation.hint {
            RenderHint::Color(c) => (Some(c), None),
            RenderHint::Tooltip => (None, Some(DisplayMode::Tooltip)),
            RenderHint::Modal => (None, Some(DisplayMode::Modal)),
        };
        Self {
            id: annotation.id,
            text: annotation.trigger_text,
            kind: annotation.kind,
            color,
            display,
        }
    }
}
