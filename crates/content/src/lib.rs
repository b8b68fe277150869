//! # folio-content
//!
//! Turns raw chapter content into the canonical paragraph list the rest of the
//! reader works on, plus the small amount of HTML awareness the matcher and the
//! text-metrics oracle share:
//!
//! - [`normalize`]: blank-line paragraph splitting, block wrapping, placeholder policy
//! - [`html`]: a minimal, allocation-free tag scanner
//! - [`text`]: plain-text extraction, entity decoding and escaping

pub mod html;
pub mod normalize;
pub mod text;

pub use html::{Tag, TagKind, Token, is_block_element, is_void_element, scan_tags, tokens};
pub use normalize::{
    DEFAULT_PLACEHOLDER, NormalizeOptions, normalize, normalize_with, placeholder_paragraph,
};
pub use text::{decode_entities, escape_attr, escape_html, plain_text};
