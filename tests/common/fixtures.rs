use folio::{Annotation, PageStyle, Size};

/// A chapter the way authors paste it: blank-line paragraphs, stray
/// whitespace, inline markup and entities.
pub const CHAPTER_ONE: &str = "The ship drifted past the <b>red</b> giant for three days.\r\n\r\n\
    Nobody aboard had seen a star die before. Tom &amp; Ana watched from the \
    observation deck while the hull ticked and settled around them.\n\n   \n\n\
    <p class=\"aside\">(The log for that week is missing.)</p>\n\n\
    On the fourth day the giant was gone, and la estrella muerta brilla \
    only in the instruments.";

/// Create a chapter of `count` paragraphs, each `words` words long.
pub fn chapter_of(count: usize, words: usize) -> String {
    (0..count)
        .map(|i| {
            (0..words)
                .map(|w| format!("w{i}x{w}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Highlights and notes for [`CHAPTER_ONE`], in the store's JSON shape.
pub const CHAPTER_ONE_ANNOTATIONS: &str = r##"[
    { "id": "h1", "text": "red giant", "kind": "highlight" },
    { "id": "n1", "text": "giant", "kind": "note" },
    { "id": "h2", "text": "Tom & Ana", "kind": "highlight", "color": "#c6f6d5" },
    { "id": "n2", "text": "la estrella muerta", "kind": "authorNote", "display": "modal" }
]"##;

pub fn chapter_one_annotations() -> Vec<Annotation> {
    serde_json::from_str(CHAPTER_ONE_ANNOTATIONS).expect("CHAPTER_ONE_ANNOTATIONS is valid annotation JSON")
}

/// Create a page style with the default line height
pub fn style(font_size: f32, width: f32, height: f32) -> PageStyle {
    PageStyle::default()
        .with_font_size(font_size)
        .with_container(Size::new(width, height))
}

/// A phone-sized reading box
pub fn phone_style() -> PageStyle {
    style(16.0, 360.0, 560.0)
}
