pub mod fixtures;
pub mod page_assertions;

use folio::{Annotation, PageStyle, Pagination, Paginator, Paragraph, TextMetricsOracle, apply_annotations, normalize};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs the whole pipeline on one chapter: normalize, annotate, paginate with
/// the text-metrics oracle.
pub fn paginate_chapter(raw: Option<&str>, annotations: &[Annotation], style: PageStyle) -> Pagination {
    let paragraphs: Vec<Paragraph> = normalize(raw)
        .iter()
        .map(|p| apply_annotations(p.as_html(), annotations).into())
        .collect();
    Paginator::new().paginate(&paragraphs, &TextMetricsOracle::default(), style)
}
