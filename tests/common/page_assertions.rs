use folio::{Pagination, plain_text, strip_markers};

/// Plain text of every page, markers removed, joined with single spaces.
pub fn pages_text(pagination: &Pagination) -> String {
    pagination
        .iter()
        .map(|page| plain_text(&strip_markers(&page.html)))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assert the number of pages in a pagination
#[macro_export]
macro_rules! assert_page_count {
    ($pagination:expr, $count:expr) => {
        assert_eq!(
            $pagination.len(),
            $count,
            "Expected {} pages, got {}: {:#?}",
            $count,
            $pagination.len(),
            $pagination.pages
        );
    };
}

/// Assert that some page contains specific text
#[macro_export]
macro_rules! assert_pages_contain_text {
    ($pagination:expr, $text:expr) => {
        let text = $crate::common::page_assertions::pages_text(&$pagination);
        assert!(
            text.contains($text),
            "Pages should contain '{}', but their text was:\n{}",
            $text,
            text
        );
    };
}

/// Assert which paragraphs each page holds
#[macro_export]
macro_rules! assert_page_ranges {
    ($pagination:expr, [$($range:expr),* $(,)?]) => {
        let actual: Vec<std::ops::Range<usize>> = $pagination.iter().map(|p| p.paragraph_range()).collect();
        assert_eq!(actual, vec![$($range),*], "unexpected page split");
    };
}
