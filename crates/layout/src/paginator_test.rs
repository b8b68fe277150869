use crate::paginator::{Paginator, paginate, render_page};
use crate::test_utils::{CountingOracle, UnavailableOracle, char_budget_oracle, init_logs, paragraphs};
use folio_content::{normalize, plain_text};
use folio_traits::LayoutOracle;
use folio_types::{PageStyle, Paragraph};

const TEN: &str = "aaaaaaaaaa";

fn ranges(pagination: &crate::Pagination) -> Vec<std::ops::Range<usize>> {
    pagination.iter().map(|p| p.paragraph_range()).collect()
}

#[test]
fn empty_input_yields_one_placeholder_page() {
    init_logs();
    let pagination = paginate(&[], &char_budget_oracle(100), PageStyle::default());

    assert_eq!(pagination.len(), 1);
    let page = &pagination.pages[0];
    assert!(page.is_placeholder());
    assert!(page.html.contains("folio-placeholder"));
    assert!(!pagination.degraded);
}

#[test]
fn missing_content_yields_one_page() {
    let paragraphs = normalize(None);
    let pagination = paginate(&paragraphs, &char_budget_oracle(100), PageStyle::default());
    assert_eq!(pagination.len(), 1);
    assert_eq!(pagination.pages[0].paragraph_count, 1);
}

#[test]
fn long_second_paragraph_gets_its_own_overflowing_page() {
    init_logs();
    let paragraphs = paragraphs(&[
        "Hello world.",
        "Second paragraph that is very long and keeps going well past what one page can hold.",
    ]);
    let pagination = paginate(&paragraphs, &char_budget_oracle(12), PageStyle::default());

    assert_eq!(ranges(&pagination), vec![0..1, 1..2]);
    assert_eq!(pagination.pages[0].html, "<p>Hello world.</p>");
    assert!(!pagination.pages[0].overflows);
    assert!(pagination.pages[1].overflows);
    assert_eq!(pagination.pages[1].html, paragraphs[1].as_html());
}

#[test]
fn packs_greedily() {
    let paragraphs = paragraphs(&[TEN; 5]);
    let pagination = paginate(&paragraphs, &char_budget_oracle(25), PageStyle::default());

    assert_eq!(ranges(&pagination), vec![0..2, 2..4, 4..5]);
    let indices: Vec<usize> = pagination.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(pagination.pages[0].html, render_page(&paragraphs[0..2]));
    assert_eq!(pagination.paragraph_count(), 5);
}

#[test]
fn leading_oversized_paragraph_is_a_singleton() {
    let long = TEN.repeat(4);
    let paragraphs = paragraphs(&[long.as_str(), TEN, TEN]);
    let pagination = paginate(&paragraphs, &char_budget_oracle(25), PageStyle::default());

    assert_eq!(ranges(&pagination), vec![0..1, 1..3]);
    assert!(pagination.pages[0].overflows);
    assert!(!pagination.pages[1].overflows);
}

#[test]
fn only_singleton_pages_overflow() {
    let (thirty, twenty) = (TEN.repeat(3), TEN.repeat(2));
    let paragraphs = paragraphs(&["short", thirty.as_str(), "tiny", "medium length", twenty.as_str(), "x", "y"]);
    let oracle = char_budget_oracle(22);
    let pagination = paginate(&paragraphs, &oracle, PageStyle::default());
    let mut surface = oracle.open_surface(&pagination.style).unwrap();

    for page in pagination.iter() {
        let fits = !surface.fit(&page.html).unwrap().overflows();
        if page.paragraph_count > 1 {
            assert!(fits, "page {} overflows", page.index);
        }
        assert_eq!(page.overflows, !fits, "page {}", page.index);
    }
}

#[test]
fn no_content_is_lost() {
    let fifty = TEN.repeat(5);
    let paragraphs = paragraphs(&["one <em>two</em>", "three", fifty.as_str(), "four &amp; five", "six"]);
    let pagination = paginate(&paragraphs, &char_budget_oracle(20), PageStyle::default());

    let paged: Vec<String> = pagination.iter().map(|p| plain_text(&p.html)).collect();
    let source: Vec<String> = paragraphs.iter().map(|p| plain_text(p.as_html())).collect();
    assert_eq!(paged.join(" "), source.join(" "));
}

#[test]
fn pagination_is_deterministic() {
    let paragraphs = paragraphs(&["a b c", TEN, "d e f g h", TEN, TEN, "i"]);
    let oracle = char_budget_oracle(18);
    let style = PageStyle::default();
    assert_eq!(paginate(&paragraphs, &oracle, style), paginate(&paragraphs, &oracle, style));
}

#[test]
fn one_surface_per_pass_and_linear_measurements() {
    let paragraphs = paragraphs(&[TEN; 5]);
    let oracle = CountingOracle::new(char_budget_oracle(25));
    paginate(&paragraphs, &oracle, PageStyle::default());

    assert_eq!(oracle.counters.opened.get(), 1);
    assert_eq!(oracle.counters.dropped.get(), 1);
    assert_eq!(oracle.counters.measured.get(), 7);
}

#[test]
fn failing_measurement_degrades_to_one_page_per_paragraph() {
    init_logs();
    let paragraphs = paragraphs(&[TEN; 5]);
    let oracle = CountingOracle::new(char_budget_oracle(25)).failing_at(3);
    let pagination = paginate(&paragraphs, &oracle, PageStyle::default());

    assert!(pagination.degraded);
    assert_eq!(ranges(&pagination), vec![0..1, 1..2, 2..3, 3..4, 4..5]);
    assert_eq!(pagination.pages[3].index, 3);
    assert_eq!(oracle.counters.dropped.get(), oracle.counters.opened.get());
}

#[test]
fn unavailable_surface_degrades_too() {
    let paragraphs = paragraphs(&["a", "b"]);
    let pagination = paginate(&paragraphs, &UnavailableOracle, PageStyle::default());
    assert!(pagination.degraded);
    assert_eq!(pagination.len(), 2);
}

#[test]
fn invalid_style_uses_last_good_one() {
    init_logs();
    let good = PageStyle::default().with_font_size(20.0);
    let mut paginator = Paginator::with_style(good);
    let paragraphs = paragraphs(&["a", "b"]);
    let oracle = char_budget_oracle(100);

    let pagination = paginator.paginate(&paragraphs, &oracle, good.with_font_size(0.0));
    assert_eq!(pagination.style, good);
    assert_eq!(pagination.len(), 1);
    assert!(!pagination.degraded);

    let larger = good.with_font_size(22.0);
    paginator.paginate(&paragraphs, &oracle, larger);
    assert_eq!(paginator.last_good_style(), larger);
}

#[test]
fn page_lookup_by_paragraph() {
    let paragraphs: Vec<Paragraph> = paragraphs(&[TEN; 5]);
    let pagination = paginate(&paragraphs, &char_budget_oracle(25), PageStyle::default());

    assert_eq!(pagination.page_of_paragraph(0), Some(0));
    assert_eq!(pagination.page_of_paragraph(3), Some(1));
    assert_eq!(pagination.page_of_paragraph(4), Some(2));
    assert_eq!(pagination.page_of_paragraph(9), None);
    assert_eq!(pagination.page(2).map(|p| p.first_paragraph), Some(4));
    assert!(pagination.page(3).is_none());
}

#[test]
fn placeholder_text_is_configurable() {
    let mut paginator = Paginator::new().with_placeholder("Coming soon.");
    let pagination = paginator.paginate(&[], &char_budget_oracle(100), PageStyle::default());
    assert_eq!(plain_text(&pagination.pages[0].html), "Coming soon.");
}
