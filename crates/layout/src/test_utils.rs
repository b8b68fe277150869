use folio_content::plain_text;
use folio_traits::{Fit, FnOracle, LayoutOracle, MeasureError, MeasureSurface};
use folio_types::{PageStyle, Paragraph};
use std::cell::Cell;
use std::rc::Rc;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn paragraphs(texts: &[&str]) -> Vec<Paragraph> {
    texts.iter().map(|t| Paragraph::new(format!("<p>{t}</p>"))).collect()
}

/// Fits while the page's plain text is at most `budget` characters long.
pub fn char_budget_oracle(budget: usize) -> FnOracle {
    FnOracle::new("char-budget", move |html: &str, _style: &PageStyle| {
        if plain_text(html).chars().count() <= budget {
            Fit::Fits
        } else {
            Fit::Overflows
        }
    })
}

/// Bookkeeping shared between a [`CountingOracle`] and the test.
#[derive(Debug, Default)]
pub struct Counters {
    pub opened: Cell<usize>,
    pub dropped: Cell<usize>,
    pub measured: Cell<usize>,
}

/// Wraps an oracle and counts surfaces and measurements. Fails the measurement
/// numbered `fail_at` (1-based) when set.
#[derive(Debug)]
pub struct CountingOracle<O> {
    inner: O,
    pub counters: Rc<Counters>,
    fail_at: Option<usize>,
}

impl<O: LayoutOracle> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            counters: Rc::default(),
            fail_at: None,
        }
    }

    pub fn failing_at(mut self, measurement: usize) -> Self {
        self.fail_at = Some(measurement);
        self
    }
}

struct CountingSurface<'a> {
    inner: Box<dyn MeasureSurface + 'a>,
    counters: Rc<Counters>,
    fail_at: Option<usize>,
}

impl MeasureSurface for CountingSurface<'_> {
    fn fit(&mut self, candidate_html: &str) -> Result<Fit, MeasureError> {
        let n = self.counters.measured.get() + 1;
        self.counters.measured.set(n);
        if self.fail_at == Some(n) {
            return Err(MeasureError::Failed(format!("measurement {n} failed")));
        }
        self.inner.fit(candidate_html)
    }
}

impl Drop for CountingSurface<'_> {
    fn drop(&mut self) {
        self.counters.dropped.set(self.counters.dropped.get() + 1);
    }
}

impl<O: LayoutOracle> LayoutOracle for CountingOracle<O> {
    fn open_surface(&self, style: &PageStyle) -> Result<Box<dyn MeasureSurface + '_>, MeasureError> {
        let inner = self.inner.open_surface(style)?;
        self.counters.opened.set(self.counters.opened.get() + 1);
        Ok(Box::new(CountingSurface {
            inner,
            counters: Rc::clone(&self.counters),
            fail_at: self.fail_at,
        }))
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// An oracle whose surface can never be opened.
#[derive(Debug)]
pub struct UnavailableOracle;

impl LayoutOracle for UnavailableOracle {
    fn open_surface(&self, _style: &PageStyle) -> Result<Box<dyn MeasureSurface + '_>, MeasureError> {
        Err(MeasureError::Unavailable("no staging surface".to_string()))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}
