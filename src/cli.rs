//! The `folio` command: paginate one chapter file with the text-metrics oracle.

use crate::{Annotation, ChapterKey, ReaderConfig, ReaderError, ReaderSession, Size, TextMetricsOracle};
use clap::Parser;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about = "Paginate and annotate a chapter", long_about = None)]
#[command(after_help = "EXAMPLES:
    folio chapter.txt                          List pages at the default size
    folio chapter.txt -a notes.json --json     Pages with annotations, as JSON
    folio chapter.txt --font-size 20 --width 360 --height 640
    folio chapter.txt -a notes.json --continuous")]
pub struct Cli {
    /// Chapter content: blank-line separated paragraphs, HTML allowed
    #[arg(value_name = "CHAPTER")]
    pub chapter: PathBuf,

    /// Annotations as a JSON array of {"id", "text", "kind", "color"?}
    #[arg(short, long, value_name = "FILE")]
    pub annotations: Option<PathBuf>,

    /// Reader configuration (JSON); missing fields use defaults
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Font size in pixels, snapped to the configured scale
    #[arg(short, long)]
    pub font_size: Option<f32>,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: Option<f32>,

    /// Viewport height in pixels
    #[arg(long)]
    pub height: Option<f32>,

    /// Part number, used in log output
    #[arg(long, default_value_t = 1)]
    pub part: u32,

    /// Chapter number within the part, used in log output
    #[arg(long = "number", default_value_t = 1)]
    pub number: u32,

    /// Print the pagination as JSON
    #[arg(long, conflicts_with = "continuous")]
    pub json: bool,

    /// Print the decorated chapter as one document instead of pages
    #[arg(long)]
    pub continuous: bool,
}

/// Reads an annotation list in the collaborator store's JSON shape.
pub fn load_annotations(path: &Path) -> Result<Vec<Annotation>, ReaderError> {
    let json = fs::read_to_string(path)?;
    let annotations: Vec<Annotation> = serde_json::from_str(&json)?;
    log::debug!("Loaded {} annotations from {}", annotations.len(), path.display());
    Ok(annotations)
}

/// Builds a session with the chapter open, applying the command line overrides.
pub fn open_session(cli: &Cli) -> Result<ReaderSession<TextMetricsOracle>, ReaderError> {
    let mut config = match &cli.config {
        Some(path) => ReaderConfig::from_file(path)?,
        None => ReaderConfig::default(),
    };
    if cli.width.is_some() || cli.height.is_some() {
        config.viewport = Size::new(
            cli.width.unwrap_or(config.viewport.width),
            cli.height.unwrap_or(config.viewport.height),
        );
        config.validate()?;
    }

    let content = fs::read_to_string(&cli.chapter)?;
    let annotations = match &cli.annotations {
        Some(path) => load_annotations(path)?,
        None => Vec::new(),
    };

    let oracle = TextMetricsOracle::new(config.metrics);
    let mut session = ReaderSession::new(config, oracle);
    if let Some(size) = cli.font_size {
        session.set_font_size(size);
    }
    session.open_chapter(ChapterKey::new(cli.part, cli.number), Some(content.as_str()), &annotations);
    Ok(session)
}

/// Formats the session the way the command line asked for.
pub fn render(cli: &Cli, session: &ReaderSession<TextMetricsOracle>) -> Result<String, ReaderError> {
    if cli.continuous {
        return Ok(session.continuous_html());
    }
    if cli.json {
        return Ok(serde_json::to_string_pretty(session.pagination())?);
    }

    let pagination = session.pagination();
    let style = pagination.style;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} pages | font {}px | box {}x{}{}",
        pagination.len(),
        style.font_size,
        style.container.width,
        style.container.height,
        if pagination.degraded { " | degraded" } else { "" }
    );
    for page in pagination.iter() {
        let range = page.paragraph_range();
        let _ = writeln!(
            out,
            "--- page {}/{} (paragraphs {}-{}){} ---",
            page.index + 1,
            pagination.len(),
            range.start + 1,
            range.end,
            if page.overflows { " overflows" } else { "" }
        );
        let _ = writeln!(out, "{}", page.html);
    }
    Ok(out)
}

pub fn run(cli: &Cli) -> Result<String, ReaderError> {
    let session = open_session(cli)?;
    render(cli, &session)
}
