// src/pipeline.rs
use crate::extractors::{ExtractionRecord, MetricsExtractor, PdfDocument};
use crate::report::{self, ChartRenderer};
use crate::utils::AppError;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MISSING_DOCUMENT_MESSAGE: &str = "PDF file not found.";

#[derive(Debug)]
pub enum PipelineOutcome {
    /// The expected document was not on disk; nothing was extracted.
    DocumentMissing,
    Completed {
        record: ExtractionRecord,
        charts_rendered: usize,
        /// Where each rendered chart was written, GHG chart first.
        chart_paths: Vec<PathBuf>,
    },
}

/// Extracts metrics from the document at `path` and renders both charts.
///
/// A missing document prints the diagnostic to `out` and is not an error. An
/// unreadable document is. Chart failures are logged and skipped.
pub fn process_report<R, W>(
    path: &Path,
    extractor: &MetricsExtractor,
    renderer: &mut R,
    out: &mut W,
) -> Result<PipelineOutcome, AppError>
where
    R: ChartRenderer + ?Sized,
    W: Write + ?Sized,
{
    if !path.exists() {
        tracing::warn!("Expected report not present at {}", path.display());
        writeln!(out, "{}", MISSING_DOCUMENT_MESSAGE)?;
        return Ok(PipelineOutcome::DocumentMissing);
    }

    let document = PdfDocument::open(path)?;
    tracing::info!("Extracting metrics from {} pages", document.page_count());
    let record = extractor.extract(&document);

    let mut chart_paths = Vec::new();
    for chart in [report::ghg_chart(&record), report::energy_chart(&record)] {
        match renderer.render(&chart) {
            Ok(path) => chart_paths.push(path),
            Err(e) => tracing::warn!("Skipping chart '{}': {}", chart.title, e),
        }
    }

    Ok(PipelineOutcome::Completed {
        record,
        charts_rendered: chart_paths.len(),
        chart_paths,
    })
}
