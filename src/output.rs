//! Writes rendered charts to disk: one SVG (and/or PNG) per chart, the host
//! HTML page and, on request, the box plot summary as JSON.

use crate::charts::StaticChartRenderer;
use crate::pipeline::{ChartKind, ChartOutput, PipelineError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

pub const PAGE_FILE: &str = "index.html";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
    Both,
}

impl OutputFormat {
    fn svg(self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Both)
    }

    fn png(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Both)
    }
}

/// Files written by one run.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub page: PathBuf,
    pub files: Vec<PathBuf>,
    pub failed: Vec<ChartKind>,
    /// Charts whose SVG was written but whose PNG could not be painted.
    pub png_failed: Vec<ChartKind>,
}

impl OutputReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.png_failed.is_empty()
    }
}

pub struct OutputWriter {
    out_dir: PathBuf,
    format: OutputFormat,
    summary: bool,
}

impl OutputWriter {
    pub fn new(out_dir: impl Into<PathBuf>, format: OutputFormat, summary: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            format,
            summary,
        }
    }

    pub fn write(
        &self,
        results: &[(ChartKind, Result<ChartOutput, PipelineError>)],
    ) -> Result<OutputReport, OutputError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| OutputError::Io {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut report = OutputReport::default();
        let mut rendered = Vec::new();

        for (kind, result) in results {
            let Ok(output) = result else {
                report.failed.push(*kind);
                continue;
            };
            rendered.push(output);

            if self.format.svg() {
                let path = self.out_dir.join(format!("{}.svg", kind.id()));
                write_file(&path, &output.svg)?;
                report.files.push(path);
            }
            if self.format.png() {
                let path = self.out_dir.join(format!("{}.png", kind.id()));
                match StaticChartRenderer::render_png(&output.scene, &path) {
                    Ok(()) => report.files.push(path),
                    Err(e) => {
                        error!(chart = kind.id(), error = %e, "png export failed");
                        report.png_failed.push(*kind);
                    }
                }
            }
            if self.summary {
                if let Some(summaries) = &output.summaries {
                    let path = self.out_dir.join(SUMMARY_FILE);
                    write_file(&path, &serde_json::to_string_pretty(summaries)?)?;
                    report.files.push(path);
                }
            }
        }

        report.page = self.out_dir.join(PAGE_FILE);
        write_file(&report.page, &host_page(&rendered))?;

        info!(
            out_dir = %self.out_dir.display(),
            files = report.files.len() + 1,
            failed = report.failed.len(),
            png_failed = report.png_failed.len(),
            "outputs written"
        );
        Ok(report)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    fs::write(path, contents).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// HTML page with one container per chart, in box, bar, line order. Charts
/// that failed keep an empty container.
pub fn host_page(outputs: &[&ChartOutput]) -> String {
    let mut page = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Social Media Engagement</title>\n</head>\n<body>\n",
    );
    for kind in ChartKind::ALL {
        page.push_str(&format!("<div id=\"{}\">\n", kind.id()));
        if let Some(output) = outputs.iter().find(|o| o.kind == kind) {
            page.push_str(output.svg.trim());
            page.push('\n');
        }
        page.push_str("</div>\n");
    }
    page.push_str("</body>\n</html>\n");
    page
}
