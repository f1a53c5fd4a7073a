//! Writing the compiled report to the reports directory.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ReportError;
use crate::report::Report;

pub const INSIGHTS_FILE: &str = "insights.json";
pub const EVALUATIONS_FILE: &str = "evaluations.json";
pub const CREATIVES_FILE: &str = "creatives.json";
pub const MARKDOWN_FILE: &str = "report.md";

/// Locations of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    pub insights: PathBuf,
    pub evaluations: PathBuf,
    pub creatives: PathBuf,
    pub markdown: PathBuf,
}

/// Write the JSON artifacts and the markdown report into `reports_dir`,
/// creating the directory if needed. Existing files are overwritten.
///
/// # Errors
///
/// Returns [`ReportError`] if the directory cannot be created, a payload
/// cannot be serialized, or a file cannot be written.
pub fn write_report(report: &Report, reports_dir: &Path) -> Result<ArtifactPaths, ReportError> {
    std::fs::create_dir_all(reports_dir).map_err(|e| ReportError::Io {
        path: reports_dir.display().to_string(),
        source: e,
    })?;

    let paths = ArtifactPaths {
        insights: reports_dir.join(INSIGHTS_FILE),
        evaluations: reports_dir.join(EVALUATIONS_FILE),
        creatives: reports_dir.join(CREATIVES_FILE),
        markdown: reports_dir.join(MARKDOWN_FILE),
    };

    write_json(&paths.insights, "hypotheses", report.hypotheses())?;
    write_json(&paths.evaluations, "evaluations", report.evaluations())?;
    write_json(&paths.creatives, "creative suggestions", report.creatives())?;
    write_text(&paths.markdown, &report.to_markdown())?;

    tracing::info!(dir = %reports_dir.display(), "report artifacts written");
    Ok(paths)
}

pub(crate) fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    context: &str,
    value: &T,
) -> Result<(), ReportError> {
    let body = serde_json::to_string_pretty(value).map_err(|e| ReportError::Serialize {
        context: context.to_string(),
        source: e,
    })?;
    write_text(path, &body)
}

fn write_text(path: &Path, body: &str) -> Result<(), ReportError> {
    std::fs::write(path, body).map_err(|e| ReportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
