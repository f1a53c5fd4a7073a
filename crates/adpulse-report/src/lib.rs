//! Report compilation and artifact output for the adpulse pipeline.

pub mod error;
pub mod markdown;
pub mod output;
pub mod report;
pub mod run_log;

pub use error::ReportError;
pub use output::{write_report, ArtifactPaths};
pub use report::Report;
pub use run_log::{LogEntry, RunLog};
