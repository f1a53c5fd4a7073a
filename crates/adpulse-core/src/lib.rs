//! Shared domain types and configuration for the adpulse pipeline.
//!
//! Every stage of the pipeline exchanges the types defined here: raw
//! [`Record`]s from the loader, grouped summaries from the aggregator, and the
//! [`Hypothesis`], [`Evaluation`] and [`CreativeSuggestion`] outputs that end up
//! in the compiled report.

pub mod config;
pub mod creative;
pub mod error;
pub mod evaluation;
pub mod hypothesis;
pub mod records;
pub mod summary;

pub use config::{
    load_config, load_config_from_str, OutputConfig, PipelineConfig, Thresholds,
    DEFAULT_CONFIG_PATH,
};
pub use creative::{CreativeSuggestion, CreativeVariant};
pub use error::ConfigError;
pub use evaluation::Evaluation;
pub use hypothesis::{Hypothesis, Signal};
pub use records::Record;
pub use summary::{AudienceSummary, CreativeKey, CreativeSummary, DataSummary, Metrics, TimePoint};
