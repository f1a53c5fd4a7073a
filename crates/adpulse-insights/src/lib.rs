//! Analysis stages of the adpulse pipeline.
//!
//! Loads ad performance rows, aggregates them into time-series, creative and
//! audience summaries, proposes rule-based hypotheses, re-derives each one to
//! score it, and drafts copy variants for low-CTR creatives.

pub mod aggregate;
pub mod creative;
pub mod error;
pub mod evaluator;
pub mod hypotheses;
pub mod loader;
pub mod metrics;

#[cfg(test)]
mod test_support;

pub use aggregate::summarize;
pub use creative::CreativeGenerator;
pub use error::DataError;
pub use evaluator::Evaluator;
pub use hypotheses::HypothesisGenerator;
pub use loader::{load_records, read_records};
