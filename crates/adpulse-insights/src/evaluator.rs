//! Independent validation of generated hypotheses.
//!
//! Dispatch is on the hypothesis [`Signal`]. Each validator re-derives its
//! metric from the summaries through [`crate::metrics`] rather than trusting
//! the numbers carried on the hypothesis. No branch fails: degenerate input
//! produces a low-confidence, unvalidated verdict.

use adpulse_core::{DataSummary, Evaluation, Hypothesis, Signal, Thresholds};
use serde_json::{json, Map, Value};

use crate::metrics::{audience_gap, clamp_unit, low_ctr_rows, roas_drop, EPSILON};

/// Confidence when a validator lacks the data it needs.
pub const INSUFFICIENT_DATA_CONFIDENCE: f64 = 0.1;
/// Confidence for a hypothesis no validator handles, or a failed low-CTR check.
pub const NEUTRAL_CONFIDENCE: f64 = 0.2;

const MAX_LOW_CTR_EXAMPLES: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    thresholds: Thresholds,
}

impl Evaluator {
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Produce exactly one evaluation for `hypothesis`.
    #[must_use]
    pub fn evaluate(&self, hypothesis: &Hypothesis, summary: &DataSummary) -> Evaluation {
        let id = hypothesis.id.as_str();
        let evaluation = match hypothesis.signal {
            Signal::RoasDrop { .. } => self.evaluate_roas_drop(id, summary),
            Signal::LowCtrCreative { .. } => self.evaluate_low_ctr(id, summary),
            Signal::AudienceUnderperform { .. } => evaluate_audience(id, summary),
            Signal::NoSignal => Evaluation::with_reason(id, NEUTRAL_CONFIDENCE, "no validator matched"),
        };
        tracing::debug!(
            hypothesis = id,
            validated = evaluation.validated,
            confidence = evaluation.confidence,
            "evaluated hypothesis"
        );
        evaluation
    }

    fn evaluate_roas_drop(&self, id: &str, summary: &DataSummary) -> Evaluation {
        let Some(roas) = roas_drop(summary) else {
            return Evaluation::with_reason(id, INSUFFICIENT_DATA_CONFIDENCE, "insufficient timepoints");
        };

        let mut evidence = Map::new();
        evidence.insert("roas_prev".to_string(), json!(roas.roas_prev));
        evidence.insert("roas_last".to_string(), json!(roas.roas_last));
        evidence.insert("drop_pct".to_string(), json!(roas.drop));

        let (validated, confidence) = match roas.drop {
            Some(drop) => (drop > self.thresholds.roas_drop_pct, clamp_unit(drop)),
            None => (false, 0.0),
        };

        Evaluation {
            hypothesis_id: id.to_string(),
            validated,
            confidence,
            evidence,
        }
    }

    fn evaluate_low_ctr(&self, id: &str, summary: &DataSummary) -> Evaluation {
        let threshold = self.thresholds.low_ctr;
        let low = low_ctr_rows(&summary.creatives, threshold);
        let validated = !low.is_empty();

        let confidence = if validated {
            #[allow(clippy::cast_precision_loss)]
            let avg_low = low.iter().filter_map(|row| row.metrics.ctr).sum::<f64>() / low.len() as f64;
            clamp_unit((threshold - avg_low) / (threshold + EPSILON) + 0.5)
        } else {
            NEUTRAL_CONFIDENCE
        };

        let examples: Vec<Value> = low
            .iter()
            .take(MAX_LOW_CTR_EXAMPLES)
            .filter_map(|row| serde_json::to_value(row).ok())
            .collect();

        let mut evidence = Map::new();
        evidence.insert("low_count".to_string(), json!(low.len()));
        evidence.insert("threshold".to_string(), json!(threshold));
        evidence.insert("examples".to_string(), Value::Array(examples));

        Evaluation {
            hypothesis_id: id.to_string(),
            validated,
            confidence,
            evidence,
        }
    }
}

fn evaluate_audience(id: &str, summary: &DataSummary) -> Evaluation {
    let Some(gap) = audience_gap(&summary.audiences) else {
        return Evaluation::with_reason(id, INSUFFICIENT_DATA_CONFIDENCE, "no audience data");
    };

    let relative_gap = match (gap.worst_ctr(), gap.median_ctr) {
        (Some(worst), Some(median)) => ((median - worst) / (median + EPSILON)).max(0.0),
        _ => 0.0,
    };

    let mut evidence = Map::new();
    evidence.insert("worst_audience".to_string(), json!(gap.worst.audience_type));
    evidence.insert("worst_ctr".to_string(), json!(gap.worst_ctr()));
    evidence.insert("median_ctr".to_string(), json!(gap.median_ctr));

    Evaluation {
        hypothesis_id: id.to_string(),
        validated: gap.underperforms(),
        confidence: clamp_unit(0.5 + relative_gap * 0.5),
        evidence,
    }
}

#[cfg(test)]
#[path = "evaluator_test.rs"]
mod tests;
