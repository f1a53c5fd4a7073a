//! Rule-based hypothesis generation.
//!
//! Rules run in a fixed order and every rule that fires contributes. When
//! none fire, a single low-prior "no signal" hypothesis is emitted instead.

use adpulse_core::{DataSummary, Hypothesis, Signal, Thresholds};

use crate::metrics::{audience_gap, low_ctr_rows, roas_drop};

pub const ROAS_DROP_PRIOR_CAP: f64 = 0.9;
pub const LOW_CTR_PRIOR: f64 = 0.6;
pub const AUDIENCE_PRIOR: f64 = 0.5;
pub const NO_SIGNAL_PRIOR: f64 = 0.3;

/// Characters of the creative message quoted in a hypothesis.
const QUOTED_MESSAGE_CHARS: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct HypothesisGenerator {
    thresholds: Thresholds,
}

impl HypothesisGenerator {
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Apply every rule to `summary`. Never returns an empty list.
    #[must_use]
    pub fn generate(&self, summary: &DataSummary) -> Vec<Hypothesis> {
        let mut hypotheses = Vec::new();
        hypotheses.extend(self.roas_drop(summary));
        hypotheses.extend(self.low_ctr_creatives(summary));
        hypotheses.extend(audience_underperformance(summary));

        if hypotheses.is_empty() {
            hypotheses.push(Hypothesis::new(
                Signal::NoSignal,
                "No obvious signal from quick heuristics. Recommend deeper analysis.",
                NO_SIGNAL_PRIOR,
                "no heuristics triggered",
            ));
        }

        tracing::info!(count = hypotheses.len(), "generated hypotheses");
        hypotheses
    }

    fn roas_drop(&self, summary: &DataSummary) -> Option<Hypothesis> {
        let roas = roas_drop(summary)?;
        let drop = roas.drop?;
        if drop.is_nan() || drop <= self.thresholds.roas_drop_pct {
            return None;
        }

        let prev = fmt_opt(roas.roas_prev, 2);
        let last = fmt_opt(roas.roas_last, 2);
        Some(Hypothesis::new(
            Signal::RoasDrop {
                roas_prev: roas.roas_prev,
                roas_last: roas.roas_last,
                drop,
            },
            format!(
                "ROAS dropped by {:.2}% from {prev} to {last}. Possible causes: creative performance or audience fatigue.",
                drop * 100.0
            ),
            drop.min(ROAS_DROP_PRIOR_CAP),
            format!("roas_prev={prev}, roas_last={last}, drop={drop:.2}"),
        ))
    }

    fn low_ctr_creatives(&self, summary: &DataSummary) -> Vec<Hypothesis> {
        low_ctr_rows(&summary.creatives, self.thresholds.low_ctr)
            .into_iter()
            .filter_map(|row| {
                let ctr = row.metrics.ctr?;
                let quoted: String = row
                    .key
                    .creative_message
                    .chars()
                    .take(QUOTED_MESSAGE_CHARS)
                    .collect();
                Some(Hypothesis::new(
                    Signal::LowCtrCreative {
                        row_index: row.row_index,
                        creative_type: row.key.creative_type.clone(),
                        creative_message: row.key.creative_message.clone(),
                        ctr,
                        impressions: row.metrics.impressions,
                    },
                    format!(
                        "Creative '{quoted}' (type={}) has low CTR={ctr:.4}. This may explain lower conversions.",
                        row.key.creative_type
                    ),
                    LOW_CTR_PRIOR,
                    format!(
                        "creative_ctr={ctr:.4}, impressions={}",
                        row.metrics.impressions
                    ),
                ))
            })
            .collect()
    }
}

fn audience_underperformance(summary: &DataSummary) -> Option<Hypothesis> {
    if summary.audiences.len() < 2 {
        return None;
    }
    let gap = audience_gap(&summary.audiences)?;
    if !gap.underperforms() {
        return None;
    }
    let (worst_ctr, median_ctr) = (gap.worst_ctr()?, gap.median_ctr?);
    let audience_type = gap.worst.audience_type.clone();

    Some(Hypothesis::new(
        Signal::AudienceUnderperform {
            audience_type: audience_type.clone(),
            worst_ctr,
            median_ctr,
        },
        format!(
            "Audience '{audience_type}' underperforms (ctr={worst_ctr:.4}) vs median {median_ctr:.4}."
        ),
        AUDIENCE_PRIOR,
        format!("audience_ctr={worst_ctr:.4}, median_ctr={median_ctr:.4}"),
    ))
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

#[cfg(test)]
#[path = "hypotheses_test.rs"]
mod tests;
