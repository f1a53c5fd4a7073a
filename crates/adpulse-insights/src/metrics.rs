//! Shared numeric helpers.
//!
//! The hypothesis generator and the evaluator both go through these functions,
//! so a value derived at generation time is bit-identical when re-derived
//! during evaluation.

use adpulse_core::{AudienceSummary, CreativeSummary, DataSummary};

/// Stand-in denominator for a zero previous ROAS.
pub const EPSILON: f64 = 1e-9;

/// An audience underperforms when its CTR is below this fraction of the median.
pub const AUDIENCE_GAP_RATIO: f64 = 0.6;

/// `num / den`, or `None` when `den` is zero.
#[must_use]
pub fn safe_div(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 {
        None
    } else {
        Some(num / den)
    }
}

/// Median of the given values, or `None` if there are none.
#[must_use]
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Clamp to `[0.0, 1.0]`; NaN maps to `0.0`.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// `true` only when `ctr` is present and strictly below `threshold`.
#[must_use]
pub fn is_below(ctr: Option<f64>, threshold: f64) -> bool {
    ctr.is_some_and(|c| c < threshold)
}

/// Creative rows whose CTR is strictly below `threshold`, in summary order.
#[must_use]
pub fn low_ctr_rows(creatives: &[CreativeSummary], threshold: f64) -> Vec<&CreativeSummary> {
    creatives
        .iter()
        .filter(|row| is_below(row.metrics.ctr, threshold))
        .collect()
}

/// Day-over-day ROAS change between the last two time points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoasDrop {
    pub roas_prev: Option<f64>,
    pub roas_last: Option<f64>,
    /// `(prev - last) / prev`, positive when ROAS fell. `None` if either
    /// point has no ROAS.
    pub drop: Option<f64>,
}

/// Compute the ROAS drop, or `None` with fewer than two time points.
///
/// A zero previous ROAS is replaced by [`EPSILON`] in the denominator only,
/// so a flat zero ROAS is no drop at all.
#[must_use]
pub fn roas_drop(summary: &DataSummary) -> Option<RoasDrop> {
    let (prev, last) = summary.last_two_points()?;
    let drop = match (prev.metrics.roas, last.metrics.roas) {
        (Some(p), Some(l)) if !p.is_nan() => {
            let base = if p == 0.0 { EPSILON } else { p };
            Some((p - l) / base)
        }
        _ => None,
    };
    Some(RoasDrop {
        roas_prev: prev.metrics.roas,
        roas_last: last.metrics.roas,
        drop,
    })
}

/// Worst audience segment compared with the median segment CTR.
#[derive(Debug, Clone, Copy)]
pub struct AudienceGap<'a> {
    pub worst: &'a AudienceSummary,
    pub median_ctr: Option<f64>,
}

impl AudienceGap<'_> {
    #[must_use]
    pub fn worst_ctr(&self) -> Option<f64> {
        self.worst.metrics.ctr
    }

    /// `true` when both CTRs are present and the worst is below
    /// [`AUDIENCE_GAP_RATIO`] of the median.
    #[must_use]
    pub fn underperforms(&self) -> bool {
        match (self.worst_ctr(), self.median_ctr) {
            (Some(worst), Some(median)) => worst < AUDIENCE_GAP_RATIO * median,
            _ => false,
        }
    }
}

/// Locate the lowest-CTR audience, or `None` for an empty summary.
///
/// Rows without a CTR only count as worst when no row has one.
#[must_use]
pub fn audience_gap(audiences: &[AudienceSummary]) -> Option<AudienceGap<'_>> {
    let worst = audiences
        .iter()
        .filter(|a| a.metrics.ctr.is_some())
        .min_by(|a, b| {
            let (x, y) = (a.metrics.ctr.unwrap_or(0.0), b.metrics.ctr.unwrap_or(0.0));
            x.total_cmp(&y)
        })
        .or_else(|| audiences.first())?;
    Some(AudienceGap {
        worst,
        median_ctr: median(audiences.iter().filter_map(|a| a.metrics.ctr)),
    })
}
