use serde::{Deserialize, Serialize};

pub const ROAS_DROP_ID: &str = "h_roas_drop";
pub const AUDIENCE_UNDERPERFORM_ID: &str = "h_audience_underperform";
pub const NO_SIGNAL_ID: &str = "h_none";
pub const LOW_CTR_ID_PREFIX: &str = "h_lowctr_";

/// The rule that produced a hypothesis, with the numbers it fired on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    RoasDrop {
        roas_prev: Option<f64>,
        roas_last: Option<f64>,
        drop: f64,
    },
    LowCtrCreative {
        row_index: usize,
        creative_type: String,
        creative_message: String,
        ctr: f64,
        impressions: i64,
    },
    AudienceUnderperform {
        audience_type: String,
        worst_ctr: f64,
        median_ctr: f64,
    },
    NoSignal,
}

impl Signal {
    /// Report-facing identifier. Low-CTR ids embed the creative row index.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Signal::RoasDrop { .. } => ROAS_DROP_ID.to_string(),
            Signal::LowCtrCreative { row_index, .. } => format!("{LOW_CTR_ID_PREFIX}{row_index}"),
            Signal::AudienceUnderperform { .. } => AUDIENCE_UNDERPERFORM_ID.to_string(),
            Signal::NoSignal => NO_SIGNAL_ID.to_string(),
        }
    }
}

/// A candidate explanation for a performance change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: String,
    pub text: String,
    /// Prior confidence in `[0.0, 1.0]`, before evaluation.
    pub confidence_prior: f64,
    /// Human-readable digest of the inputs, only rendered in the report.
    pub evidence_summary: String,
    pub signal: Signal,
}

impl Hypothesis {
    /// Build a hypothesis whose id is derived from `signal`.
    #[must_use]
    pub fn new(
        signal: Signal,
        text: impl Into<String>,
        confidence_prior: f64,
        evidence_summary: impl Into<String>,
    ) -> Self {
        Self {
            id: signal.id(),
            text: text.into(),
            confidence_prior,
            evidence_summary: evidence_summary.into(),
            signal,
        }
    }
}
