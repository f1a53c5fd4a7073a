use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of raw ad performance data after type coercion.
///
/// `spend` and `ctr` keep their missing state; the remaining numeric columns
/// have already been defaulted to zero by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub campaign_name: String,
    pub adset_name: String,
    pub creative_type: String,
    pub creative_message: String,
    pub audience_type: String,
    pub spend: Option<f64>,
    pub impressions: i64,
    pub clicks: i64,
    pub revenue: f64,
    pub purchases: i64,
    pub roas: f64,
    /// Row-level CTR as supplied in the input. Summaries recompute their own.
    pub ctr: Option<f64>,
}
