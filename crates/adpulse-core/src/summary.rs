use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::Record;

/// Summed totals for a group of records plus the derived ratios.
///
/// `ctr` is `None` when the group has zero impressions and `roas` is `None`
/// when it has zero spend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub spend: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub revenue: f64,
    pub purchases: i64,
    pub ctr: Option<f64>,
    pub roas: Option<f64>,
}

/// One date of the global time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub metrics: Metrics,
}

/// Grouping key of the creative summary.
///
/// Field order defines the sort order of the summary rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreativeKey {
    pub campaign_name: String,
    pub adset_name: String,
    pub creative_type: String,
    pub creative_message: String,
}

impl CreativeKey {
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            campaign_name: record.campaign_name.clone(),
            adset_name: record.adset_name.clone(),
            creative_type: record.creative_type.clone(),
            creative_message: record.creative_message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeSummary {
    /// Position of this row in the sorted summary. Not stable across datasets.
    pub row_index: usize,
    #[serde(flatten)]
    pub key: CreativeKey,
    #[serde(flatten)]
    pub metrics: Metrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceSummary {
    pub audience_type: String,
    #[serde(flatten)]
    pub metrics: Metrics,
}

/// Everything the aggregator produces, handed unchanged to later stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSummary {
    /// Ascending by date, one point per distinct date.
    pub timeseries: Vec<TimePoint>,
    pub creatives: Vec<CreativeSummary>,
    pub audiences: Vec<AudienceSummary>,
    pub raw: Vec<Record>,
}

impl DataSummary {
    /// The last two time points as `(previous, last)`, if there are at least two.
    #[must_use]
    pub fn last_two_points(&self) -> Option<(&TimePoint, &TimePoint)> {
        match self.timeseries.as_slice() {
            [.., prev, last] => Some((prev, last)),
            _ => None,
        }
    }
}
