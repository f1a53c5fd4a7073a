//! Grouped summaries over the raw records.

use std::collections::BTreeMap;

use adpulse_core::{
    AudienceSummary, CreativeKey, CreativeSummary, DataSummary, Metrics, Record, TimePoint,
};

use crate::metrics::safe_div;

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    spend: f64,
    impressions: i64,
    clicks: i64,
    revenue: f64,
    purchases: i64,
}

impl Totals {
    fn add(&mut self, record: &Record) {
        // Missing spend contributes nothing to the group sum.
        self.spend += record.spend.unwrap_or(0.0);
        self.impressions = self.impressions.saturating_add(record.impressions);
        self.clicks = self.clicks.saturating_add(record.clicks);
        self.revenue += record.revenue;
        self.purchases = self.purchases.saturating_add(record.purchases);
    }

    #[allow(clippy::cast_precision_loss)]
    fn into_metrics(self) -> Metrics {
        Metrics {
            spend: self.spend,
            impressions: self.impressions,
            clicks: self.clicks,
            revenue: self.revenue,
            purchases: self.purchases,
            ctr: safe_div(self.clicks as f64, self.impressions as f64),
            roas: safe_div(self.revenue, self.spend),
        }
    }
}

/// Build the time-series, creative and audience summaries.
///
/// Each summary is ordered by its group key. The records are kept on the
/// result as `raw` for later stages.
#[must_use]
pub fn summarize(records: Vec<Record>) -> DataSummary {
    let mut by_date: BTreeMap<chrono::NaiveDate, Totals> = BTreeMap::new();
    let mut by_creative: BTreeMap<CreativeKey, Totals> = BTreeMap::new();
    let mut by_audience: BTreeMap<String, Totals> = BTreeMap::new();

    for record in &records {
        by_date.entry(record.date).or_default().add(record);
        by_creative
            .entry(CreativeKey::from_record(record))
            .or_default()
            .add(record);
        by_audience
            .entry(record.audience_type.clone())
            .or_default()
            .add(record);
    }

    let timeseries: Vec<TimePoint> = by_date
        .into_iter()
        .map(|(date, totals)| TimePoint {
            date,
            metrics: totals.into_metrics(),
        })
        .collect();

    let creatives: Vec<CreativeSummary> = by_creative
        .into_iter()
        .enumerate()
        .map(|(row_index, (key, totals))| CreativeSummary {
            row_index,
            key,
            metrics: totals.into_metrics(),
        })
        .collect();

    let audiences: Vec<AudienceSummary> = by_audience
        .into_iter()
        .map(|(audience_type, totals)| AudienceSummary {
            audience_type,
            metrics: totals.into_metrics(),
        })
        .collect();

    tracing::debug!(
        dates = timeseries.len(),
        creatives = creatives.len(),
        audiences = audiences.len(),
        "summarized records"
    );

    DataSummary {
        timeseries,
        creatives,
        audiences,
        raw: records,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(day: u32, message: &str, audience: &str, impressions: i64, clicks: i64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            campaign_name: "Spring".to_string(),
            adset_name: "Broad".to_string(),
            creative_type: "image".to_string(),
            creative_message: message.to_string(),
            audience_type: audience.to_string(),
            spend: Some(10.0),
            impressions,
            clicks,
            revenue: 40.0,
            purchases: 1,
            roas: 4.0,
            ctr: None,
        }
    }

    #[test]
    fn timeseries_is_sorted_and_unique_by_date() {
        let records = vec![
            record(3, "a", "x", 100, 1),
            record(1, "a", "x", 100, 1),
            record(3, "b", "y", 100, 1),
        ];
        let summary = summarize(records);
        let dates: Vec<u32> = summary
            .timeseries
            .iter()
            .map(|p| chrono::Datelike::day(&p.date))
            .collect();
        assert_eq!(dates, vec![1, 3]);
        assert_eq!(summary.timeseries[1].metrics.impressions, 200);
        assert_eq!(summary.raw.len(), 3);
    }

    #[test]
    fn creative_rows_are_unique_and_indexed_in_key_order() {
        let records = vec![
            record(1, "zebra", "x", 100, 1),
            record(2, "apple", "x", 100, 3),
            record(2, "zebra", "x", 300, 1),
        ];
        let summary = summarize(records);
        assert_eq!(summary.creatives.len(), 2);
        assert_eq!(summary.creatives[0].key.creative_message, "apple");
        assert_eq!(summary.creatives[0].row_index, 0);
        assert_eq!(summary.creatives[1].key.creative_message, "zebra");
        assert_eq!(summary.creatives[1].row_index, 1);
        assert_eq!(summary.creatives[1].metrics.impressions, 400);
        assert_eq!(summary.creatives[1].metrics.ctr, Some(0.005));
    }

    #[test]
    fn ratios_are_derived_from_sums() {
        let summary = summarize(vec![record(1, "a", "x", 200, 5), record(1, "a", "x", 200, 5)]);
        let m = summary.timeseries[0].metrics;
        assert_eq!(m.ctr, Some(0.025));
        assert_eq!(m.roas, Some(4.0));
    }

    #[test]
    fn zero_impressions_yield_missing_ctr() {
        let summary = summarize(vec![record(1, "a", "x", 0, 0)]);
        assert_eq!(summary.creatives[0].metrics.ctr, None);
        assert_eq!(summary.audiences[0].metrics.ctr, None);
    }

    #[test]
    fn zero_spend_yields_missing_roas() {
        let mut r = record(1, "a", "x", 10, 1);
        r.spend = None;
        let summary = summarize(vec![r]);
        assert!(summary.timeseries[0].metrics.spend.abs() < f64::EPSILON);
        assert_eq!(summary.timeseries[0].metrics.roas, None);
    }

    #[test]
    fn audiences_grouped_by_segment() {
        let summary = summarize(vec![
            record(1, "a", "lookalike", 100, 1),
            record(1, "b", "broad", 100, 2),
            record(2, "a", "broad", 100, 2),
        ]);
        let names: Vec<&str> = summary
            .audiences
            .iter()
            .map(|a| a.audience_type.as_str())
            .collect();
        assert_eq!(names, vec!["broad", "lookalike"]);
        assert_eq!(summary.audiences[0].metrics.clicks, 4);
    }

    #[test]
    fn empty_input_gives_empty_summaries() {
        let summary = summarize(Vec::new());
        assert!(summary.timeseries.is_empty());
        assert!(summary.creatives.is_empty());
        assert!(summary.audiences.is_empty());
    }
}
