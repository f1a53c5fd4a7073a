use adpulse_core::{Record, Thresholds};
use chrono::NaiveDate;

pub(crate) fn thresholds() -> Thresholds {
    Thresholds {
        low_ctr: 0.02,
        roas_drop_pct: 0.1,
    }
}

/// A healthy record on 2025-01-`day`: CTR 0.05, ROAS 4.0.
pub(crate) fn record(day: u32) -> Record {
    Record {
        date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        campaign_name: "Spring".to_string(),
        adset_name: "Broad 25-44".to_string(),
        creative_type: "image".to_string(),
        creative_message: "Cozy socks for cold mornings".to_string(),
        audience_type: "broad".to_string(),
        spend: Some(100.0),
        impressions: 1000,
        clicks: 50,
        revenue: 400.0,
        purchases: 4,
        roas: 4.0,
        ctr: None,
    }
}

pub(crate) fn with_revenue(mut r: Record, revenue: f64) -> Record {
    r.revenue = revenue;
    r
}

pub(crate) fn with_clicks(mut r: Record, clicks: i64) -> Record {
    r.clicks = clicks;
    r
}

pub(crate) fn with_message(mut r: Record, message: &str) -> Record {
    r.creative_message = message.to_string();
    r
}

pub(crate) fn with_audience(mut r: Record, audience: &str) -> Record {
    r.audience_type = audience.to_string();
    r
}
