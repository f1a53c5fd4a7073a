//! Property tests for the threshold rules and safe-division behaviour.

use adpulse_core::{Record, Signal, Thresholds};
use adpulse_insights::creative::{headline_fragment, HEADLINE_MESSAGE_LIMIT, MAX_VARIANTS};
use adpulse_insights::{summarize, CreativeGenerator, Evaluator, HypothesisGenerator};
use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::json;

fn record(day: u32, message: &str, spend: f64, revenue: f64, impressions: i64, clicks: i64) -> Record {
    Record {
        date: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
        campaign_name: "Summer".to_string(),
        adset_name: "Broad".to_string(),
        creative_type: "image".to_string(),
        creative_message: message.to_string(),
        audience_type: "broad".to_string(),
        spend: Some(spend),
        impressions,
        clicks,
        revenue,
        purchases: 0,
        roas: 0.0,
        ctr: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_roas_drop_fires_iff_drop_exceeds_threshold(
        prev_revenue in 1.0f64..1_000.0,
        last_revenue in 0.0f64..1_000.0,
        threshold in 0.0f64..0.9,
    ) {
        let thresholds = Thresholds { low_ctr: 0.02, roas_drop_pct: threshold };
        let summary = summarize(vec![
            record(1, "m", 100.0, prev_revenue, 1000, 100),
            record(2, "m", 100.0, last_revenue, 1000, 100),
        ]);
        let prev = prev_revenue / 100.0;
        let last = last_revenue / 100.0;
        let expected = (prev - last) / prev;

        let hypotheses = HypothesisGenerator::new(thresholds).generate(&summary);
        let fired = hypotheses.iter().find(|h| h.id == "h_roas_drop");
        prop_assert_eq!(fired.is_some(), expected > threshold);

        if let Some(h) = fired {
            let Signal::RoasDrop { drop, .. } = h.signal else {
                panic!("unexpected signal");
            };
            prop_assert_eq!(drop.to_bits(), expected.to_bits());
            let eval = Evaluator::new(thresholds).evaluate(h, &summary);
            prop_assert_eq!(&eval.evidence["drop_pct"], &json!(drop));
            prop_assert!(eval.validated);
        }
    }

    #[test]
    fn prop_low_ctr_membership_is_strict(
        clicks in prop::collection::vec(0i64..60, 1..8),
        impressions in 0i64..2_000,
    ) {
        let thresholds = Thresholds { low_ctr: 0.02, roas_drop_pct: 0.1 };
        let records: Vec<Record> = clicks
            .iter()
            .enumerate()
            .map(|(i, c)| record(1, &format!("creative-{i}"), 10.0, 10.0, impressions, *c))
            .collect();
        let summary = summarize(records);

        let expected: Vec<usize> = summary
            .creatives
            .iter()
            .filter(|row| row.metrics.ctr.is_some_and(|ctr| ctr < thresholds.low_ctr))
            .map(|row| row.row_index)
            .collect();
        let flagged: Vec<usize> = HypothesisGenerator::new(thresholds)
            .generate(&summary)
            .iter()
            .filter_map(|h| match h.signal {
                Signal::LowCtrCreative { row_index, .. } => Some(row_index),
                _ => None,
            })
            .collect();
        prop_assert_eq!(flagged, expected);

        if impressions == 0 {
            prop_assert!(summary.creatives.iter().all(|row| row.metrics.ctr.is_none()));
        }
    }

    #[test]
    fn prop_every_hypothesis_is_evaluated_once(
        revenues in prop::collection::vec(0.0f64..500.0, 1..6),
        clicks in 0i64..80,
    ) {
        let thresholds = Thresholds { low_ctr: 0.02, roas_drop_pct: 0.1 };
        let records: Vec<Record> = revenues
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let day = u32::try_from(i).unwrap() + 1;
                record(day, "m", 100.0, *r, 1000, clicks)
            })
            .collect();
        let summary = summarize(records);
        let hypotheses = HypothesisGenerator::new(thresholds).generate(&summary);
        let evaluator = Evaluator::new(thresholds);
        for h in &hypotheses {
            let eval = evaluator.evaluate(h, &summary);
            prop_assert_eq!(&eval.hypothesis_id, &h.id);
            prop_assert!((0.0..=1.0).contains(&eval.confidence));
        }
    }

    #[test]
    fn prop_creative_variants_bounded_and_truncation_exact(
        message in "[a-z ]{0,90}",
        seed in any::<u64>(),
    ) {
        let summary = summarize(vec![record(1, &message, 10.0, 10.0, 1000, 1)]);
        let suggestions = CreativeGenerator::seeded(seed, 0.02).generate(&summary);
        prop_assert_eq!(suggestions.len(), 1);
        prop_assert!(suggestions[0].recommendations.len() <= MAX_VARIANTS);

        let fragment = headline_fragment(&message);
        let truncated = &*fragment != message.as_str();
        prop_assert_eq!(truncated, message.chars().count() > HEADLINE_MESSAGE_LIMIT);
    }
}
