//! Markdown rendering of a compiled [`Report`].

use std::collections::BTreeMap;

use adpulse_core::CreativeSuggestion;

use crate::report::Report;

/// Render the report as a single markdown document.
///
/// Sections: hypotheses with priors and evidence, evaluations with verdicts,
/// then creative suggestions grouped under one heading per campaign/adset.
#[must_use]
pub fn render(report: &Report) -> String {
    let mut md = vec![
        "# Ad Performance Analysis Report".to_string(),
        String::new(),
        format!("**Query:** {}", report.query()),
        String::new(),
        "## Hypotheses".to_string(),
    ];

    for h in report.hypotheses() {
        md.push(format!(
            "- **{}**: {} (prior={:.2})",
            h.id, h.text, h.confidence_prior
        ));
        md.push(format!("  - Evidence: {}", h.evidence_summary));
    }

    md.push(String::new());
    md.push("## Evaluations".to_string());
    for e in report.evaluations() {
        md.push(format!(
            "- **{}**: validated: {}, confidence: {:.2}",
            e.hypothesis_id, e.validated, e.confidence
        ));
        let evidence = serde_json::to_string(&e.evidence).unwrap_or_default();
        md.push(format!("  - Evidence: {evidence}"));
    }

    md.push(String::new());
    md.push("## Creative Suggestions".to_string());
    if report.creatives().is_empty() {
        md.push("No creatives below the CTR threshold.".to_string());
    }
    for ((campaign, adset), suggestions) in group_by_placement(report.creatives()) {
        md.push(String::new());
        md.push(format!("### Campaign: {campaign} | Adset: {adset}"));
        for s in suggestions {
            md.push(format!(
                "- Original ({}, ctr={:.4}): {}",
                s.creative_type, s.ctr, s.original
            ));
            for r in &s.recommendations {
                md.push(format!("  - Headline: {}", r.headline));
                md.push(format!("    Body: {}", r.body));
                md.push(format!("    CTA: {}", r.cta));
            }
        }
    }

    md.push(String::new());
    md.join("\n")
}

fn group_by_placement(
    creatives: &[CreativeSuggestion],
) -> BTreeMap<(&str, &str), Vec<&CreativeSuggestion>> {
    let mut groups: BTreeMap<(&str, &str), Vec<&CreativeSuggestion>> = BTreeMap::new();
    for c in creatives {
        groups
            .entry((c.campaign.as_str(), c.adset.as_str()))
            .or_default()
            .push(c);
    }
    groups
}
