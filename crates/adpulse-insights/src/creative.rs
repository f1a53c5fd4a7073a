//! Templated copy variants for low-CTR creatives.

use std::borrow::Cow;

use adpulse_core::{CreativeSuggestion, CreativeSummary, CreativeVariant, DataSummary};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::metrics::low_ctr_rows;

/// Upper bound on variants proposed per creative.
pub const MAX_VARIANTS: usize = 4;
/// Messages longer than this are shortened before templating.
pub const HEADLINE_MESSAGE_LIMIT: usize = 60;
const TRUNCATED_CHARS: usize = 57;

struct Template {
    headline: &'static str,
    body: &'static str,
    cta: &'static str,
}

const TEMPLATES: [Template; 5] = [
    Template {
        headline: "Limited time: {orig}",
        body: "Hurry, only a few left",
        cta: "Shop now",
    },
    Template {
        headline: "New & Improved: {orig}",
        body: "See what customers love",
        cta: "Learn more",
    },
    Template {
        headline: "Just dropped: {orig}",
        body: "Don't miss the special price today",
        cta: "Buy now",
    },
    Template {
        headline: "Hot pick: {orig}",
        body: "Trending with buyers like you",
        cta: "Shop deals",
    },
    Template {
        headline: "Save more: {orig}",
        body: "Bundle & save, limited offer",
        cta: "Get offer",
    },
];

/// Drafts headline/body/CTA variants for creatives below the CTR threshold.
///
/// Template choice draws from the supplied random source only, so output is a
/// pure function of the generator's seed and its input.
#[derive(Debug)]
pub struct CreativeGenerator<R> {
    rng: R,
    low_ctr_threshold: f64,
}

impl CreativeGenerator<StdRng> {
    /// Generator backed by a `StdRng` seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64, low_ctr_threshold: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), low_ctr_threshold)
    }
}

impl<R: Rng> CreativeGenerator<R> {
    #[must_use]
    pub fn new(rng: R, low_ctr_threshold: f64) -> Self {
        Self {
            rng,
            low_ctr_threshold,
        }
    }

    /// One suggestion per creative row with CTR strictly below the threshold.
    pub fn generate(&mut self, summary: &DataSummary) -> Vec<CreativeSuggestion> {
        let suggestions: Vec<CreativeSuggestion> =
            low_ctr_rows(&summary.creatives, self.low_ctr_threshold)
                .into_iter()
                .filter_map(|row| self.suggest_for(row))
                .collect();
        tracing::info!(count = suggestions.len(), "generated creative suggestions");
        suggestions
    }

    fn suggest_for(&mut self, row: &CreativeSummary) -> Option<CreativeSuggestion> {
        let ctr = row.metrics.ctr?;
        let original = row.key.creative_message.as_str();
        let fragment = headline_fragment(original);

        let recommendations = TEMPLATES
            .choose_multiple(&mut self.rng, MAX_VARIANTS)
            .map(|t| CreativeVariant {
                headline: t.headline.replace("{orig}", &fragment),
                body: t.body.to_string(),
                cta: t.cta.to_string(),
            })
            .collect();

        Some(CreativeSuggestion {
            campaign: row.key.campaign_name.clone(),
            adset: row.key.adset_name.clone(),
            creative_type: row.key.creative_type.clone(),
            original: original.to_string(),
            recommendations,
            ctr,
            impressions: row.metrics.impressions,
        })
    }
}

/// The message as inserted into a headline: messages longer than
/// [`HEADLINE_MESSAGE_LIMIT`] characters keep 57 characters plus `...`.
#[must_use]
pub fn headline_fragment(message: &str) -> Cow<'_, str> {
    if message.chars().count() > HEADLINE_MESSAGE_LIMIT {
        let mut short: String = message.chars().take(TRUNCATED_CHARS).collect();
        short.push_str("...");
        Cow::Owned(short)
    } else {
        Cow::Borrowed(message)
    }
}
