use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeVariant {
    pub headline: String,
    pub body: String,
    pub cta: String,
}

/// Rewrite proposals for one low-CTR creative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeSuggestion {
    pub campaign: String,
    pub adset: String,
    pub creative_type: String,
    pub original: String,
    pub recommendations: Vec<CreativeVariant>,
    pub ctr: f64,
    pub impressions: i64,
}
