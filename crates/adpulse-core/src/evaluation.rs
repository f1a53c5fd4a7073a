use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Verdict on one hypothesis after independent re-derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub hypothesis_id: String,
    pub validated: bool,
    /// Posterior confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    pub evidence: Map<String, Value>,
}

impl Evaluation {
    /// An unvalidated evaluation carrying a single `reason` entry.
    #[must_use]
    pub fn with_reason(hypothesis_id: impl Into<String>, confidence: f64, reason: &str) -> Self {
        let mut evidence = Map::new();
        evidence.insert("reason".to_string(), Value::from(reason));
        Self {
            hypothesis_id: hypothesis_id.into(),
            validated: false,
            confidence,
            evidence,
        }
    }
}
