use adpulse_core::{CreativeSuggestion, Evaluation, Hypothesis};
use serde::Serialize;

/// Final output of a run. Built once by [`Report::compile`] and read-only after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    query: String,
    hypotheses: Vec<Hypothesis>,
    evaluations: Vec<Evaluation>,
    validated: Vec<Evaluation>,
    creatives: Vec<CreativeSuggestion>,
}

impl Report {
    /// Merge the stage outputs. `validated` is the subset of `evaluations`
    /// whose verdict is positive, in the same order.
    #[must_use]
    pub fn compile(
        query: impl Into<String>,
        hypotheses: Vec<Hypothesis>,
        evaluations: Vec<Evaluation>,
        creatives: Vec<CreativeSuggestion>,
    ) -> Self {
        let validated = evaluations.iter().filter(|e| e.validated).cloned().collect();
        Self {
            query: query.into(),
            hypotheses,
            evaluations,
            validated,
            creatives,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    #[must_use]
    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    #[must_use]
    pub fn validated(&self) -> &[Evaluation] {
        &self.validated
    }

    #[must_use]
    pub fn creatives(&self) -> &[CreativeSuggestion] {
        &self.creatives
    }

    /// Human-readable rendering; see [`crate::markdown::render`].
    #[must_use]
    pub fn to_markdown(&self) -> String {
        crate::markdown::render(self)
    }
}

#[cfg(test)]
mod tests {
    use adpulse_core::Signal;

    use super::*;

    fn evaluation(id: &str, validated: bool) -> Evaluation {
        Evaluation {
            hypothesis_id: id.to_string(),
            validated,
            confidence: 0.5,
            evidence: serde_json::Map::new(),
        }
    }

    #[test]
    fn validated_is_ordered_positive_subset() {
        let report = Report::compile(
            "why did ROAS drop?",
            vec![Hypothesis::new(Signal::NoSignal, "none", 0.3, "")],
            vec![
                evaluation("a", true),
                evaluation("b", false),
                evaluation("c", true),
            ],
            Vec::new(),
        );
        let ids: Vec<&str> = report
            .validated()
            .iter()
            .map(|e| e.hypothesis_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(report.evaluations().len(), 3);
        assert_eq!(report.query(), "why did ROAS drop?");
    }

    #[test]
    fn serializes_all_sections() {
        let report = Report::compile("q", Vec::new(), Vec::new(), Vec::new());
        let json = serde_json::to_value(&report).unwrap();
        for key in ["query", "hypotheses", "evaluations", "validated", "creatives"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
