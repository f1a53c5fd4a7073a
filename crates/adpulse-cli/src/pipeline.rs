//! Linear orchestration of the analysis stages.
//!
//! Each stage runs only after its predecessor has finished, and each stage's
//! output is recorded in the run log in execution order. On failure the log
//! is flushed best-effort before the error propagates; report artifacts
//! already written are left in place.

use adpulse_core::PipelineConfig;
use adpulse_insights::{load_records, summarize, CreativeGenerator, Evaluator, HypothesisGenerator};
use adpulse_report::{write_report, Report, RunLog};
use anyhow::Context;
use serde_json::{json, Value};

/// `(id, description)` of each stage, in execution order.
const STAGES: [(&str, &str); 6] = [
    ("load_data", "Load & clean dataset"),
    ("summarize", "Aggregate time series, creative and audience summaries"),
    ("generate_insights", "Create hypotheses explaining changes"),
    ("validate_insights", "Quantitatively validate hypotheses"),
    ("generate_creatives", "Produce creatives for low CTR ads"),
    ("compile_report", "Write the report and persist outputs"),
];

/// Run every stage for `query` and write the artifacts.
///
/// # Errors
///
/// Returns an error if the data cannot be loaded or an artifact cannot be
/// written. Degenerate data never fails the run.
pub(crate) fn run_pipeline(config: &PipelineConfig, query: &str) -> anyhow::Result<Report> {
    let mut run_log = RunLog::new(&config.output.logs_dir);

    match execute(config, query, &mut run_log) {
        Ok(report) => {
            run_log.flush().context("writing run log")?;
            Ok(report)
        }
        Err(e) => {
            fail_run_best_effort(&mut run_log, &e);
            Err(e)
        }
    }
}

fn execute(config: &PipelineConfig, query: &str, run_log: &mut RunLog) -> anyhow::Result<Report> {
    run_log.record("plan", &plan(query));

    let records = load_records(&config.data_path)
        .with_context(|| format!("loading ad data from {}", config.data_path.display()))?;
    let summary = summarize(records);
    run_log.record(
        "data_summary",
        &json!({
            "rows": summary.raw.len(),
            "dates": summary.timeseries.len(),
            "creatives": summary.creatives.len(),
            "audiences": summary.audiences.len(),
        }),
    );

    let hypotheses = HypothesisGenerator::new(config.thresholds).generate(&summary);
    run_log.record("hypotheses_raw", &hypotheses);

    let evaluator = Evaluator::new(config.thresholds);
    let mut evaluations = Vec::with_capacity(hypotheses.len());
    for hypothesis in &hypotheses {
        let evaluation = evaluator.evaluate(hypothesis, &summary);
        run_log.record("evaluation", &evaluation);
        evaluations.push(evaluation);
    }

    let creatives =
        CreativeGenerator::seeded(config.seed, config.thresholds.low_ctr).generate(&summary);
    run_log.record("creatives", &creatives);

    let report = Report::compile(query, hypotheses, evaluations, creatives);
    let paths = write_report(&report, &config.output.reports_dir).context("writing report artifacts")?;
    tracing::info!(
        hypotheses = report.hypotheses().len(),
        validated = report.validated().len(),
        creatives = report.creatives().len(),
        "pipeline complete"
    );
    run_log.record(
        "final_report_written",
        &json!({
            "reports_dir": config.output.reports_dir.display().to_string(),
            "artifacts": [
                paths.insights.display().to_string(),
                paths.evaluations.display().to_string(),
                paths.creatives.display().to_string(),
                paths.markdown.display().to_string(),
            ],
        }),
    );

    Ok(report)
}

fn plan(query: &str) -> Value {
    let tasks: Vec<Value> = STAGES
        .iter()
        .zip(1u8..)
        .map(|((id, desc), priority)| json!({ "id": id, "desc": desc, "priority": priority }))
        .collect();
    json!({ "query": query, "tasks": tasks })
}

/// Record the failure and flush whatever the log holds, logging rather than
/// returning any secondary error.
fn fail_run_best_effort(run_log: &mut RunLog, error: &anyhow::Error) {
    tracing::error!(error = %format!("{error:#}"), "pipeline failed");
    run_log.record("run_failed", &json!({ "error": format!("{error:#}") }));
    if let Err(flush_err) = run_log.flush() {
        tracing::warn!(error = %flush_err, "failed to write run log after pipeline failure");
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
