use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use snafu::prelude::*;
use std::fs;
use topsis::validate::Problem;
use topsis::Evaluation;

use crate::rank::*;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub alternatives: usize,
    pub criteria: usize,
    pub contact: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CriterionSummary {
    pub name: String,
    pub weight: f64,
    pub impact: String,
    pub norm: f64,
    #[serde(rename = "idealBest")]
    pub ideal_best: f64,
    #[serde(rename = "idealWorst")]
    pub ideal_worst: f64,
}

fn results_to_json(problem: &Problem, ev: &Evaluation) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for (idx, id) in problem.ids.iter().enumerate() {
        let sep = ev.separations[idx];
        let row = ev.rows[idx];
        l.push(json!({
            "id": id,
            "distanceBest": sep.to_best,
            "distanceWorst": sep.to_worst,
            "score": row.score,
            "rank": row.rank,
        }));
    }
    l
}

pub fn build_summary_js(problem: &Problem, ev: &Evaluation, contact: Option<&str>) -> JSValue {
    let c = OutputConfig {
        alternatives: problem.matrix.num_alternatives(),
        criteria: problem.matrix.num_criteria(),
        contact: contact.map(|s| s.to_string()),
    };
    let criteria: Vec<CriterionSummary> = problem
        .criteria
        .iter()
        .enumerate()
        .map(|(j, name)| CriterionSummary {
            name: name.clone(),
            weight: problem.weights[j],
            impact: problem.impacts[j].to_string(),
            norm: ev.norms[j],
            ideal_best: ev.ideal.best[j],
            ideal_worst: ev.ideal.worst[j],
        })
        .collect();
    json!({
        "config": c,
        "criteria": criteria,
        "results": results_to_json(problem, ev) })
}

/// Writes the summary to a file, or to the standard output if the path is `stdout`.
pub fn write_summary(path: &str, js: &JSValue) -> RunResult<()> {
    let pretty = serde_json::to_string_pretty(js).context(SerializingSummarySnafu {})?;
    if path == "stdout" {
        println!("{}", pretty);
    } else {
        fs::write(path, pretty).context(WritingSummarySnafu { path })?;
        info!("Wrote summary to {}", path);
    }
    Ok(())
}
