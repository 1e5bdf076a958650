/*!
Multi-criteria ranking with TOPSIS (Technique for Order Preference by Similarity to Ideal Solution).

A decision problem is a table of alternatives (rows) scored on numeric criteria (columns).
Each criterion has a weight and a direction: [Impact::Benefit] when higher values are
better, [Impact::Cost] when lower values are better. The evaluation produces a score
between 0 and 1 for each alternative and ranks the alternatives by descending score.

```
use topsis::*;

let matrix = DecisionMatrix::new(vec![
    vec![250.0, 16.0, 12.0],
    vec![200.0, 16.0, 8.0],
    vec![300.0, 32.0, 16.0],
])?;
let rows = compute(&matrix, &[1.0, 1.0, 1.0], &[Impact::Cost, Impact::Benefit, Impact::Benefit])?;
assert_eq!(rows.len(), 3);
assert!(rows.iter().all(|r| (0.0..=1.0).contains(&r.score)));
# Ok::<(), TopsisError>(())
```

See the [manual] for the command line program and the input format.
*/

mod config;
use log::{debug, info};

pub mod builder;
pub mod contact;
pub mod manual;
pub mod validate;

pub use crate::config::*;

use snafu::prelude::*;

/// Computes the score and the rank of each alternative, with the default rules.
///
/// The rows are returned in the order of the alternatives in the matrix.
pub fn compute(
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<Vec<ScoreRow>, TopsisError> {
    evaluate(matrix, weights, impacts, &Rules::DEFAULT_RULES).map(|ev| ev.rows)
}

/// Runs the TOPSIS evaluation and returns all the intermediate values.
///
/// Arguments:
/// * `matrix` the decision matrix
/// * `weights` one weight per criterion. The weights are not normalized.
/// * `impacts` one direction per criterion
/// * `rules` the treatment of the degenerate cases
pub fn evaluate(
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
    rules: &Rules,
) -> Result<Evaluation, TopsisError> {
    let num_criteria = matrix.num_criteria();
    ensure!(
        weights.len() == num_criteria,
        DimensionMismatchSnafu {
            what: "weights",
            found: weights.len(),
            expected: num_criteria,
        }
    );
    ensure!(
        impacts.len() == num_criteria,
        DimensionMismatchSnafu {
            what: "impacts",
            found: impacts.len(),
            expected: num_criteria,
        }
    );
    for (j, w) in weights.iter().enumerate() {
        ensure!(
            w.is_finite() && *w > 0.0,
            InvalidWeightSnafu {
                criterion: j + 1,
                weight: w.to_string(),
            }
        );
    }
    info!(
        "evaluate: {} alternatives, {} criteria, rules: {:?}",
        matrix.num_alternatives(),
        num_criteria,
        rules
    );

    let norms = column_norms(matrix)?;
    debug!("evaluate: column norms: {:?}", norms);

    let normalized: Vec<Vec<f64>> = matrix
        .rows()
        .iter()
        .map(|row| row.iter().zip(norms.iter()).map(|(x, n)| x / n).collect())
        .collect();

    let weighted: Vec<Vec<f64>> = normalized
        .iter()
        .map(|row| row.iter().zip(weights.iter()).map(|(x, w)| x * w).collect())
        .collect();
    for (idx, row) in weighted.iter().enumerate() {
        if let Some(j) = row.iter().position(|x| !x.is_finite()) {
            return NumericOverflowSnafu {
                what: format!("the weighted value of row {}, column {}", idx + 1, j + 1),
            }
            .fail();
        }
    }

    let ideal = ideal_point(&weighted, impacts);
    debug!(
        "evaluate: ideal best: {:?} ideal worst: {:?}",
        ideal.best, ideal.worst
    );

    let separations: Vec<Separation> = weighted
        .iter()
        .map(|row| Separation {
            to_best: distance(row, &ideal.best),
            to_worst: distance(row, &ideal.worst),
        })
        .collect();

    let mut scores: Vec<f64> = Vec::with_capacity(separations.len());
    for (idx, sep) in separations.iter().enumerate() {
        ensure!(
            sep.to_best.is_finite() && sep.to_worst.is_finite(),
            NumericOverflowSnafu {
                what: format!("the separations of row {}", idx + 1),
            }
        );
        let total = sep.to_best + sep.to_worst;
        let score = if total == 0.0 {
            match rules.undefined_score {
                UndefinedScoreMode::Zero => {
                    debug!("evaluate: row {}: undefined score, using 0", idx + 1);
                    0.0
                }
                UndefinedScoreMode::Reject => {
                    return UndefinedScoreSnafu { row: idx + 1 }.fail();
                }
            }
        } else if total.is_finite() {
            sep.to_worst / total
        } else {
            let m = sep.to_best.max(sep.to_worst);
            (sep.to_worst / m) / (sep.to_best / m + sep.to_worst / m)
        };
        ensure!(
            (0.0..=1.0).contains(&score),
            NumericOverflowSnafu {
                what: format!("the score of row {}", idx + 1),
            }
        );
        scores.push(score);
    }

    let ranks = competition_ranks(&scores);
    let rows: Vec<ScoreRow> = scores
        .iter()
        .zip(ranks.iter())
        .map(|(score, rank)| ScoreRow {
            score: *score,
            rank: *rank,
        })
        .collect();

    for (idx, r) in rows.iter().enumerate() {
        debug!(
            "evaluate: row {}: separation {:?} score {} rank {}",
            idx + 1,
            separations[idx],
            r.score,
            r.rank
        );
    }

    Ok(Evaluation {
        norms,
        normalized,
        weighted,
        ideal,
        separations,
        rows,
    })
}

/// The Euclidean norm of each column. A column of zeros cannot be normalized.
fn column_norms(matrix: &DecisionMatrix) -> Result<Vec<f64>, TopsisError> {
    let mut norms: Vec<f64> = Vec::with_capacity(matrix.num_criteria());
    for j in 0..matrix.num_criteria() {
        let column: Vec<f64> = matrix.column(j).collect();
        let norm = euclidean_norm(&column);
        ensure!(norm > 0.0, DegenerateColumnSnafu { column: j + 1 });
        ensure!(
            norm.is_finite(),
            NumericOverflowSnafu {
                what: format!("the norm of column {}", j + 1),
            }
        );
        norms.push(norm);
    }
    Ok(norms)
}

/// The Euclidean norm of a vector.
///
/// When the plain sum of squares overflows or underflows, the values are first divided by
/// the largest magnitude. An infinite result means that the norm itself is out of range.
fn euclidean_norm(values: &[f64]) -> f64 {
    let mut sum_sq: f64 = 0.0;
    for x in values {
        sum_sq += x * x;
    }
    if sum_sq.is_normal() {
        return sum_sq.sqrt();
    }
    let scale = values.iter().fold(0.0, |m: f64, x| m.max(x.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let mut scaled_sq: f64 = 0.0;
    for x in values {
        let y = x / scale;
        scaled_sq += y * y;
    }
    scale * scaled_sq.sqrt()
}

fn ideal_point(weighted: &[Vec<f64>], impacts: &[Impact]) -> IdealPoint {
    let mut best: Vec<f64> = Vec::with_capacity(impacts.len());
    let mut worst: Vec<f64> = Vec::with_capacity(impacts.len());
    for (j, impact) in impacts.iter().enumerate() {
        let max = weighted
            .iter()
            .map(|r| r[j])
            .fold(f64::NEG_INFINITY, f64::max);
        let min = weighted.iter().map(|r| r[j]).fold(f64::INFINITY, f64::min);
        match impact {
            Impact::Benefit => {
                best.push(max);
                worst.push(min);
            }
            Impact::Cost => {
                best.push(min);
                worst.push(max);
            }
        }
    }
    IdealPoint { best, worst }
}

fn distance(row: &[f64], point: &[f64]) -> f64 {
    let diffs: Vec<f64> = row.iter().zip(point.iter()).map(|(x, p)| x - p).collect();
    euclidean_norm(&diffs)
}

/// Standard competition ranking ("1224") by descending score.
///
/// Alternatives with exactly the same score get the same rank, and the following
/// rank skips as many positions as there were ties.
fn competition_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]));

    let mut ranks: Vec<u32> = vec![0; scores.len()];
    let mut prev: Option<(f64, u32)> = None;
    for (pos, idx) in order.iter().enumerate() {
        let rank = match prev {
            Some((s, r)) if s == scores[*idx] => r,
            _ => (pos + 1) as u32,
        };
        ranks[*idx] = rank;
        prev = Some((scores[*idx], rank));
    }
    ranks
}
