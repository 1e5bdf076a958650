//! Checks on the raw inputs, before any computation.
//!
//! The checks run in a fixed order and stop at the first failure:
//! 1. the shape of the table
//! 2. the numeric content of the criterion columns
//! 3. the weights
//! 4. the impacts
//! 5. the number of weights and impacts against the number of criteria

use log::debug;
use snafu::prelude::*;

use crate::config::*;

/// A table as read from a file: a header and rows of cells.
/// The first column identifies the alternatives, the other columns are the criteria.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A validated decision problem, ready to be evaluated.
#[derive(PartialEq, Debug, Clone)]
pub struct Problem {
    pub ids: Vec<String>,
    pub criteria: Vec<String>,
    pub matrix: DecisionMatrix,
    pub weights: Vec<f64>,
    pub impacts: Vec<Impact>,
}

impl Problem {
    pub fn evaluate(&self, rules: &Rules) -> Result<Evaluation, TopsisError> {
        crate::evaluate(&self.matrix, &self.weights, &self.impacts, rules)
    }
}

impl Table {
    /// The shape check: an identifier column, at least two criteria and at least one row.
    pub fn check_schema(&self) -> Result<(), TopsisError> {
        ensure!(
            self.header.len() >= 3,
            SchemaSnafu {
                reason: format!(
                    "the input must contain three or more columns, found {}",
                    self.header.len()
                ),
            }
        );
        ensure!(
            !self.rows.is_empty(),
            SchemaSnafu {
                reason: "no data rows",
            }
        );
        for (idx, row) in self.rows.iter().enumerate() {
            ensure!(
                row.len() == self.header.len(),
                SchemaSnafu {
                    reason: format!(
                        "row {} has {} columns, the header has {}",
                        idx + 1,
                        row.len(),
                        self.header.len()
                    ),
                }
            );
        }
        Ok(())
    }

    /// Reads all the criterion cells as numbers.
    ///
    /// Assumes that the schema has been checked.
    pub fn to_matrix(&self) -> Result<DecisionMatrix, TopsisError> {
        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(self.rows.len());
        for (idx, row) in self.rows.iter().enumerate() {
            let mut values: Vec<f64> = Vec::with_capacity(row.len().saturating_sub(1));
            for (col, cell) in row.iter().enumerate().skip(1) {
                let x = parse_number(cell).context(NonNumericDataSnafu {
                    row: idx + 1,
                    column: self.header[col].clone(),
                    content: cell.clone(),
                })?;
                values.push(x);
            }
            rows.push(values);
        }
        DecisionMatrix::new(rows)
    }

    pub fn ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.first().cloned().unwrap_or_default())
            .collect()
    }

    pub fn criteria(&self) -> Vec<String> {
        self.header.iter().skip(1).cloned().collect()
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Parses a comma-separated list of strictly positive weights.
pub fn parse_weights(s: &str) -> Result<Vec<f64>, TopsisError> {
    let mut res: Vec<f64> = Vec::new();
    for item in s.split(',') {
        let w = parse_number(item)
            .filter(|w| *w > 0.0)
            .context(WeightParseSnafu {
                content: item.to_string(),
            })?;
        res.push(w);
    }
    Ok(res)
}

/// Parses a comma-separated list of `+` and `-` symbols.
pub fn parse_impacts(s: &str) -> Result<Vec<Impact>, TopsisError> {
    s.split(',').map(|item| item.trim().parse::<Impact>()).collect()
}

pub fn check_dimensions(
    num_criteria: usize,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<(), TopsisError> {
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
    Ok(())
}

/// Runs all the checks in order and assembles the decision problem.
pub fn validate(table: &Table, weights: &str, impacts: &str) -> Result<Problem, TopsisError> {
    table.check_schema()?;
    let matrix = table.to_matrix()?;
    let weights = parse_weights(weights)?;
    let impacts = parse_impacts(impacts)?;
    check_dimensions(matrix.num_criteria(), &weights, &impacts)?;
    debug!(
        "validate: {} alternatives, weights: {:?}, impacts: {:?}",
        matrix.num_alternatives(),
        weights,
        impacts
    );
    Ok(Problem {
        ids: table.ids(),
        criteria: table.criteria(),
        matrix,
        weights,
        impacts,
    })
}
