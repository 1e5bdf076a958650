// ********* Input data structures ***********

use snafu::prelude::*;
use std::fmt::Display;

/// The preference direction of a criterion.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// Higher values are better (`+`).
    Benefit,
    /// Lower values are better (`-`).
    Cost,
}

impl Impact {
    pub fn symbol(&self) -> &'static str {
        match self {
            Impact::Benefit => "+",
            Impact::Cost => "-",
        }
    }
}

impl Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Impact {
    type Err = TopsisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Impact::Benefit),
            "-" => Ok(Impact::Cost),
            x => InvalidImpactSymbolSnafu {
                symbol: x.to_string(),
            }
            .fail(),
        }
    }
}

/// The numeric part of a decision problem: one row per alternative, one column per criterion.
///
/// Invariant: at least one row, all the rows have the same (non-zero) length and all the
/// cells are finite.
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionMatrix {
    rows: Vec<Vec<f64>>,
    num_criteria: usize,
}

impl DecisionMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<DecisionMatrix, TopsisError> {
        let num_criteria = match rows.first() {
            Some(r) if !r.is_empty() => r.len(),
            Some(_) => return SchemaSnafu {
                reason: "the decision matrix has no criterion columns",
            }
            .fail(),
            None => return SchemaSnafu {
                reason: "the decision matrix has no rows",
            }
            .fail(),
        };
        for (idx, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == num_criteria,
                DimensionMismatchSnafu {
                    what: format!("row {}", idx + 1),
                    found: row.len(),
                    expected: num_criteria,
                }
            );
            if let Some(col) = row.iter().position(|x| !x.is_finite()) {
                return NonNumericDataSnafu {
                    row: idx + 1,
                    column: format!("#{}", col + 1),
                    content: row[col].to_string(),
                }
                .fail();
            }
        }
        Ok(DecisionMatrix { rows, num_criteria })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_alternatives(&self) -> usize {
        self.rows.len()
    }

    pub fn num_criteria(&self) -> usize {
        self.num_criteria
    }

    pub(crate) fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |r| r[j])
    }
}

// ******** Output data structures *********

/// The score and the rank of one alternative.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ScoreRow {
    /// Relative closeness to the ideal solution, between 0 and 1.
    pub score: f64,
    /// 1 is the best. Equal scores share the same rank.
    pub rank: u32,
}

/// The ideal best and ideal worst weighted values, one per criterion.
#[derive(PartialEq, Debug, Clone)]
pub struct IdealPoint {
    pub best: Vec<f64>,
    pub worst: Vec<f64>,
}

/// The separation measures of one alternative.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Separation {
    pub to_best: f64,
    pub to_worst: f64,
}

/// All the intermediate values of an evaluation, in the order of the input rows.
#[derive(PartialEq, Debug, Clone)]
pub struct Evaluation {
    pub norms: Vec<f64>,
    pub normalized: Vec<Vec<f64>>,
    pub weighted: Vec<Vec<f64>>,
    pub ideal: IdealPoint,
    pub separations: Vec<Separation>,
    pub rows: Vec<ScoreRow>,
}

/// Errors that prevent the validation or the evaluation from completing.
#[derive(Debug, Snafu, PartialEq, Clone)]
#[snafu(visibility(pub(crate)))]
pub enum TopsisError {
    #[snafu(display("Invalid decision table: {reason}"))]
    Schema { reason: String },

    #[snafu(display(
        "From 2nd to last columns must contain numeric values only (row {row}, column {column}: {content:?})"
    ))]
    NonNumericData {
        row: usize,
        column: String,
        content: String,
    },

    #[snafu(display("Weights must be positive numbers separated by commas: {content:?}"))]
    WeightParse { content: String },

    #[snafu(display("Impacts must be either + or -, found {symbol:?}"))]
    InvalidImpactSymbol { symbol: String },

    #[snafu(display(
        "Number of weights, impacts and columns must be the same: {what} has {found} values, expected {expected}"
    ))]
    DimensionMismatch {
        what: String,
        found: usize,
        expected: usize,
    },

    #[snafu(display("The weight of criterion {criterion} must be a positive number, found {weight}"))]
    InvalidWeight { criterion: usize, weight: String },

    #[snafu(display("Criterion column {column} only contains zeros and cannot be normalized"))]
    DegenerateColumn { column: usize },

    #[snafu(display(
        "The score of row {row} is undefined: it coincides with both the ideal best and the ideal worst"
    ))]
    UndefinedScore { row: usize },

    #[snafu(display("Numeric overflow: {what} is out of the range of floating point numbers"))]
    NumericOverflow { what: String },

    #[snafu(display("Invalid Email ID: {address:?}"))]
    InvalidEmail { address: String },
}

// ********* Configuration **********

/// What to do with an alternative that is at distance 0 from both ideal points.
///
/// This only happens when all the alternatives have the same weighted values.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum UndefinedScoreMode {
    /// The score is set to 0.
    Zero,
    /// The evaluation fails with [TopsisError::UndefinedScore].
    Reject,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Rules {
    pub undefined_score: UndefinedScoreMode,
}

impl Rules {
    pub const DEFAULT_RULES: Rules = Rules {
        undefined_score: UndefinedScoreMode::Zero,
    };
}

impl Default for Rules {
    fn default() -> Self {
        Rules::DEFAULT_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_symbols() {
        assert_eq!("+".parse::<Impact>(), Ok(Impact::Benefit));
        assert_eq!("-".parse::<Impact>(), Ok(Impact::Cost));
        assert!(matches!(
            "*".parse::<Impact>(),
            Err(TopsisError::InvalidImpactSymbol { symbol }) if symbol == "*"
        ));
        assert_eq!(Impact::Cost.to_string(), "-");
    }

    #[test]
    fn matrix_rejects_empty_and_ragged() {
        assert!(matches!(
            DecisionMatrix::new(vec![]),
            Err(TopsisError::Schema { .. })
        ));
        assert!(matches!(
            DecisionMatrix::new(vec![vec![]]),
            Err(TopsisError::Schema { .. })
        ));
        assert!(matches!(
            DecisionMatrix::new(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(TopsisError::DimensionMismatch {
                found: 1,
                expected: 2,
                ..
            })
        ));
        assert!(matches!(
            DecisionMatrix::new(vec![vec![1.0, f64::NAN]]),
            Err(TopsisError::NonNumericData { row: 1, .. })
        ));
    }

    #[test]
    fn matrix_shape() {
        let m = DecisionMatrix::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.num_alternatives(), 2);
        assert_eq!(m.num_criteria(), 3);
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![2.0, 5.0]);
    }
}
