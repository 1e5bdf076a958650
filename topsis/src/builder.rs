pub use crate::config::*;

use snafu::prelude::*;

/// A builder for assembling a decision problem programmatically.
///
/// ```
/// pub use topsis::builder::Builder;
/// pub use topsis::{Impact, Rules};
/// # use topsis::TopsisError;
///
/// let mut builder = Builder::new(&Rules::DEFAULT_RULES)
///     .criterion("price", 1.0, Impact::Cost)
///     .criterion("storage", 1.0, Impact::Benefit);
///
/// builder.add_alternative("M1", &[250.0, 16.0])?;
/// builder.add_alternative("M2", &[200.0, 32.0])?;
///
/// let ranking = builder.evaluate()?;
/// assert_eq!(ranking.winner(), Some("M2"));
///
/// # Ok::<(), TopsisError>(())
/// ```
pub struct Builder {
    pub(crate) _rules: Rules,
    pub(crate) _criteria: Vec<(String, f64, Impact)>,
    pub(crate) _alternatives: Vec<(String, Vec<f64>)>,
}

/// The outcome of an evaluation, in the order in which the alternatives were added.
#[derive(PartialEq, Debug, Clone)]
pub struct Ranking {
    pub alternatives: Vec<RankedAlternative>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankedAlternative {
    pub id: String,
    pub score: f64,
    pub rank: u32,
}

impl Ranking {
    /// The first alternative with rank 1, if any.
    pub fn winner(&self) -> Option<&str> {
        self.alternatives
            .iter()
            .find(|a| a.rank == 1)
            .map(|a| a.id.as_str())
    }

    /// The alternatives sorted by rank. Ties keep the insertion order.
    pub fn sorted(&self) -> Vec<RankedAlternative> {
        let mut res = self.alternatives.clone();
        res.sort_by_key(|a| a.rank);
        res
    }
}

impl Builder {
    pub fn new(rules: &Rules) -> Builder {
        Builder {
            _rules: rules.clone(),
            _criteria: Vec::new(),
            _alternatives: Vec::new(),
        }
    }

    /// Declares a criterion. Criteria should be declared before adding alternatives: the
    /// alternatives already added do not have a value for the new criterion, and the
    /// evaluation then fails with [TopsisError::DimensionMismatch].
    ///
    /// The weight is checked during the evaluation.
    pub fn criterion(self, name: &str, weight: f64, impact: Impact) -> Builder {
        let mut criteria = self._criteria;
        criteria.push((name.to_string(), weight, impact));
        Builder {
            _rules: self._rules,
            _criteria: criteria,
            _alternatives: self._alternatives,
        }
    }

    /// Adds an alternative with one value per declared criterion.
    pub fn add_alternative(&mut self, id: &str, values: &[f64]) -> Result<(), TopsisError> {
        ensure!(
            values.len() == self._criteria.len(),
            DimensionMismatchSnafu {
                what: format!("alternative {:?}", id),
                found: values.len(),
                expected: self._criteria.len(),
            }
        );
        self._alternatives.push((id.to_string(), values.to_vec()));
        Ok(())
    }

    pub fn evaluate(&self) -> Result<Ranking, TopsisError> {
        let matrix =
            DecisionMatrix::new(self._alternatives.iter().map(|(_, v)| v.clone()).collect())?;
        let weights: Vec<f64> = self._criteria.iter().map(|(_, w, _)| *w).collect();
        let impacts: Vec<Impact> = self._criteria.iter().map(|(_, _, i)| *i).collect();
        let ev = crate::evaluate(&matrix, &weights, &impacts, &self._rules)?;
        let alternatives = self
            ._alternatives
            .iter()
            .zip(ev.rows.iter())
            .map(|((id, _), r)| RankedAlternative {
                id: id.clone(),
                score: r.score,
                rank: r.rank,
            })
            .collect();
        Ok(Ranking { alternatives })
    }
}
