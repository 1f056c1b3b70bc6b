//! Scalar measures over relations and the compatibility distribution.

use indexmap::IndexMap;
use tracing::debug;

use super::DiscreteFuzzyRelation;
use crate::error::{PrufError, Result};
use crate::logic::Logic;
use crate::schema::Schema;
use crate::value::{Tuple, Value};

impl DiscreteFuzzyRelation {
    /// Σ μ over the support.
    pub fn cardinality(&self) -> f64 {
        self.memberships().sum()
    }

    /// Cardinality per element, 0 for the empty relation.
    pub fn mean_cardinality(&self) -> f64 {
        if self.is_empty() {
            0.
        } else {
            self.cardinality() / self.len() as f64
        }
    }

    /// |A ∩ B| / |B|.
    pub fn proportion(&self, other: &Self, logic: &Logic) -> Result<f64> {
        self.schema.require_same(&other.schema)?;

        let denominator = other.cardinality();

        if denominator == 0. {
            return Err(PrufError::DivisionByZero);
        }

        Ok(self.intersection(other, logic)?.cardinality() / denominator)
    }

    /// How well `self` fits the reference `other`: a relation over the single
    /// attribute `membership` whose keys are `other`'s membership degrees, each
    /// weighted by the best membership `self` gives to a tuple at that degree.
    pub fn compatibility(&self, other: &Self) -> Result<Self> {
        self.schema.require_same(&other.schema)?;

        let mut support: IndexMap<Tuple, f64> = IndexMap::new();

        for (tuple, reference) in other.iter() {
            let membership = self.membership(tuple);

            if membership == 0. {
                continue;
            }

            support
                .entry(vec![Value::Float(reference)])
                .and_modify(|best| *best = best.max(membership))
                .or_insert(membership);
        }

        let compatibility = Self::from_support(Schema::from_distinct(vec!["membership".to_owned()]), support);

        debug!(operand = self.len(), reference = other.len(), result = compatibility.len(), "compatibility");

        Ok(compatibility)
    }

    /// max over `other`'s support of and(μB, μA), 0 for an empty `other`.
    pub fn consistency(&self, other: &Self, logic: &Logic) -> Result<f64> {
        self.schema.require_same(&other.schema)?;

        other.iter().try_fold(0., |consistency: f64, (tuple, reference)| -> Result<f64> {
            Ok(consistency.max(logic.and(reference, self.membership(tuple))?))
        })
    }

    /// Probability of the fuzzy event: Σ μ(t)·p(t).
    pub fn probability<P>(&self, p: P) -> f64
    where
        P: Fn(&[Value]) -> f64,
    {
        self.iter().map(|(tuple, membership)| membership * p(tuple)).sum()
    }
}
