//! Set-style operations over relations that share a schema.

use indexmap::IndexMap;
use tracing::debug;

use super::DiscreteFuzzyRelation;
use crate::error::Result;
use crate::logic::Logic;
use crate::value::Tuple;

impl DiscreteFuzzyRelation {
    /// μ = or(μA, μB) over both supports. A's tuples come first, then the
    /// tuples only `other` holds.
    pub fn union(&self, other: &Self, logic: &Logic) -> Result<Self> {
        self.schema.require_same(&other.schema)?;

        let support = self.merge(other, |a, b| logic.or(a, b))?;
        let union = Self::from_support(self.schema.clone(), support);

        debug!(left = self.len(), right = other.len(), result = union.len(), "union");

        Ok(union)
    }

    /// μ = and(μA, μB) over both supports.
    pub fn intersection(&self, other: &Self, logic: &Logic) -> Result<Self> {
        self.schema.require_same(&other.schema)?;

        let support = self.merge(other, |a, b| logic.and(a, b))?;
        let intersection = Self::from_support(self.schema.clone(), support);

        debug!(
            left = self.len(),
            right = other.len(),
            result = intersection.len(),
            "intersection"
        );

        Ok(intersection)
    }

    /// Relative complement: μ = and(μA, not(μB)) over A's support.
    pub fn difference(&self, other: &Self, logic: &Logic) -> Result<Self> {
        self.schema.require_same(&other.schema)?;

        let mut support = IndexMap::with_capacity(self.len());

        for (tuple, membership) in self.iter() {
            let negated = logic.not(other.membership(tuple))?;

            support.insert(tuple.clone(), logic.and(membership, negated)?);
        }

        let difference = Self::from_support(self.schema.clone(), support);

        debug!(left = self.len(), right = other.len(), result = difference.len(), "difference");

        Ok(difference)
    }

    /// μ = not(μ) over the current support. Tuples outside the support stay out
    /// and those negated to 0 are dropped.
    pub fn negate(&self, logic: &Logic) -> Result<Self> {
        let support = self
            .iter()
            .map(|(tuple, membership)| Ok((tuple.clone(), logic.not(membership)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        let negation = Self::from_support(self.schema.clone(), support);

        debug!(operand = self.len(), result = negation.len(), "negate");

        Ok(negation)
    }

    /// Every pairing of A's and B's tuples, μ = and(μA, μB). The schemas must be
    /// disjoint.
    pub fn cartesian_product(&self, other: &Self, logic: &Logic) -> Result<Self> {
        let schema = self.schema.concat(&other.schema)?;
        let mut support = IndexMap::with_capacity(self.len() * other.len());

        for (left, mu_left) in self.iter() {
            for (right, mu_right) in other.iter() {
                let tuple = left.iter().chain(right).cloned().collect();

                support.insert(tuple, logic.and(mu_left, mu_right)?);
            }
        }

        let product = Self::from_support(schema, support);

        debug!(
            left = self.len(),
            right = other.len(),
            result = product.len(),
            "cartesian product"
        );

        Ok(product)
    }

    /// Combines both supports position-wise, absent tuples reading as 0.
    fn merge<F>(&self, other: &Self, combine: F) -> Result<IndexMap<Tuple, f64>>
    where
        F: Fn(f64, f64) -> Result<f64>,
    {
        let mut support = IndexMap::with_capacity(self.len() + other.len());

        for (tuple, membership) in self.iter() {
            support.insert(tuple.clone(), combine(membership, other.membership(tuple))?);
        }
        for (tuple, membership) in other.iter().filter(|(tuple, _)| !self.contains(tuple)) {
            support.insert(tuple.clone(), combine(0., membership)?);
        }

        Ok(support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrufError;
    use crate::ops::{AndOp, NotOp, OrOp};
    use crate::schema::Schema;
    use crate::tuple;

    fn rel(names: &[&str], pairs: Vec<(Tuple, f64)>) -> DiscreteFuzzyRelation {
        DiscreteFuzzyRelation::from_pairs(Schema::new(names.iter().copied()).unwrap(), pairs).unwrap()
    }

    #[test]
    fn test_union_order_and_values() {
        let a = rel(&["x"], vec![(tuple![1], 0.2), (tuple![2], 0.6)]);
        let b = rel(&["x"], vec![(tuple![3], 0.5), (tuple![2], 0.4)]);
        let union = a.union(&b, &Logic::default()).unwrap();

        assert_eq!(
            union.iter().map(|(t, m)| (t.clone(), m)).collect::<Vec<_>>(),
            vec![(tuple![1], 0.2), (tuple![2], 0.6), (tuple![3], 0.5)]
        );
    }

    #[test]
    fn test_intersection_drops_zeros() {
        let a = rel(&["x"], vec![(tuple![1], 0.2), (tuple![2], 0.6)]);
        let b = rel(&["x"], vec![(tuple![2], 0.4)]);
        let meet = a.intersection(&b, &Logic::default()).unwrap();

        assert_eq!(meet.len(), 1);
        assert_eq!(meet.membership(&tuple![2]), 0.4);

        let lukasiewicz = Logic::default().with_and(AndOp::Lukasiewicz);

        assert!(a.intersection(&b, &lukasiewicz).unwrap().is_empty());
    }

    #[test]
    fn test_difference_and_negate() {
        let a = rel(&["x"], vec![(tuple![1], 0.8), (tuple![2], 1.)]);
        let b = rel(&["x"], vec![(tuple![1], 0.25), (tuple![3], 1.)]);
        let difference = a.difference(&b, &Logic::default()).unwrap();

        assert_eq!(difference.membership(&tuple![1]), 0.75);
        assert_eq!(difference.membership(&tuple![2]), 1.);
        assert!(!difference.contains(&tuple![3]));

        let negated = a.negate(&Logic::default()).unwrap();

        // 1 - 1 = 0 leaves the support
        assert_eq!(negated.len(), 1);
        assert!((negated.membership(&tuple![1]) - 0.2).abs() < 1e-12);

        let cosine = Logic::default().with_not(NotOp::Cosine);

        assert!(a.negate(&cosine).unwrap().len() == 1);
    }

    #[test]
    fn test_schema_checks() {
        let a = rel(&["x"], vec![(tuple![1], 0.8)]);
        let b = rel(&["y"], vec![(tuple![1], 0.8)]);
        let logic = Logic::default().with_or(OrOp::AlgebraicSum);

        assert!(matches!(a.union(&b, &logic), Err(PrufError::SchemaMismatch { .. })));
        assert!(matches!(a.difference(&b, &logic), Err(PrufError::SchemaMismatch { .. })));
        assert!(matches!(
            a.cartesian_product(&a, &logic),
            Err(PrufError::SchemaOverlap { .. })
        ));

        let product = a.cartesian_product(&b, &logic).unwrap();

        assert_eq!(product.schema().names(), ["x", "y"]);
        assert_eq!(product.membership(&tuple![1, 1]), 0.8);
    }
}
