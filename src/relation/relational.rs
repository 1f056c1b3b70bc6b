//! Relational operations: join, projection, particularization, extension and
//! the elementwise transforms.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::debug;

use super::DiscreteFuzzyRelation;
use crate::error::{PrufError, Result};
use crate::logic::Logic;
use crate::ops::{BinaryOp, UnaryOp};
use crate::schema::Schema;
use crate::value::{Tuple, Value};

fn pick(tuple: &[Value], positions: &[usize]) -> Tuple {
    positions.iter().map(|&i| tuple[i].clone()).collect()
}

#[derive(Clone, Debug)]
enum Constraint<'r> {
    Value {
        attribute: String,
        value: Value,
    },
    Fuzzy {
        attributes: Vec<String>,
        relation: &'r DiscreteFuzzyRelation,
    },
}

/// Constraints for [`DiscreteFuzzyRelation::particularization`].
///
/// ```
/// use pruf::{tuple, Assignment, DiscreteFuzzyRelation, Logic, Schema};
///
/// let people = DiscreteFuzzyRelation::from_pairs(
///     Schema::new(["name", "height"]).unwrap(),
///     [(tuple!["Ann", 185], 1.), (tuple!["Bob", 170], 1.)],
/// )
/// .unwrap();
/// let tall = DiscreteFuzzyRelation::from_pairs(
///     Schema::new(["height"]).unwrap(),
///     [(tuple![185], 0.8)],
/// )
/// .unwrap();
///
/// let tall_people = people
///     .particularization(&Assignment::new().fuzzy("height", &tall), &Logic::default())
///     .unwrap();
///
/// assert_eq!(tall_people.membership(&tuple!["Ann", 185]), 0.8);
/// assert!(!tall_people.contains(&tuple!["Bob", 170]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Assignment<'r> {
    constraints: Vec<Constraint<'r>>,
}

impl<'r> Assignment<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tuples whose `attribute` differs from `value` drop out.
    pub fn value(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        self.constraints.push(Constraint::Value {
            attribute: attribute.to_owned(),
            value: value.into(),
        });
        self
    }

    /// Weighs each tuple by `relation`'s membership of its `attribute` value.
    pub fn fuzzy(self, attribute: &str, relation: &'r DiscreteFuzzyRelation) -> Self {
        self.fuzzy_on(&[attribute], relation)
    }

    /// Like [`fuzzy`](Self::fuzzy), with `relation` keyed by several attributes
    /// taken in the given order.
    pub fn fuzzy_on(mut self, attributes: &[&str], relation: &'r DiscreteFuzzyRelation) -> Self {
        self.constraints.push(Constraint::Fuzzy {
            attributes: attributes.iter().map(|name| (*name).to_owned()).collect(),
            relation,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl DiscreteFuzzyRelation {
    /// Joins tuples that agree on every common attribute; μ = and(μA, μB).
    ///
    /// The result keeps A's schema followed by B's remaining attributes in B's
    /// order.
    pub fn natural_join(&self, other: &Self, logic: &Logic) -> Result<Self> {
        let common = self.schema.common_with(&other.schema);

        if common.is_empty() {
            return Err(PrufError::NoCommonAttribute {
                left: self.schema.to_vec(),
                right: other.schema.to_vec(),
            });
        }

        let left_common = common
            .iter()
            .map(|name| self.schema.require_position(name))
            .collect::<Result<Vec<_>>>()?;
        let right_common = common
            .iter()
            .map(|name| other.schema.require_position(name))
            .collect::<Result<Vec<_>>>()?;
        let right_only: Vec<usize> = (0..other.schema.len())
            .filter(|i| !right_common.contains(i))
            .collect();

        let mut index: HashMap<Tuple, Vec<(&Tuple, f64)>> = HashMap::new();

        for (tuple, membership) in other.iter() {
            index
                .entry(pick(tuple, &right_common))
                .or_default()
                .push((tuple, membership));
        }

        let mut support = IndexMap::new();

        for (left, mu_left) in self.iter() {
            let Some(matches) = index.get(&pick(left, &left_common)) else {
                continue;
            };

            for &(right, mu_right) in matches {
                let mut tuple = left.clone();

                tuple.extend(right_only.iter().map(|&i| right[i].clone()));
                support.insert(tuple, logic.and(mu_left, mu_right)?);
            }
        }

        let mut names = self.schema.to_vec();

        names.extend(right_only.iter().map(|&i| other.schema.names()[i].clone()));

        let join = Self::from_support(Schema::from_distinct(names), support);

        debug!(left = self.len(), right = other.len(), result = join.len(), "natural join");

        Ok(join)
    }

    /// Projects onto `subschema`, folding colliding memberships with `op` in
    /// support order: the first contributor seeds the value and each later one
    /// is folded in as `op(acc, μ)`.
    pub fn projection(&self, subschema: &[&str], op: impl Into<BinaryOp>) -> Result<Self> {
        let op = op.into();
        let schema = Schema::new(subschema.iter().copied())?;
        let positions = schema
            .iter()
            .map(|name| self.schema.require_position(name))
            .collect::<Result<Vec<_>>>()?;

        let mut support: IndexMap<Tuple, f64> = IndexMap::new();

        for (tuple, membership) in self.iter() {
            let projected = pick(tuple, &positions);

            match support.get_mut(&projected) {
                Some(acc) => *acc = op.call(*acc, membership)?,
                None => {
                    support.insert(projected, membership);
                }
            }
        }

        let projection = Self::from_support(schema, support);

        debug!(operand = self.len(), result = projection.len(), ?op, "projection");

        Ok(projection)
    }

    /// Restricts the relation by `assignment`: literal values filter tuples and
    /// fuzzy constraints weigh them, μ = and(μ_ref(subtuple), μ).
    pub fn particularization(&self, assignment: &Assignment<'_>, logic: &Logic) -> Result<Self> {
        let mut literals = Vec::new();
        let mut weights = Vec::new();

        for constraint in &assignment.constraints {
            match constraint {
                Constraint::Value { attribute, value } => {
                    literals.push((self.schema.require_position(attribute)?, value));
                }
                Constraint::Fuzzy { attributes, relation } => {
                    if relation.schema.len() != attributes.len() {
                        return Err(PrufError::ArityMismatch {
                            expected: attributes.len(),
                            got: relation.schema.len(),
                        });
                    }

                    let positions = attributes
                        .iter()
                        .map(|name| self.schema.require_position(name))
                        .collect::<Result<Vec<_>>>()?;

                    weights.push((positions, *relation));
                }
            }
        }

        let mut support = IndexMap::new();

        for (tuple, membership) in self.iter() {
            if literals.iter().any(|&(i, value)| &tuple[i] != value) {
                continue;
            }

            let mut mu = membership;

            for (positions, relation) in &weights {
                mu = logic.and(relation.membership(&pick(tuple, positions)), mu)?;
            }

            support.insert(tuple.clone(), mu);
        }

        let particular = Self::from_support(self.schema.clone(), support);

        debug!(operand = self.len(), result = particular.len(), "particularization");

        Ok(particular)
    }

    /// Extends both relations to the joint schema: the common attributes in A's
    /// order, then A's own, then B's own.
    ///
    /// Every pair `(a, b)` contributes `(a.common, a.own, b.own)` with μA to the
    /// first result and `(b.common, a.own, b.own)` with μB to the second.
    pub fn cylindrical_extension(&self, other: &Self) -> (Self, Self) {
        let common = self.schema.common_with(&other.schema);
        let left_common: Vec<usize> = common.iter().filter_map(|name| self.schema.position(name)).collect();
        let right_common: Vec<usize> = common.iter().filter_map(|name| other.schema.position(name)).collect();
        let left_only: Vec<usize> = (0..self.schema.len()).filter(|i| !left_common.contains(i)).collect();
        let right_only: Vec<usize> = (0..other.schema.len()).filter(|i| !right_common.contains(i)).collect();

        let names: Vec<String> = common
            .iter()
            .map(|name| (*name).to_owned())
            .chain(left_only.iter().map(|&i| self.schema.names()[i].clone()))
            .chain(right_only.iter().map(|&i| other.schema.names()[i].clone()))
            .collect();
        let schema = Schema::from_distinct(names);

        let mut left_support = IndexMap::new();
        let mut right_support = IndexMap::new();

        for (a, mu_a) in self.iter() {
            for (b, mu_b) in other.iter() {
                let mut own = pick(a, &left_only);

                own.extend(right_only.iter().map(|&i| b[i].clone()));

                let mut left = pick(a, &left_common);
                let mut right = pick(b, &right_common);

                left.extend(own.iter().cloned());
                right.extend(own);
                left_support.insert(left, mu_a);
                right_support.insert(right, mu_b);
            }
        }

        let left = Self::from_support(schema.clone(), left_support);
        let right = Self::from_support(schema, right_support);

        debug!(
            left = self.len(),
            right = other.len(),
            left_result = left.len(),
            right_result = right.len(),
            "cylindrical extension"
        );

        (left, right)
    }

    /// A copy with its attributes (and tuple values) permuted into `order`.
    pub fn reorder(&self, order: &[&str]) -> Result<Self> {
        let mut reordered = self.clone();

        reordered.reorder_in_place(order)?;

        Ok(reordered)
    }

    pub fn reorder_in_place(&mut self, order: &[&str]) -> Result<()> {
        let distinct: HashSet<&str> = order.iter().copied().collect();
        let not_a_permutation = || PrufError::NotAPermutation {
            schema: self.schema.to_vec(),
            target: order.iter().map(|name| (*name).to_owned()).collect(),
        };

        if order.len() != self.schema.len() || distinct.len() != order.len() {
            return Err(not_a_permutation());
        }

        let positions = order
            .iter()
            .map(|name| self.schema.position(name))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(not_a_permutation)?;

        self.support = self
            .support
            .drain(..)
            .map(|(tuple, membership)| (pick(&tuple, &positions), membership))
            .collect();
        self.schema = Schema::from_distinct(order.iter().map(|name| (*name).to_owned()).collect());

        Ok(())
    }

    /// Image of the relation under `f` (extension principle). Tuples mapped to
    /// the same image combine with or.
    pub fn map<F>(&self, f: F, out_schema: Schema, logic: &Logic) -> Result<Self>
    where
        F: Fn(&[Value]) -> Tuple,
    {
        let mut support: IndexMap<Tuple, f64> = IndexMap::new();

        for (tuple, membership) in self.iter() {
            let image = f(tuple);

            if image.len() != out_schema.len() {
                return Err(PrufError::ArityMismatch {
                    expected: out_schema.len(),
                    got: image.len(),
                });
            }

            match support.get_mut(&image) {
                Some(acc) => *acc = logic.or(*acc, membership)?,
                None => {
                    support.insert(image, membership);
                }
            }
        }

        let image = Self::from_support(out_schema, support);

        debug!(operand = self.len(), result = image.len(), "map");

        Ok(image)
    }

    /// Folds `op` over every membership in support order.
    pub fn collapse(&self, op: impl Into<BinaryOp>) -> Result<f64> {
        let op = op.into();
        let mut memberships = self.memberships();

        match memberships.next() {
            Some(first) if self.len() > 1 => memberships.try_fold(first, |acc, membership| op.call(acc, membership)),
            _ => Err(PrufError::InsufficientElements { len: self.len() }),
        }
    }

    /// Keeps the elements for which `predicate(tuple, μ)` holds.
    pub fn select<P>(&self, predicate: P) -> Self
    where
        P: Fn(&[Value], f64) -> bool,
    {
        let support = self
            .iter()
            .filter(|(tuple, membership)| predicate(tuple, *membership))
            .map(|(tuple, membership)| (tuple.clone(), membership))
            .collect();

        Self::from_support(self.schema.clone(), support)
    }

    /// μ′ = op(μ) for every element, e.g. a hedge such as `Hedge::Very`.
    pub fn apply(&self, op: impl Into<UnaryOp>) -> Result<Self> {
        let op = op.into();
        let support = self
            .iter()
            .map(|(tuple, membership)| Ok((tuple.clone(), op.call(membership)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        let applied = Self::from_support(self.schema.clone(), support);

        debug!(operand = self.len(), result = applied.len(), ?op, "apply");

        Ok(applied)
    }

    /// Truth qualification: μ′ = truth(μ).
    pub fn truth<T>(&self, truth: T) -> Result<Self>
    where
        T: Fn(f64) -> f64,
    {
        let mut support = IndexMap::with_capacity(self.len());

        for (tuple, membership) in self.iter() {
            let qualified = truth(membership);

            if !(0. ..=1.).contains(&qualified) {
                return Err(PrufError::InvalidMembership { value: qualified });
            }

            support.insert(tuple.clone(), qualified);
        }

        Ok(Self::from_support(self.schema.clone(), support))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{AndOp, Hedge, OrOp};
    use crate::tuple;

    fn rel(names: &[&str], pairs: Vec<(Tuple, f64)>) -> DiscreteFuzzyRelation {
        DiscreteFuzzyRelation::from_pairs(Schema::new(names.iter().copied()).unwrap(), pairs).unwrap()
    }

    #[test]
    fn test_join_hash_index() {
        let a = rel(&["x", "y"], vec![(tuple![1, "a"], 0.5), (tuple![2, "b"], 0.9)]);
        let b = rel(&["y", "z"], vec![(tuple!["a", true], 0.7), (tuple!["a", false], 0.2)]);
        let join = a.natural_join(&b, &Logic::default()).unwrap();

        assert_eq!(join.schema().names(), ["x", "y", "z"]);
        assert_eq!(join.len(), 2);
        assert_eq!(join.membership(&tuple![1, "a", true]), 0.5);
        assert_eq!(join.membership(&tuple![1, "a", false]), 0.2);

        let c = rel(&["w"], vec![(tuple![1], 1.)]);

        assert!(matches!(
            a.natural_join(&c, &Logic::default()),
            Err(PrufError::NoCommonAttribute { .. })
        ));
    }

    #[test]
    fn test_projection_fold_order() {
        let a = rel(
            &["x", "y"],
            vec![(tuple![1, "a"], 0.5), (tuple![2, "a"], 0.5), (tuple![3, "b"], 0.4)],
        );
        let max = a.projection(&["y"], OrOp::Max).unwrap();
        let sum = a.projection(&["y"], OrOp::AlgebraicSum).unwrap();

        assert_eq!(max.membership(&tuple!["a"]), 0.5);
        assert_eq!(sum.membership(&tuple!["a"]), 0.75);
        assert_eq!(sum.membership(&tuple!["b"]), 0.4);
        assert!(matches!(a.projection(&["q"], OrOp::Max), Err(PrufError::UnknownAttribute(_))));
        assert!(matches!(a.projection(&["x", "x"], OrOp::Max), Err(PrufError::InvalidSchema(_))));
        assert!(matches!(a.projection(&[], OrOp::Max), Err(PrufError::InvalidSchema(_))));

        // drastic product of 0.5 and 0.5 is 0, so ('a',) leaves the support
        let drastic = a.projection(&["y"], AndOp::DrasticProduct).unwrap();

        assert!(!drastic.contains(&tuple!["a"]));
        assert_eq!(drastic.membership(&tuple!["b"]), 0.4);
    }

    #[test]
    fn test_particularization_constraints() {
        let a = rel(&["x", "y"], vec![(tuple![1, "a"], 0.9), (tuple![2, "b"], 0.6)]);
        let weights = rel(&["x", "y"], vec![(tuple![2, "b"], 0.5)]);
        let logic = Logic::default();

        let by_value = a.particularization(&Assignment::new().value("y", "a"), &logic).unwrap();

        assert_eq!(by_value.len(), 1);
        assert_eq!(by_value.membership(&tuple![1, "a"]), 0.9);

        let by_pair = a
            .particularization(&Assignment::new().fuzzy_on(&["x", "y"], &weights), &logic)
            .unwrap();

        assert_eq!(by_pair.len(), 1);
        assert_eq!(by_pair.membership(&tuple![2, "b"]), 0.5);

        assert!(matches!(
            a.particularization(&Assignment::new().fuzzy("x", &weights), &logic),
            Err(PrufError::ArityMismatch { expected: 1, got: 2 })
        ));
        assert!(matches!(
            a.particularization(&Assignment::new().value("q", 1), &logic),
            Err(PrufError::UnknownAttribute(_))
        ));
        assert_eq!(a.particularization(&Assignment::new(), &logic).unwrap(), a);
    }

    #[test]
    fn test_reorder() {
        let a = rel(&["x", "y"], vec![(tuple![1, "a"], 0.9)]);
        let reordered = a.reorder(&["y", "x"]).unwrap();

        assert_eq!(reordered.schema().names(), ["y", "x"]);
        assert_eq!(reordered.membership(&tuple!["a", 1]), 0.9);
        assert_eq!(a.schema().names(), ["x", "y"]);
        assert!(matches!(a.reorder(&["x"]), Err(PrufError::NotAPermutation { .. })));
        assert!(matches!(a.reorder(&["x", "x"]), Err(PrufError::NotAPermutation { .. })));
        assert!(matches!(a.reorder(&["x", "z"]), Err(PrufError::NotAPermutation { .. })));
    }

    #[test]
    fn test_map_collapse_and_friends() {
        let a = rel(
            &["x", "y"],
            vec![(tuple!["a", "b"], 0.5), (tuple!["c", "d"], 0.8), (tuple!["e", "f"], 0.4)],
        );
        let z = Schema::new(["z"]).unwrap();
        let image = a
            .map(
                |tuple| if tuple[0] == Value::from("e") { tuple!["d"] } else { tuple!["c"] },
                z.clone(),
                &Logic::default(),
            )
            .unwrap();

        assert_eq!(image.membership(&tuple!["c"]), 0.8);
        assert_eq!(image.membership(&tuple!["d"]), 0.4);
        assert!(matches!(
            a.map(|tuple| tuple.to_vec(), z, &Logic::default()),
            Err(PrufError::ArityMismatch { expected: 1, got: 2 })
        ));

        assert_eq!(a.collapse(OrOp::Max).unwrap(), 0.8);
        assert_eq!(a.collapse(AndOp::Min).unwrap(), 0.4);

        let single = rel(&["x"], vec![(tuple![1], 0.5)]);

        assert!(matches!(single.collapse(OrOp::Max), Err(PrufError::InsufficientElements { len: 1 })));

        assert_eq!(a.select(|_, mu| mu > 0.45).len(), 2);
        assert_eq!(a.apply(Hedge::Very).unwrap().membership(&tuple!["a", "b"]), 0.25);
        assert_eq!(a.truth(|mu| if mu > 0.5 { 1. } else { 0. }).unwrap().len(), 1);
        assert!(a.truth(|mu| mu * 2.).is_err());
    }
}
