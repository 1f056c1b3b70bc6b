//! Discrete fuzzy relations: a schema plus the support mapping each tuple with
//! positive membership to its degree.
//!
//! Tuples outside the support have membership 0. Operations never mutate their
//! operands; they derive a new relation. The support keeps insertion order and
//! every fold (projection, collapse) walks it in that order.

mod metrics;
mod relational;
mod set_ops;

use std::collections::HashMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, Div, Index, Mul, Not, RangeInclusive, Sub};

use indexmap::IndexMap;

use crate::error::{PrufError, Result};
use crate::linspace::Linspace;
use crate::logic::Logic;
use crate::membership::MembershipFunction;
use crate::schema::Schema;
use crate::value::{Tuple, Value};

pub use relational::Assignment;

#[derive(Clone, Debug, PartialEq)]
pub struct DiscreteFuzzyRelation {
    schema: Schema,
    support: IndexMap<Tuple, f64>,
}

/// Memberships accepted by `put` and the constructors.
fn check_membership(membership: f64) -> Result<f64> {
    if membership > 0. && membership <= 1. {
        Ok(membership)
    } else {
        Err(PrufError::InvalidMembership { value: membership })
    }
}

impl DiscreteFuzzyRelation {
    /// The empty relation over `schema`.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            support: IndexMap::new(),
        }
    }

    /// Builds a relation from `(tuple, membership)` pairs; a repeated tuple keeps
    /// its first position and its last membership.
    pub fn from_pairs<I, T>(schema: Schema, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
        T: Into<Tuple>,
    {
        let mut relation = Self::new(schema);

        for (tuple, membership) in pairs {
            relation.put(tuple, membership)?;
        }

        Ok(relation)
    }

    /// Wraps an already computed support, dropping zero memberships.
    pub(crate) fn from_support(schema: Schema, mut support: IndexMap<Tuple, f64>) -> Self {
        support.retain(|_, membership| *membership > 0.);

        Self { schema, support }
    }

    /// Discretises `mf` over `n` evenly spaced points of `range` into a relation
    /// over the single attribute `attribute`.
    pub fn sample<M>(attribute: &str, mf: &M, range: RangeInclusive<f64>, n: usize) -> Result<Self>
    where
        M: MembershipFunction + ?Sized,
    {
        let (min, max) = (*range.start(), *range.end());

        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(PrufError::InvalidParameters(format!("cannot sample over {min}..={max}")));
        }
        if n == 0 {
            return Err(PrufError::InvalidParameters("sampling needs at least one point".into()));
        }

        let schema = Schema::new([attribute])?;
        let mut support = IndexMap::with_capacity(n);

        for x in Linspace::new(min, max, n) {
            let membership = mf.evaluate(x);

            if !(0. ..=1.).contains(&membership) {
                return Err(PrufError::InvalidMembership { value: membership });
            }

            support.insert(vec![Value::Float(x)], membership);
        }

        Ok(Self::from_support(schema, support))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Membership of `tuple`, 0 when it is not in the support.
    pub fn membership(&self, tuple: &[Value]) -> f64 {
        self.support.get(tuple).copied().unwrap_or(0.)
    }

    pub fn contains(&self, tuple: &[Value]) -> bool {
        self.support.contains_key(tuple)
    }

    /// Adds `tuple` or updates its membership.
    pub fn put(&mut self, tuple: impl Into<Tuple>, membership: f64) -> Result<()> {
        let tuple = tuple.into();

        if tuple.len() != self.schema.len() {
            return Err(PrufError::ArityMismatch {
                expected: self.schema.len(),
                got: tuple.len(),
            });
        }

        self.support.insert(tuple, check_membership(membership)?);

        Ok(())
    }

    /// Removes `tuple` from the support, returning its former membership.
    pub fn remove(&mut self, tuple: &[Value]) -> Option<f64> {
        self.support.shift_remove(tuple)
    }

    pub fn len(&self) -> usize {
        self.support.len()
    }

    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    /// Support elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Tuple, f64)> {
        self.support.iter().map(|(tuple, membership)| (tuple, *membership))
    }

    pub fn elements(&self) -> impl Iterator<Item = &Tuple> {
        self.support.keys()
    }

    pub fn memberships(&self) -> impl Iterator<Item = f64> + '_ {
        self.support.values().copied()
    }

    pub fn to_map(&self) -> HashMap<Tuple, f64> {
        self.iter().map(|(tuple, membership)| (tuple.clone(), membership)).collect()
    }

    /// Renames attributes in place, applying `renames` in order. Every source must
    /// exist and every target must be unused; on error the schema is left untouched.
    pub fn rename_schema(&mut self, renames: &[(&str, &str)]) -> Result<()> {
        self.schema = self.schema.renamed(renames)?;

        Ok(())
    }
}

impl Index<&Tuple> for DiscreteFuzzyRelation {
    type Output = f64;

    fn index(&self, tuple: &Tuple) -> &f64 {
        self.support.get(tuple).unwrap_or(&0.)
    }
}

impl fmt::Display for DiscreteFuzzyRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::zadeh(self))
    }
}

// Operator sugar over the thread's current logic (see `Logic::scoped`).

impl BitOr for &DiscreteFuzzyRelation {
    type Output = Result<DiscreteFuzzyRelation>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs, &Logic::current())
    }
}

impl BitAnd for &DiscreteFuzzyRelation {
    type Output = Result<DiscreteFuzzyRelation>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs, &Logic::current())
    }
}

impl Sub for &DiscreteFuzzyRelation {
    type Output = Result<DiscreteFuzzyRelation>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs, &Logic::current())
    }
}

impl Not for &DiscreteFuzzyRelation {
    type Output = Result<DiscreteFuzzyRelation>;

    fn not(self) -> Self::Output {
        self.negate(&Logic::current())
    }
}

impl Mul for &DiscreteFuzzyRelation {
    type Output = Result<DiscreteFuzzyRelation>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.cartesian_product(rhs, &Logic::current())
    }
}

impl Div for &DiscreteFuzzyRelation {
    type Output = Result<f64>;

    fn div(self, rhs: Self) -> Self::Output {
        self.proportion(rhs, &Logic::current())
    }
}
