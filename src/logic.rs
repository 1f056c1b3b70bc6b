//! Selection of the fuzzy connectives used by relation operations.
//!
//! Every operation that needs AND/OR/NOT takes a `&Logic`. The thread-local
//! *current* logic only backs the operator sugar (`&a | &b` and friends) and
//! is changed through [`Logic::scoped`], never by plain assignment.

use std::cell::Cell;
use std::env;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::ops::{AndOp, NotOp, OrOp};

/// The AND/OR/NOT operators in force. Defaults to `MIN`/`MAX`/`STANDARD`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub struct Logic {
    and: AndOp,
    or: OrOp,
    not: NotOp,
}

thread_local! {
    static CURRENT: Cell<Logic> = Cell::new(Logic::DEFAULT);
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

impl Logic {
    pub const DEFAULT: Logic = Logic {
        and: AndOp::Min,
        or: OrOp::Max,
        not: NotOp::Standard,
    };

    pub fn new(and: AndOp, or: OrOp, not: NotOp) -> Self {
        Self { and, or, not }
    }

    pub fn and(&self, a: f64, b: f64) -> Result<f64> {
        self.and.call(a, b)
    }

    pub fn or(&self, a: f64, b: f64) -> Result<f64> {
        self.or.call(a, b)
    }

    pub fn not(&self, a: f64) -> Result<f64> {
        self.not.call(a)
    }

    pub fn and_op(&self) -> AndOp {
        self.and
    }

    pub fn or_op(&self) -> OrOp {
        self.or
    }

    pub fn not_op(&self) -> NotOp {
        self.not
    }

    pub fn set_and(&mut self, op: AndOp) {
        trace!(from = %self.and, to = %op, "and operator changed");
        self.and = op;
    }

    pub fn set_or(&mut self, op: OrOp) {
        trace!(from = %self.or, to = %op, "or operator changed");
        self.or = op;
    }

    pub fn set_not(&mut self, op: NotOp) {
        trace!(from = %self.not, to = %op, "not operator changed");
        self.not = op;
    }

    /// Fails with `InvalidOperatorKind` unless `name` is an AND operator.
    pub fn set_and_by_name(&mut self, name: &str) -> Result<()> {
        self.set_and(name.parse()?);
        Ok(())
    }

    pub fn set_or_by_name(&mut self, name: &str) -> Result<()> {
        self.set_or(name.parse()?);
        Ok(())
    }

    pub fn set_not_by_name(&mut self, name: &str) -> Result<()> {
        self.set_not(name.parse()?);
        Ok(())
    }

    pub fn with_and(mut self, op: AndOp) -> Self {
        self.and = op;
        self
    }

    pub fn with_or(mut self, op: OrOp) -> Self {
        self.or = op;
        self
    }

    pub fn with_not(mut self, op: NotOp) -> Self {
        self.not = op;
        self
    }

    /// Every AND/OR/NOT combination, AND varying slowest.
    pub fn all() -> impl Iterator<Item = Logic> {
        AndOp::ALL.iter().flat_map(|&and| {
            OrOp::ALL
                .iter()
                .flat_map(move |&or| NotOp::ALL.iter().map(move |&not| Logic::new(and, or, not)))
        })
    }

    /// Parses a TOML table with optional `and`, `or` and `not` keys.
    ///
    /// ```
    /// use pruf::{AndOp, Logic};
    ///
    /// let logic = Logic::from_toml_str(r#"and = "ALGEBRAIC_PRODUCT""#).unwrap();
    /// assert_eq!(logic.and_op(), AndOp::AlgebraicProduct);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlays `PRUF_AND`, `PRUF_OR` and `PRUF_NOT` on the defaults.
    pub fn from_env() -> Result<Self> {
        let mut logic = Self::default();

        if let Ok(name) = env::var("PRUF_AND") {
            logic.set_and_by_name(&name)?;
        }
        if let Ok(name) = env::var("PRUF_OR") {
            logic.set_or_by_name(&name)?;
        }
        if let Ok(name) = env::var("PRUF_NOT") {
            logic.set_not_by_name(&name)?;
        }

        Ok(logic)
    }

    /// The logic used by operator sugar on this thread.
    pub fn current() -> Logic {
        CURRENT.with(Cell::get)
    }

    /// Makes `self` the current logic until the returned guard is dropped.
    #[must_use = "the previous logic is restored as soon as the guard is dropped"]
    pub fn scoped(self) -> LogicGuard {
        let previous = CURRENT.with(|current| current.replace(self));
        let depth = DEPTH.with(|depth| {
            depth.set(depth.get() + 1);
            depth.get()
        });

        trace!(logic = ?self, depth, "scoped logic entered");

        LogicGuard {
            previous,
            depth,
            _not_send: PhantomData,
        }
    }
}

/// Restores the previously current [`Logic`] on drop.
///
/// Guards nest: they must be dropped in the reverse order they were created.
/// Dropping an outer guard while an inner one is alive is a bug and trips a
/// debug assertion.
pub struct LogicGuard {
    previous: Logic,
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for LogicGuard {
    fn drop(&mut self) {
        let depth = DEPTH.with(Cell::get);

        debug_assert_eq!(depth, self.depth, "scoped logic guards dropped out of order");

        DEPTH.with(|cell| cell.set(depth.saturating_sub(1)));
        CURRENT.with(|current| current.set(self.previous));
        trace!(logic = ?self.previous, "scoped logic restored");
    }
}

#[test]
fn test_dispatch() {
    let mut logic = Logic::default();

    assert_eq!(logic.and(0.7, 0.5).unwrap(), 0.5);
    assert_eq!(logic.or(0.7, 0.5).unwrap(), 0.7);
    assert_eq!(logic.not(0.25).unwrap(), 0.75);

    logic.set_and(AndOp::AlgebraicProduct);
    logic.set_or(OrOp::DrasticSum);
    assert_eq!(logic.and(0.5, 0.5).unwrap(), 0.25);
    assert_eq!(logic.or(0.5, 0.5).unwrap(), 1.);
    assert!(logic.and(1.2, 0.5).is_err());
}

#[test]
fn test_set_by_name() {
    use crate::error::PrufError;

    let mut logic = Logic::default();

    logic.set_not_by_name("COSINE").unwrap();
    assert_eq!(logic.not_op(), NotOp::Cosine);
    assert!(matches!(
        logic.set_and_by_name("MAX"),
        Err(PrufError::InvalidOperatorKind { kind: "AND", .. })
    ));
    // a failed selection leaves the previous one in place
    assert_eq!(logic.and_op(), AndOp::Min);
}

#[test]
fn test_all_combinations() {
    let all: Vec<Logic> = Logic::all().collect();

    assert_eq!(all.len(), 32);
    assert_eq!(all[0], Logic::default());
    assert_eq!(all[31], Logic::new(AndOp::DrasticProduct, OrOp::DrasticSum, NotOp::Cosine));
}

#[test]
fn test_scoped_current() {
    assert_eq!(Logic::current(), Logic::default());

    {
        let _outer = Logic::default().with_and(AndOp::Lukasiewicz).scoped();
        assert_eq!(Logic::current().and_op(), AndOp::Lukasiewicz);

        {
            let _inner = Logic::default().with_or(OrOp::AlgebraicSum).scoped();
            assert_eq!(Logic::current().and_op(), AndOp::Min);
            assert_eq!(Logic::current().or_op(), OrOp::AlgebraicSum);
        }

        assert_eq!(Logic::current().and_op(), AndOp::Lukasiewicz);
        assert_eq!(Logic::current().or_op(), OrOp::Max);
    }

    assert_eq!(Logic::current(), Logic::default());
}

#[test]
fn test_toml_config() {
    let logic = Logic::from_toml_str(
        r#"
        and = "LUKASIEWICZ"
        not = "COSINE"
        "#,
    )
    .unwrap();

    assert_eq!(logic, Logic::new(AndOp::Lukasiewicz, OrOp::Max, NotOp::Cosine));
    assert!(Logic::from_toml_str(r#"or = "MIN""#).is_err());
    assert_eq!(Logic::from_toml_str("").unwrap(), Logic::default());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "dropped out of order")]
fn test_guards_dropped_out_of_order() {
    let outer = Logic::default().with_and(AndOp::Lukasiewicz).scoped();
    let _inner = Logic::default().with_or(OrOp::AlgebraicSum).scoped();

    drop(outer);
}

#[test]
fn test_from_env() {
    use crate::error::PrufError;

    env::set_var("PRUF_AND", "algebraic-product");
    env::set_var("PRUF_OR", "ALGEBRAIC_SUM");
    env::set_var("PRUF_NOT", "COSINE");

    let logic = Logic::from_env();

    env::set_var("PRUF_AND", "MAX");

    let wrong_family = Logic::from_env();

    env::remove_var("PRUF_AND");
    env::remove_var("PRUF_OR");
    env::remove_var("PRUF_NOT");

    assert_eq!(
        logic.unwrap(),
        Logic::new(AndOp::AlgebraicProduct, OrOp::AlgebraicSum, NotOp::Cosine)
    );
    assert!(matches!(
        wrong_family,
        Err(PrufError::InvalidOperatorKind { kind: "AND", .. })
    ));
    assert_eq!(Logic::from_env().unwrap(), Logic::default());
}
