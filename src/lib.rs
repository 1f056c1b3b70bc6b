//! Discrete fuzzy relations and the PRUF operations over them.
//!
//! A [`DiscreteFuzzyRelation`] is a set of tuples over a named [`Schema`], each
//! with a degree of membership in (0, 1]. Operations derive new relations and
//! take the fuzzy connectives to use as an explicit [`Logic`]:
//!
//! ```
//! use pruf::{tuple, DiscreteFuzzyRelation, Logic, OrOp, Schema};
//!
//! let schema = Schema::new(["D1", "D2"]).unwrap();
//! let a = DiscreteFuzzyRelation::from_pairs(
//!     schema.clone(),
//!     [(tuple![1, "v2"], 0.3), (tuple!["v1", 3.4], 0.6), (tuple![2, "v2"], 0.9)],
//! )
//! .unwrap();
//! let b = DiscreteFuzzyRelation::from_pairs(schema, [(tuple!["v1", 3.4], 0.7)]).unwrap();
//!
//! let union = a.union(&b, &Logic::default()).unwrap();
//! assert_eq!(union[&tuple!["v1", 3.4]], 0.7);
//!
//! let d2 = a.projection(&["D2"], OrOp::Max).unwrap();
//! assert_eq!(d2[&tuple!["v2"]], 0.9);
//! ```
//!
//! The operator sugar (`&a | &b`, `&a & &b`, `!&a`, ...) uses the current
//! logic of the thread, which [`Logic::scoped`] overrides for a scope.

mod error;
mod linspace;
mod logic;
mod math;
mod membership;
mod ops;
mod relation;
pub mod render;
mod schema;
mod table;
mod value;

pub use error::{PrufError, Result};
pub use logic::{Logic, LogicGuard};
pub use membership::{Bell, MembershipFunction, PiecewiseLinear, Trapezoidal, Triangular};
pub use ops::{AndOp, BinaryOp, Hedge, NotOp, OrOp, UnaryOp};
pub use relation::{Assignment, DiscreteFuzzyRelation};
pub use render::TableFormat;
pub use schema::Schema;
pub use table::{Table, WeightColumn};
pub use value::{Tuple, Value};
