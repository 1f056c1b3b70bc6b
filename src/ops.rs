use std::fmt;
use std::str::FromStr;

use num::traits::FloatConst;
use num::{Float, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::{PrufError, Result};

/// Rejects operands outside [0, 1], NaN included.
fn in_domain<F: Float>(value: F) -> Result<F> {
    if value >= F::zero() && value <= F::one() {
        Ok(value)
    } else {
        Err(PrufError::Domain {
            value: ToPrimitive::to_f64(&value).unwrap_or(f64::NAN),
        })
    }
}

macro_rules! operator_family {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every member of the family, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = PrufError;

            fn from_str(s: &str) -> Result<Self> {
                let normalized = s.trim().to_ascii_uppercase().replace('-', "_");

                match normalized.as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(PrufError::InvalidOperatorKind {
                        kind: $kind,
                        name: s.to_owned(),
                    }),
                }
            }
        }
    };
}

/// And operator (t-norm) used to intersect memberships.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AndOp {
    #[default]
    Min,
    Lukasiewicz,
    AlgebraicProduct,
    DrasticProduct,
}

operator_family!(AndOp, "AND", {
    Min => "MIN",
    Lukasiewicz => "LUKASIEWICZ",
    AlgebraicProduct => "ALGEBRAIC_PRODUCT",
    DrasticProduct => "DRASTIC_PRODUCT",
});

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> Result<F> {
        let (u, v) = (in_domain(u)?, in_domain(v)?);

        Ok(match self {
            Self::Min => F::min(u, v),
            Self::Lukasiewicz => F::max(u + v - F::one(), F::zero()),
            Self::AlgebraicProduct => u * v,
            Self::DrasticProduct => {
                if u == F::one() || v == F::one() {
                    F::min(u, v)
                } else {
                    F::zero()
                }
            },
        })
    }
}

/// Or operator (t-conorm) used to unite memberships.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrOp {
    #[default]
    Max,
    Lukasiewicz,
    AlgebraicSum,
    DrasticSum,
}

operator_family!(OrOp, "OR", {
    Max => "MAX",
    Lukasiewicz => "LUKASIEWICZ",
    AlgebraicSum => "ALGEBRAIC_SUM",
    DrasticSum => "DRASTIC_SUM",
});

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> Result<F> {
        let (u, v) = (in_domain(u)?, in_domain(v)?);

        Ok(match self {
            Self::Max => F::max(u, v),
            Self::Lukasiewicz => F::min(u + v, F::one()),
            Self::AlgebraicSum => u + v - u * v,
            Self::DrasticSum => {
                if u == F::zero() || v == F::zero() {
                    F::max(u, v)
                } else {
                    F::one()
                }
            },
        })
    }
}

/// Negation of a membership degree.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotOp {
    #[default]
    Standard,
    Cosine,
}

operator_family!(NotOp, "NOT", {
    Standard => "STANDARD",
    Cosine => "COSINE",
});

impl NotOp {
    pub fn call<F: Float + FloatConst>(self, u: F) -> Result<F> {
        let u = in_domain(u)?;

        Ok(match self {
            Self::Standard => F::one() - u,
            Self::Cosine => (F::one() + F::cos(F::PI() * u)) / (F::one() + F::one()),
        })
    }
}

/// Linguistic modifiers ("hedges") reshaping a membership degree.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Hedge {
    /// Concentration: `u²`
    Very,
    /// Dilation: `√u`
    MoreOrLess,
}

operator_family!(Hedge, "linguistic modifier", {
    Very => "VERY",
    MoreOrLess => "MORE_OR_LESS",
});

impl Hedge {
    pub fn call<F: Float>(self, u: F) -> Result<F> {
        let u = in_domain(u)?;

        Ok(match self {
            Self::Very => u * u,
            Self::MoreOrLess => u.sqrt(),
        })
    }
}

/// A binary connective passed explicitly to folds such as projection and collapse.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BinaryOp {
    And(AndOp),
    Or(OrOp),
}

impl BinaryOp {
    pub fn call<F: Float>(self, u: F, v: F) -> Result<F> {
        match self {
            Self::And(op) => op.call(u, v),
            Self::Or(op) => op.call(u, v),
        }
    }
}

impl From<AndOp> for BinaryOp {
    fn from(op: AndOp) -> Self {
        Self::And(op)
    }
}

impl From<OrOp> for BinaryOp {
    fn from(op: OrOp) -> Self {
        Self::Or(op)
    }
}

/// A unary operator applied elementwise to memberships.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum UnaryOp {
    Not(NotOp),
    Hedge(Hedge),
}

impl UnaryOp {
    pub fn call<F: Float + FloatConst>(self, u: F) -> Result<F> {
        match self {
            Self::Not(op) => op.call(u),
            Self::Hedge(op) => op.call(u),
        }
    }
}

impl From<NotOp> for UnaryOp {
    fn from(op: NotOp) -> Self {
        Self::Not(op)
    }
}

impl From<Hedge> for UnaryOp {
    fn from(op: Hedge) -> Self {
        Self::Hedge(op)
    }
}

#[cfg(test)]
fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-12, "{actual} != {expected}");
}

#[test]
fn test_truth_tables() {
    let (a, b) = (0.7, 0.5);

    assert_close(AndOp::Min.call(a, b).unwrap(), 0.5);
    assert_close(AndOp::Lukasiewicz.call(a, b).unwrap(), 0.2);
    assert_close(AndOp::AlgebraicProduct.call(a, b).unwrap(), 0.35);
    assert_close(AndOp::DrasticProduct.call(a, b).unwrap(), 0.);
    assert_close(AndOp::DrasticProduct.call(1., b).unwrap(), 0.5);

    assert_close(OrOp::Max.call(a, b).unwrap(), 0.7);
    assert_close(OrOp::Lukasiewicz.call(a, b).unwrap(), 1.);
    assert_close(OrOp::AlgebraicSum.call(a, b).unwrap(), 0.85);
    assert_close(OrOp::DrasticSum.call(a, b).unwrap(), 1.);
    assert_close(OrOp::DrasticSum.call(0., b).unwrap(), 0.5);

    assert_close(NotOp::Standard.call(a).unwrap(), 0.3);
    assert_close(NotOp::Cosine.call(0.5).unwrap(), 0.5);
    assert_close(NotOp::Cosine.call(0.).unwrap(), 1.);
    assert_close(NotOp::Cosine.call(1.).unwrap(), 0.);

    assert_close(Hedge::Very.call(a).unwrap(), 0.49);
    assert_close(Hedge::MoreOrLess.call(0.25).unwrap(), 0.5);
}

#[test]
fn test_f32_operands() {
    assert_eq!(AndOp::Min.call(0.25f32, 0.75f32).unwrap(), 0.25f32);
    assert_eq!(OrOp::Max.call(0.25f32, 0.75f32).unwrap(), 0.75f32);
}

#[test]
fn test_domain_errors() {
    for op in AndOp::ALL {
        assert!(matches!(op.call(1.5, 0.2), Err(PrufError::Domain { .. })));
        assert!(matches!(op.call(0.2, -0.1), Err(PrufError::Domain { .. })));
        assert!(op.call(f64::NAN, 0.2).is_err());
    }
    for op in OrOp::ALL {
        assert!(matches!(op.call(0.2, 1.01), Err(PrufError::Domain { .. })));
    }
    for op in NotOp::ALL {
        assert!(op.call(2.).is_err());
    }
    assert!(matches!(Hedge::Very.call(-0.5), Err(PrufError::Domain { value }) if value == -0.5));
}

#[test]
fn test_binary_and_unary_wrappers() {
    assert_eq!(BinaryOp::from(AndOp::Min).call(0.3, 0.6).unwrap(), 0.3);
    assert_eq!(BinaryOp::from(OrOp::Max).call(0.3, 0.6).unwrap(), 0.6);
    assert_close(UnaryOp::from(NotOp::Standard).call(0.25).unwrap(), 0.75);
    assert_close(UnaryOp::from(Hedge::Very).call(0.5).unwrap(), 0.25);
}

#[test]
fn test_names_round_trip() {
    for op in AndOp::ALL {
        assert_eq!(op.name().parse::<AndOp>().unwrap(), *op);
    }
    assert_eq!("algebraic-sum".parse::<OrOp>().unwrap(), OrOp::AlgebraicSum);
    assert_eq!(" cosine ".parse::<NotOp>().unwrap(), NotOp::Cosine);
    assert_eq!("more_or_less".parse::<Hedge>().unwrap(), Hedge::MoreOrLess);
    assert_eq!(AndOp::DrasticProduct.to_string(), "DRASTIC_PRODUCT");
}

#[test]
fn test_wrong_family_name() {
    let err = "MAX".parse::<AndOp>().unwrap_err();

    assert!(matches!(err, PrufError::InvalidOperatorKind { kind: "AND", ref name } if name == "MAX"));
    assert!("MIN".parse::<OrOp>().is_err());
    assert!("VERY".parse::<NotOp>().is_err());
}
