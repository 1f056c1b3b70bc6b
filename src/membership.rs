//! Continuous membership functions.
//!
//! Relations only ever see these through [`MembershipFunction::evaluate`], so
//! any closure `Fn(f64) -> f64` works as well as the shapes defined here.

use crate::error::{PrufError, Result};
use crate::math::interp;

pub trait MembershipFunction {
    /// Degree of membership of `x`, in [0, 1].
    fn evaluate(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64> MembershipFunction for F {
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Rises linearly from `a` to a peak at `b`, falls back to zero at `c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangular {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        if a < b && b < c {
            Ok(Self { a, b, c })
        } else {
            Err(PrufError::InvalidParameters(format!(
                "triangular shape needs a < b < c, got ({a}, {b}, {c})"
            )))
        }
    }
}

impl MembershipFunction for Triangular {
    fn evaluate(&self, x: f64) -> f64 {
        if self.a <= x && x <= self.b {
            (x - self.a) / (self.b - self.a)
        } else if self.b <= x && x <= self.c {
            (self.c - x) / (self.c - self.b)
        } else {
            0.
        }
    }
}

/// Plateau of 1 over `[b, c]` with linear shoulders down to `a` and `d`.
///
/// `a == b` or `c == d` give vertical edges, so infinite shoulders such as
/// `Trapezoidal::new(f64::NEG_INFINITY, f64::NEG_INFINITY, 10., 20.)` are fine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoidal {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Trapezoidal {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        if a <= b && b <= c && c <= d {
            Ok(Self { a, b, c, d })
        } else {
            Err(PrufError::InvalidParameters(format!(
                "trapezoidal shape needs a <= b <= c <= d, got ({a}, {b}, {c}, {d})"
            )))
        }
    }
}

impl MembershipFunction for Trapezoidal {
    fn evaluate(&self, x: f64) -> f64 {
        // strict bounds on the shoulders keep a == b and c == d from dividing by zero
        if self.a <= x && x < self.b {
            (x - self.a) / (self.b - self.a)
        } else if self.b <= x && x <= self.c {
            1.
        } else if self.c < x && x < self.d {
            (self.d - x) / (self.d - self.c)
        } else {
            0.
        }
    }
}

/// Gaussian bell `exp(-(x - m)² / s²)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bell {
    m: f64,
    s: f64,
}

impl Bell {
    pub fn new(m: f64, s: f64) -> Result<Self> {
        if s != 0. && s.is_finite() && m.is_finite() {
            Ok(Self { m, s })
        } else {
            Err(PrufError::InvalidParameters(format!("bell shape needs a finite, non-zero width, got {s}")))
        }
    }
}

impl MembershipFunction for Bell {
    fn evaluate(&self, x: f64) -> f64 {
        (-((x - self.m).powi(2)) / self.s.powi(2)).exp()
    }
}

/// Linear interpolation between `(x, membership)` points, flat outside them.
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseLinear(Vec<(f64, f64)>);

impl PiecewiseLinear {
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        let points: Vec<(f64, f64)> = points.into_iter().collect();

        if points.is_empty() {
            return Err(PrufError::InvalidParameters("piecewise shape needs at least one point".into()));
        }
        if points.windows(2).any(|w| !(w[0].0 <= w[1].0)) {
            return Err(PrufError::InvalidParameters("piecewise points must be sorted by x".into()));
        }
        if let Some(&(_, y)) = points.iter().find(|(_, y)| !(0. ..=1.).contains(y)) {
            return Err(PrufError::InvalidParameters(format!("membership {y} is outside [0, 1]")));
        }

        Ok(Self(points))
    }
}

impl MembershipFunction for PiecewiseLinear {
    fn evaluate(&self, x: f64) -> f64 {
        interp(x, &self.0)
    }
}

#[test]
fn test_triangular() {
    let mf = Triangular::new(0., 5., 10.).unwrap();

    assert_eq!(mf.evaluate(5.), 1.);
    assert_eq!(mf.evaluate(2.5), 0.5);
    assert_eq!(mf.evaluate(7.5), 0.5);
    assert_eq!(mf.evaluate(11.), 0.);
    assert!(Triangular::new(0., 0., 1.).is_err());
}

#[test]
fn test_trapezoidal() {
    let mf = Trapezoidal::new(0., 2., 4., 8.).unwrap();

    assert_eq!(mf.evaluate(1.), 0.5);
    assert_eq!(mf.evaluate(3.), 1.);
    assert_eq!(mf.evaluate(6.), 0.5);
    assert_eq!(mf.evaluate(8.), 0.);

    let left_open = Trapezoidal::new(f64::NEG_INFINITY, f64::NEG_INFINITY, 10., 20.).unwrap();

    assert_eq!(left_open.evaluate(-1e300), 1.);
    assert_eq!(left_open.evaluate(15.), 0.5);
    assert!(Trapezoidal::new(1., 0., 2., 3.).is_err());
}

#[test]
fn test_bell_and_closures() {
    let bell = Bell::new(0., 1.).unwrap();

    assert_eq!(bell.evaluate(0.), 1.);
    assert!((bell.evaluate(1.) - (-1f64).exp()).abs() < 1e-12);
    assert!(Bell::new(0., 0.).is_err());

    let half = |_x: f64| 0.5;

    assert_eq!(half.evaluate(42.), 0.5);
}

#[test]
fn test_piecewise_linear() {
    let high = PiecewiseLinear::new([(175., 0.), (180., 0.2), (185., 0.7), (190., 1.)]).unwrap();

    assert_eq!(high.evaluate(170.), 0.);
    assert!((high.evaluate(182.5) - 0.45).abs() < 1e-12);
    assert_eq!(high.evaluate(200.), 1.);
    assert!(PiecewiseLinear::new([(1., 0.), (0., 1.)]).is_err());
    assert!(PiecewiseLinear::new([(1., 1.5)]).is_err());
}
