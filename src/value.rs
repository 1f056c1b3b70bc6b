//! Attribute values stored in relation tuples.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single attribute value.
///
/// Floats compare and hash by bit pattern (with `-0.0` folded into `0.0`), so
/// they can key a relation's support. `Float(1.0)` and `Int(1)` are distinct.
#[derive(Clone, Debug)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// One value per schema position.
pub type Tuple = Vec<Value>;

/// Builds a [`Tuple`] from anything convertible into [`Value`].
///
/// ```
/// use pruf::{tuple, Value};
///
/// assert_eq!(tuple![1, "v2"], vec![Value::Int(1), Value::Str("v2".into())]);
/// ```
#[macro_export]
macro_rules! tuple {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

impl Value {
    fn float_bits(f: f64) -> u64 {
        if f == 0. {
            0f64.to_bits()
        } else {
            f.to_bits()
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) => 1,
            Self::Float(_) => 2,
            Self::Str(_) => 3,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => Self::float_bits(*a) == Self::float_bits(*b),
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(f) => Self::float_bits(*f).hash(state),
            Self::Str(s) => s.hash(state),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => {
                if self == other {
                    Ordering::Equal
                } else {
                    a.total_cmp(b)
                }
            },
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            // Debug keeps the trailing ".0" on whole floats
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

/// Renders a tuple the way Zadeh notation prints elements: `(1, 'v2')`.
pub(crate) fn fmt_tuple(tuple: &[Value]) -> String {
    let cells: Vec<String> = tuple
        .iter()
        .map(|value| match value {
            Value::Str(s) => format!("'{s}'"),
            other => other.to_string(),
        })
        .collect();

    format!("({})", cells.join(", "))
}

#[test]
fn test_float_keys() {
    use std::collections::HashSet;

    let mut set = HashSet::new();

    set.insert(Value::from(0.));
    assert!(set.contains(&Value::from(-0.)));
    assert!(!set.contains(&Value::from(0)));
    assert_eq!(Value::from(3.4), Value::Float(3.4));
    assert_ne!(Value::from(1), Value::from(1.));
}

#[test]
fn test_ordering_and_display() {
    let mut values = vec![Value::from("b"), Value::from(2.5), Value::from(3), Value::from("a"), Value::from(true)];

    values.sort();

    assert_eq!(values, tuple![true, 3, 2.5, "a", "b"]);
    assert_eq!(Value::from(1.).to_string(), "1.0");
    assert_eq!(fmt_tuple(&tuple![1, "v2"]), "(1, 'v2')");
}
