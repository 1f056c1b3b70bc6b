use std::collections::HashSet;
use std::fmt;

use crate::error::{PrufError, Result};

/// An ordered, duplicate-free list of attribute names.
///
/// Order defines tuple positions. Use [`Schema::attribute_set`] when only the
/// names matter.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Schema(Vec<String>);

impl Schema {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(PrufError::InvalidSchema("a schema needs at least one attribute".into()));
        }

        let mut seen = HashSet::with_capacity(names.len());

        for name in &names {
            if name.is_empty() {
                return Err(PrufError::InvalidSchema("attribute names must not be empty".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(PrufError::InvalidSchema(format!("duplicate attribute '{name}'")));
            }
        }

        Ok(Self(names))
    }

    /// For schemas assembled from attributes already known to be distinct.
    pub(crate) fn from_distinct(names: Vec<String>) -> Self {
        debug_assert!(!names.is_empty());
        debug_assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());

        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated schema.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|attr| attr == name)
    }

    pub(crate) fn require_position(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| PrufError::UnknownAttribute(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn attribute_set(&self) -> HashSet<&str> {
        self.iter().collect()
    }

    /// Attributes shared with `other`, in this schema's order.
    pub fn common_with<'s>(&'s self, other: &Schema) -> Vec<&'s str> {
        self.iter().filter(|name| other.contains(name)).collect()
    }

    pub fn is_permutation_of(&self, other: &Schema) -> bool {
        self.len() == other.len() && self.attribute_set() == other.attribute_set()
    }

    pub(crate) fn require_same(&self, other: &Schema) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(PrufError::SchemaMismatch {
                left: self.0.clone(),
                right: other.0.clone(),
            })
        }
    }

    /// Concatenates two schemas that must not share an attribute.
    pub fn concat(&self, other: &Schema) -> Result<Schema> {
        if let Some(attribute) = other.iter().find(|name| self.contains(name)) {
            return Err(PrufError::SchemaOverlap {
                attribute: attribute.to_owned(),
            });
        }

        Ok(Schema(self.0.iter().chain(&other.0).cloned().collect()))
    }

    /// Applies `renames` (old name to new name) in the given order, all or nothing.
    /// Each rename sees the names produced by the ones before it.
    pub fn renamed(&self, renames: &[(&str, &str)]) -> Result<Schema> {
        let mut names = self.0.clone();

        for &(from, to) in renames {
            let index = names
                .iter()
                .position(|name| name == from)
                .ok_or_else(|| PrufError::UnknownAttribute(from.to_owned()))?;

            if to.is_empty() {
                return Err(PrufError::InvalidSchema("attribute names must not be empty".into()));
            }
            if names.iter().any(|name| name == to) {
                return Err(PrufError::InvalidSchema(format!("'{to}' is already in the schema")));
            }

            names[index] = to.to_owned();
        }

        Ok(Schema(names))
    }

    pub(crate) fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[test]
fn test_validation() {
    assert!(Schema::new(["A", "B"]).is_ok());
    assert!(matches!(Schema::new(Vec::<String>::new()), Err(PrufError::InvalidSchema(_))));
    assert!(matches!(Schema::new(["A", "B", "A"]), Err(PrufError::InvalidSchema(_))));
    assert!(matches!(Schema::new(["A", ""]), Err(PrufError::InvalidSchema(_))));
    // `mu` is an ordinary attribute name
    assert!(Schema::new(["mu"]).is_ok());
}

#[test]
fn test_shapes() {
    let ab = Schema::new(["A", "B"]).unwrap();
    let ba = Schema::new(["B", "A"]).unwrap();
    let bc = Schema::new(["B", "C"]).unwrap();

    assert_ne!(ab, ba);
    assert!(ab.is_permutation_of(&ba));
    assert!(!ab.is_permutation_of(&bc));
    assert_eq!(ab.common_with(&bc), vec!["B"]);
    assert!(matches!(ab.concat(&bc), Err(PrufError::SchemaOverlap { attribute }) if attribute == "B"));
    assert_eq!(ab.concat(&Schema::new(["C"]).unwrap()).unwrap().to_string(), "(A, B, C)");
    assert!(ab.require_same(&ba).is_err());
}

#[test]
fn test_renamed() {
    let schema = Schema::new(["A", "B"]).unwrap();

    assert_eq!(schema.renamed(&[("A", "X")]).unwrap().names(), ["X", "B"]);
    assert!(schema.renamed(&[("A", "X"), ("B", "X")]).is_err());
    assert!(matches!(schema.renamed(&[("Z", "Y")]), Err(PrufError::UnknownAttribute(name)) if name == "Z"));
}

#[test]
fn test_renamed_chain_follows_order() {
    let schema = Schema::new(["A", "B"]).unwrap();

    // A -> B collides with the B still in place
    for _ in 0..100 {
        assert!(matches!(
            schema.renamed(&[("A", "B"), ("B", "C")]),
            Err(PrufError::InvalidSchema(_))
        ));
    }
    // freeing B first lets A take its name
    assert_eq!(schema.renamed(&[("B", "C"), ("A", "B")]).unwrap().names(), ["B", "C"]);
}
