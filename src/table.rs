//! Column-oriented tables for moving relations in and out of tabular data.
//!
//! A table carries named value columns and, separately, an optional weight
//! column holding memberships. No column name is special: the weight column is
//! designated explicitly, so an attribute may well be called `mu`.

use tracing::debug;

use crate::error::{PrufError, Result};
use crate::relation::DiscreteFuzzyRelation;
use crate::schema::Schema;
use crate::value::{Tuple, Value};

/// Which input column, if any, holds the memberships.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WeightColumn<'a> {
    /// Every row gets membership 1.
    #[default]
    None,
    Named(&'a str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Tuple>,
    weights: Option<Vec<f64>>,
}

impl Table {
    /// A table from row tuples; every row must have one value per column.
    pub fn new<I, S>(columns: I, rows: Vec<Tuple>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(PrufError::InvalidTable(format!(
                "row has {} values but the table has {} columns",
                row.len(),
                columns.len()
            )));
        }

        Ok(Self {
            columns,
            rows,
            weights: None,
        })
    }

    /// Attaches one weight per row.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != self.rows.len() {
            return Err(PrufError::InvalidTable(format!(
                "{} weights for {} rows",
                weights.len(),
                self.rows.len()
            )));
        }

        self.weights = Some(weights);

        Ok(self)
    }

    /// Builds a table from `(name, values)` columns of equal length, pulling the
    /// memberships out of the column named by `weight`.
    ///
    /// ```
    /// use pruf::{tuple, DiscreteFuzzyRelation, Table, Value, WeightColumn};
    ///
    /// let table = Table::from_columns(
    ///     vec![
    ///         ("x".to_owned(), vec![Value::from(1), Value::from(2)]),
    ///         ("y".to_owned(), vec![Value::from(3), Value::from(4)]),
    ///         ("mu".to_owned(), vec![Value::from(0.5), Value::from(0.7)]),
    ///     ],
    ///     WeightColumn::Named("mu"),
    /// )
    /// .unwrap();
    /// let relation = DiscreteFuzzyRelation::from_table(&table).unwrap();
    ///
    /// assert_eq!(relation.schema().names(), ["x", "y"]);
    /// assert_eq!(relation.membership(&tuple![2, 4]), 0.7);
    /// ```
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>, weight: WeightColumn<'_>) -> Result<Self> {
        let len = columns.first().map_or(0, |(_, values)| values.len());

        if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != len) {
            return Err(PrufError::InvalidTable(format!(
                "column '{name}' has {} values, expected {len}",
                values.len()
            )));
        }

        let mut names = Vec::with_capacity(columns.len());
        let mut value_columns = Vec::with_capacity(columns.len());
        let mut weights = None;

        for (name, values) in columns {
            match weight {
                WeightColumn::Named(weight_name) if weight_name == name => {
                    let parsed = values
                        .iter()
                        .map(|value| match value {
                            Value::Float(weight) => Ok(*weight),
                            _ => Err(PrufError::InvalidTable(format!(
                                "weight '{value}' in column '{name}' is not a float"
                            ))),
                        })
                        .collect::<Result<Vec<_>>>()?;

                    weights = Some(parsed);
                }
                _ => {
                    names.push(name);
                    value_columns.push(values);
                }
            }
        }

        if let WeightColumn::Named(weight_name) = weight {
            if weights.is_none() {
                return Err(PrufError::InvalidTable(format!("no weight column named '{weight_name}'")));
            }
        }

        let rows = (0..len)
            .map(|i| value_columns.iter().map(|column| column[i].clone()).collect())
            .collect();

        Ok(Self {
            columns: names,
            rows,
            weights,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Tuple] {
        &self.rows
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DiscreteFuzzyRelation {
    /// Imports `table`; rows without weights get membership 1 and a repeated row
    /// keeps the last weight.
    pub fn from_table(table: &Table) -> Result<Self> {
        if table.columns.is_empty() {
            return Err(PrufError::InvalidTable("at least one value column is required".into()));
        }
        if table.rows.is_empty() {
            return Err(PrufError::InvalidTable("at least one row is required".into()));
        }

        let schema = Schema::new(table.columns.iter().cloned())?;
        let mut relation = Self::new(schema);

        for (i, row) in table.rows.iter().enumerate() {
            let weight = table.weights.as_ref().map_or(1., |weights| weights[i]);

            relation.put(row.clone(), weight)?;
        }

        debug!(rows = table.len(), result = relation.len(), "imported table");

        Ok(relation)
    }

    /// Exports the support, in order, with the memberships as weights.
    pub fn to_table(&self) -> Table {
        let (rows, weights): (Vec<Tuple>, Vec<f64>) =
            self.iter().map(|(tuple, membership)| (tuple.clone(), membership)).unzip();

        Table {
            columns: self.schema().to_vec(),
            rows,
            weights: Some(weights),
        }
    }
}

impl From<&DiscreteFuzzyRelation> for Table {
    fn from(relation: &DiscreteFuzzyRelation) -> Self {
        relation.to_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple;

    #[test]
    fn test_import_defaults_and_duplicates() {
        let table = Table::new(["x", "y"], vec![tuple![1, 3], tuple![2, 4], tuple![1, 3]]).unwrap();
        let relation = DiscreteFuzzyRelation::from_table(&table).unwrap();

        assert_eq!(relation.len(), 2);
        assert_eq!(relation.membership(&tuple![1, 3]), 1.);

        let weighted = table.with_weights(vec![0.2, 0.4, 0.6]).unwrap();
        let relation = DiscreteFuzzyRelation::from_table(&weighted).unwrap();

        assert_eq!(relation.membership(&tuple![1, 3]), 0.6);
    }

    #[test]
    fn test_import_rejections() {
        assert!(matches!(
            Table::new(["x"], vec![tuple![1, 2]]),
            Err(PrufError::InvalidTable(_))
        ));
        assert!(matches!(
            Table::new(["x"], vec![tuple![1]]).unwrap().with_weights(vec![]),
            Err(PrufError::InvalidTable(_))
        ));

        let no_rows = Table::new(["x"], vec![]).unwrap();

        assert!(matches!(DiscreteFuzzyRelation::from_table(&no_rows), Err(PrufError::InvalidTable(_))));

        let only_weights = Table::from_columns(
            vec![("mu".to_owned(), vec![Value::from(0.5)])],
            WeightColumn::Named("mu"),
        )
        .unwrap();

        assert!(matches!(
            DiscreteFuzzyRelation::from_table(&only_weights),
            Err(PrufError::InvalidTable(_))
        ));

        let bad_weight = Table::new(["x"], vec![tuple![1]]).unwrap().with_weights(vec![1.5]).unwrap();

        assert!(matches!(
            DiscreteFuzzyRelation::from_table(&bad_weight),
            Err(PrufError::InvalidMembership { .. })
        ));

        let ragged = Table::from_columns(
            vec![
                ("x".to_owned(), vec![Value::from(1)]),
                ("y".to_owned(), vec![Value::from(1), Value::from(2)]),
            ],
            WeightColumn::None,
        );

        assert!(matches!(ragged, Err(PrufError::InvalidTable(_))));
        assert!(Table::from_columns(vec![("x".to_owned(), vec![Value::from("a")])], WeightColumn::Named("w")).is_err());
    }

    #[test]
    fn test_weights_must_be_floats() {
        let columns = |weight: Value| {
            vec![
                ("x".to_owned(), vec![Value::from(1)]),
                ("mu".to_owned(), vec![weight]),
            ]
        };

        assert!(matches!(
            Table::from_columns(columns(Value::from(1)), WeightColumn::Named("mu")),
            Err(PrufError::InvalidTable(_))
        ));
        assert!(matches!(
            Table::from_columns(columns(Value::from(true)), WeightColumn::Named("mu")),
            Err(PrufError::InvalidTable(_))
        ));

        let table = Table::from_columns(columns(Value::from(1.)), WeightColumn::Named("mu")).unwrap();

        assert_eq!(table.weights(), Some(&[1.][..]));
    }

    #[test]
    fn test_mu_is_an_ordinary_column() {
        let table = Table::from_columns(
            vec![("mu".to_owned(), vec![Value::from(0.5)])],
            WeightColumn::None,
        )
        .unwrap();
        let relation = DiscreteFuzzyRelation::from_table(&table).unwrap();

        assert_eq!(relation.schema().names(), ["mu"]);
        assert_eq!(relation.membership(&tuple![0.5]), 1.);
    }

    #[test]
    fn test_export() {
        let relation = DiscreteFuzzyRelation::from_pairs(
            Schema::new(["x"]).unwrap(),
            [(tuple!["a"], 0.25), (tuple!["b"], 1.)],
        )
        .unwrap();
        let table = Table::from(&relation);

        assert_eq!(table.columns(), ["x"]);
        assert_eq!(table.rows(), [tuple!["a"], tuple!["b"]]);
        assert_eq!(table.weights(), Some(&[0.25, 1.][..]));
        assert_eq!(DiscreteFuzzyRelation::from_table(&table).unwrap(), relation);
    }
}
