//! Text renderings of relations: a padded table, a before/after comparison
//! and Zadeh's inline notation.

use crate::error::{PrufError, Result};
use crate::relation::DiscreteFuzzyRelation;
use crate::value::{fmt_tuple, Value};

const FILLER: &str = "/";

/// Layout for [`table`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableFormat {
    /// Side-by-side blocks of `attributes + mu`, filled column by column.
    pub columns: usize,
    pub max_rows: usize,
    /// Spaces added to the widest cell of each column.
    pub padding: usize,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            columns: 1,
            max_rows: 10,
            padding: 4,
        }
    }
}

fn round2(membership: f64) -> String {
    format!("{:?}", (membership * 100.).round() / 100.)
}

fn cells(tuple: &[Value]) -> impl Iterator<Item = String> + '_ {
    tuple.iter().map(Value::to_string)
}

/// Left-aligns every column to its widest cell plus `padding`, one line per row.
fn layout(header: &[String], rows: &[Vec<String>], padding: usize) -> String {
    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .chain(std::iter::once(&header[i]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                + padding
        })
        .collect();

    let mut out = String::new();

    for line in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (cell, width) in line.iter().zip(&widths) {
            out.push_str(&format!("{cell:<width$}"));
        }
        out.push('\n');
    }

    out
}

/// Renders up to `columns * max_rows` elements under a header of the attribute
/// names and `mu`, memberships rounded to two decimals. Unused cells of the
/// last block hold `/`; a note with the total follows when elements were left
/// out.
pub fn table(relation: &DiscreteFuzzyRelation, format: &TableFormat) -> Result<String> {
    let attributes = relation.schema().len() + 1;
    let rows = format.max_rows.min(relation.len());

    if format.columns == 0 || format.max_rows == 0 {
        return Err(PrufError::InvalidParameters("a table needs at least one row and one column".into()));
    }
    if rows > 0 && format.columns > relation.len().div_ceil(rows) {
        return Err(PrufError::InvalidParameters(format!(
            "{} columns are more than the {} elements need",
            format.columns,
            relation.len()
        )));
    }

    let header: Vec<String> = (0..format.columns)
        .flat_map(|_| relation.schema().iter().chain(std::iter::once("mu")).map(str::to_owned))
        .collect();
    let capacity = rows * format.columns;
    let mut lines = vec![Vec::with_capacity(attributes * format.columns); rows];

    for (count, (tuple, membership)) in relation.iter().take(capacity).enumerate() {
        lines[count % rows].extend(cells(tuple).chain(std::iter::once(round2(membership))));
    }
    for count in relation.len().min(capacity)..capacity {
        lines[count % rows].extend(std::iter::repeat(FILLER.to_owned()).take(attributes));
    }

    let mut out = layout(&header, &lines, format.padding);

    if relation.len() > capacity {
        out.push_str(&format!("Output truncated: n. of rows = {}", relation.len()));
    }

    Ok(out)
}

/// Lists the elements of `before` whose membership differs in `after`, as
/// `mu -> new_mu`, at most ten of them.
pub fn comparison(before: &DiscreteFuzzyRelation, after: &DiscreteFuzzyRelation) -> String {
    const MAX_ROWS: usize = 10;

    let header: Vec<String> = before
        .schema()
        .iter()
        .map(str::to_owned)
        .chain(["mu".to_owned(), "-> new_mu".to_owned()])
        .collect();
    let mut changed = before.iter().filter(|(tuple, membership)| after.membership(tuple) != *membership);
    let rows: Vec<Vec<String>> = changed
        .by_ref()
        .take(MAX_ROWS)
        .map(|(tuple, membership)| {
            cells(tuple)
                .chain([round2(membership), format!("-> {}", round2(after.membership(tuple)))])
                .collect()
        })
        .collect();

    let mut out = layout(&header, &rows, 4);

    if changed.next().is_some() {
        out.push_str(&format!("Output truncated: n. of rows = {}", before.len()));
    }

    out
}

/// `μ₁/t₁ + μ₂/t₂ + …` in support order, `∅` for the empty relation.
pub fn zadeh(relation: &DiscreteFuzzyRelation) -> String {
    if relation.is_empty() {
        return "∅".to_owned();
    }

    relation
        .iter()
        .map(|(tuple, membership)| format!("{membership:?}/{}", fmt_tuple(tuple)))
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use crate::tuple;

    fn relation(len: usize) -> DiscreteFuzzyRelation {
        DiscreteFuzzyRelation::from_pairs(
            Schema::new(["x"]).unwrap(),
            (0..len).map(|i| (tuple![i as i64], 0.5)),
        )
        .unwrap()
    }

    #[test]
    fn test_table_single_block() {
        let rel = DiscreteFuzzyRelation::from_pairs(
            Schema::new(["D1", "D2"]).unwrap(),
            [(tuple![1, "v2"], 0.333), (tuple!["v1", 3.4], 1.)],
        )
        .unwrap();

        assert_eq!(
            table(&rel, &TableFormat::default()).unwrap(),
            "D1    D2     mu      \n\
             1     v2     0.33    \n\
             v1    3.4    1.0     \n"
        );
    }

    #[test]
    fn test_table_blocks_and_truncation() {
        let format = TableFormat {
            columns: 2,
            max_rows: 2,
            padding: 1,
        };

        assert_eq!(
            table(&relation(3), &format).unwrap(),
            "x mu  x mu  \n\
             0 0.5 2 0.5 \n\
             1 0.5 / /   \n"
        );

        let truncated = table(&relation(12), &TableFormat::default()).unwrap();

        assert_eq!(truncated.lines().count(), 12);
        assert!(truncated.ends_with("Output truncated: n. of rows = 12"));
        assert!(table(&relation(3), &TableFormat { columns: 3, ..format }).is_err());
        assert_eq!(table(&relation(0), &TableFormat::default()).unwrap(), "x    mu    \n");
    }

    #[test]
    fn test_comparison() {
        let before = relation(3);
        let mut after = before.clone();

        after.put(tuple![1i64], 0.25).unwrap();
        after.remove(&tuple![2i64]);

        assert_eq!(
            comparison(&before, &after),
            "x    mu     -> new_mu    \n\
             1    0.5    -> 0.25      \n\
             2    0.5    -> 0.0       \n"
        );
    }

    #[test]
    fn test_zadeh() {
        let rel = DiscreteFuzzyRelation::from_pairs(
            Schema::new(["D1", "D2"]).unwrap(),
            [(tuple![1, "v2"], 0.3), (tuple!["v1", 3.4], 1.)],
        )
        .unwrap();

        assert_eq!(zadeh(&rel), "0.3/(1, 'v2') + 1.0/('v1', 3.4)");
        assert_eq!(rel.to_string(), zadeh(&rel));
        assert_eq!(zadeh(&relation(0)), "∅");
    }
}
