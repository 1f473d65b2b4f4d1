//! This module defines [Table], the interpretation of a single symbol.

use itertools::{Either, Itertools};
use serde::{Deserialize, Serialize};

use crate::error::StructureError;

use super::symbol::{Arity, SymbolKind};

/// Interpretation of an operation or relation symbol over the universe `0..n`.
///
/// The variant determines the arity of the symbol.
/// Operation tables hold elements of the universe,
/// relation tables hold `0` (false) or `1` (true).
///
/// In JSON a table is written as a bare number (arity 0)
/// or as nested arrays, one level of nesting per argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Table {
    /// Constant or proposition
    Nullary(usize),
    /// Indexed by `[x]`
    Unary(Vec<usize>),
    /// Indexed by `[x][y]`
    Binary(Vec<Vec<usize>>),
    /// Indexed by `[x][y][z]`
    Ternary(Vec<Vec<Vec<usize>>>),
}

impl Table {
    /// Return the arity encoded by the shape of this table.
    pub fn arity(&self) -> Arity {
        match self {
            Table::Nullary(_) => Arity::Nullary,
            Table::Unary(_) => Arity::Unary,
            Table::Binary(_) => Arity::Binary,
            Table::Ternary(_) => Arity::Ternary,
        }
    }

    /// Build the table of the given arity over a universe of size `cardinality`,
    /// computing each entry from its argument tuple.
    pub fn tabulate(arity: Arity, cardinality: usize, entry: impl Fn(&[usize]) -> usize) -> Self {
        let universe = 0..cardinality;

        match arity {
            Arity::Nullary => Table::Nullary(entry(&[])),
            Arity::Unary => Table::Unary(universe.map(|x| entry(&[x])).collect()),
            Arity::Binary => Table::Binary(
                universe
                    .map(|x| (0..cardinality).map(|y| entry(&[x, y])).collect())
                    .collect(),
            ),
            Arity::Ternary => Table::Ternary(
                universe
                    .map(|x| {
                        (0..cardinality)
                            .map(|y| (0..cardinality).map(|z| entry(&[x, y, z])).collect())
                            .collect()
                    })
                    .collect(),
            ),
        }
    }

    /// Return the entry stored for the given argument tuple.
    ///
    /// # Panics
    /// Panics if the length of `tuple` differs from the arity of the table
    /// or one of its components is out of bounds.
    pub fn value(&self, tuple: &[usize]) -> usize {
        match (self, tuple) {
            (Table::Nullary(value), []) => *value,
            (Table::Unary(table), [x]) => table[*x],
            (Table::Binary(table), [x, y]) => table[*x][*y],
            (Table::Ternary(table), [x, y, z]) => table[*x][*y][*z],
            _ => panic!(
                "tuple of length {} used on a table of arity {}",
                tuple.len(),
                self.arity()
            ),
        }
    }

    /// Return the value of a constant, if this table has arity zero.
    pub fn as_nullary(&self) -> Option<usize> {
        match self {
            Table::Nullary(value) => Some(*value),
            _ => None,
        }
    }

    /// Return the values of a unary table.
    pub fn as_unary(&self) -> Option<&[usize]> {
        match self {
            Table::Unary(values) => Some(values),
            _ => None,
        }
    }

    /// Iterate over all argument tuples together with their entry,
    /// in lexicographic order of the tuples.
    pub fn entries(&self, cardinality: usize) -> impl Iterator<Item = (Vec<usize>, usize)> + '_ {
        tuples(self.arity(), cardinality).map(|tuple| {
            let value = self.value(&tuple);
            (tuple, value)
        })
    }

    /// Return the entries of this table in row-major order.
    pub fn flatten(&self) -> Vec<usize> {
        match self {
            Table::Nullary(value) => vec![*value],
            Table::Unary(values) => values.clone(),
            Table::Binary(rows) => rows.iter().flatten().copied().collect(),
            Table::Ternary(planes) => planes.iter().flatten().flatten().copied().collect(),
        }
    }

    /// Inverse of [Table::flatten].
    ///
    /// Returns `None` if `values` does not contain exactly `cardinality^arity` entries.
    pub fn unflatten(arity: Arity, cardinality: usize, values: &[usize]) -> Option<Self> {
        if values.len() != cardinality.checked_pow(arity.count() as u32)? {
            return None;
        }

        Some(Table::tabulate(arity, cardinality, |tuple| {
            let position = tuple
                .iter()
                .fold(0, |position, &component| position * cardinality + component);
            values[position]
        }))
    }

    /// Check that every axis of this table has length `cardinality`
    /// and every entry is admissible for the kind of symbol it interprets.
    pub(crate) fn validate(
        &self,
        kind: SymbolKind,
        symbol: &str,
        cardinality: usize,
    ) -> Result<Arity, StructureError> {
        let arity = self.arity();

        if kind == SymbolKind::Operation && arity > Arity::Binary {
            return Err(StructureError::UnsupportedArity {
                symbol: symbol.to_string(),
                arity,
            });
        }

        let jagged = |found: usize| StructureError::JaggedTable {
            kind,
            symbol: symbol.to_string(),
            expected: cardinality,
            found,
        };
        let check_row = |length: usize| {
            if length == cardinality {
                Ok(())
            } else {
                Err(jagged(length))
            }
        };

        match self {
            Table::Nullary(_) => {}
            Table::Unary(values) => check_row(values.len())?,
            Table::Binary(rows) => {
                check_row(rows.len())?;
                rows.iter().try_for_each(|row| check_row(row.len()))?;
            }
            Table::Ternary(planes) => {
                check_row(planes.len())?;
                for plane in planes {
                    check_row(plane.len())?;
                    plane.iter().try_for_each(|row| check_row(row.len()))?;
                }
            }
        }

        for value in self.flatten() {
            match kind {
                SymbolKind::Operation if value >= cardinality => {
                    return Err(StructureError::ValueOutOfRange {
                        symbol: symbol.to_string(),
                        value,
                        cardinality,
                    })
                }
                SymbolKind::Relation if value > 1 => {
                    return Err(StructureError::NotBoolean {
                        symbol: symbol.to_string(),
                        value,
                    })
                }
                _ => {}
            }
        }

        Ok(arity)
    }
}

/// Iterate over all tuples of the given arity over `0..cardinality`
/// in lexicographic order (last component varies fastest).
pub fn tuples(arity: Arity, cardinality: usize) -> impl Iterator<Item = Vec<usize>> {
    match arity.count() {
        0 => Either::Left(std::iter::once(Vec::new())),
        count => Either::Right(
            itertools::repeat_n(0..cardinality, count).multi_cartesian_product(),
        ),
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    #[test]
    fn arity_follows_shape() {
        assert_eq!(Table::Nullary(0).arity(), Arity::Nullary);
        assert_eq!(Table::Unary(vec![1, 0]).arity(), Arity::Unary);
        assert_eq!(Table::Binary(vec![vec![0]]).arity(), Arity::Binary);
        assert_eq!(Table::Ternary(vec![vec![vec![1]]]).arity(), Arity::Ternary);
    }

    #[test]
    fn json_shapes() {
        let table: Table = serde_json::from_str("2").unwrap();
        assert_eq!(table, Table::Nullary(2));

        let table: Table = serde_json::from_str("[[0,0],[0,1]]").unwrap();
        assert_eq!(table, Table::Binary(vec![vec![0, 0], vec![0, 1]]));

        let table: Table = serde_json::from_str("[[[1]]]").unwrap();
        assert_eq!(table.arity(), Arity::Ternary);

        assert_eq!(serde_json::to_string(&Table::Unary(vec![1, 0])).unwrap(), "[1,0]");
    }

    #[test]
    fn jagged_rows_are_rejected() {
        let table = Table::Binary(vec![vec![0, 1], vec![0]]);
        assert_eq!(
            table.validate(SymbolKind::Operation, "*", 2),
            Err(StructureError::JaggedTable {
                kind: SymbolKind::Operation,
                symbol: "*".to_string(),
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn ranges_are_checked() {
        let table = Table::Unary(vec![0, 2]);
        assert!(matches!(
            table.validate(SymbolKind::Operation, "f", 2),
            Err(StructureError::ValueOutOfRange { value: 2, .. })
        ));
        assert!(matches!(
            table.validate(SymbolKind::Relation, "P", 2),
            Err(StructureError::NotBoolean { value: 2, .. })
        ));

        let ternary = Table::Ternary(vec![vec![vec![0]]]);
        assert!(matches!(
            ternary.validate(SymbolKind::Operation, "t", 1),
            Err(StructureError::UnsupportedArity { .. })
        ));
        assert_eq!(
            ternary.validate(SymbolKind::Relation, "T", 1),
            Ok(Arity::Ternary)
        );
    }

    #[test]
    fn tuples_are_lexicographic() {
        assert_eq!(
            tuples(Arity::Nullary, 3).collect::<Vec<_>>(),
            vec![Vec::<usize>::new()]
        );
        assert_eq!(
            tuples(Arity::Binary, 2).collect::<Vec<_>>(),
            vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
        );
        assert_eq!(tuples(Arity::Ternary, 3).count(), 27);
    }

    #[test]
    fn flatten_and_back() {
        let table = Table::Ternary(vec![
            vec![vec![0, 1], vec![1, 1]],
            vec![vec![0, 0], vec![1, 0]],
        ]);
        let flat = table.flatten();
        assert_eq!(flat, vec![0, 1, 1, 1, 0, 0, 1, 0]);
        assert_eq!(Table::unflatten(Arity::Ternary, 2, &flat), Some(table));
        assert_eq!(Table::unflatten(Arity::Binary, 2, &flat), None);
    }
}
